use thiserror::Error;

/// Errors that can occur during registry operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No figure is registered at the given port. Removal of an unknown
    /// port signals a state-sync bug on the caller's side, so it is
    /// reported rather than ignored.
    #[error("no figure registered at port {0}")]
    FigureNotFound(u16),
}
