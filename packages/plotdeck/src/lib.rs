//! Plotdeck - live plot directory and preview manager
//!
//! Plotting backends register their figures with a central
//! [`PlotManager`]; browsers connect to its web interface to discover
//! and monitor the directory in near-real-time. Pages are served on the
//! base port, and a persistent WebSocket control channel on base + 1
//! pushes `update_thumbnails();` to every connected browser whenever
//! the directory changes.

pub mod config;
pub mod manager;
pub mod net;
pub mod render;
pub mod views;
pub mod ws;

pub use config::ManagerConfig;
pub use figure_registry::{FigureHandle, FigureRegistry, RegistryError};
pub use manager::PlotManager;

use std::sync::Arc;

/// Shared state handed to every page and control-channel handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FigureRegistry>,
    pub config: Arc<ManagerConfig>,
}
