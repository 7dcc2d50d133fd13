/// One plot owned by a backend process.
///
/// The backend serializes its draw state into `header` (surface setup)
/// and `frame` (the draw-call sequence); the manager never interprets
/// either beyond rewriting identifiers for thumbnail embedding. The
/// `port` is the figure's own network identity and doubles as its key
/// in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureHandle {
    pub port: u16,
    /// Pixel width of the figure's canvas
    pub width: u32,
    /// Pixel height of the figure's canvas
    pub height: u32,
    /// Serialized setup/script prelude
    pub header: String,
    /// Serialized draw-call sequence
    pub frame: String,
}

impl FigureHandle {
    pub fn new(
        port: u16,
        width: u32,
        height: u32,
        header: impl Into<String>,
        frame: impl Into<String>,
    ) -> Self {
        Self {
            port,
            width,
            height,
            header: header.into(),
            frame: frame.into(),
        }
    }
}
