//! Figure Registry - in-memory directory of active plots
//!
//! This crate is the single source of truth for "what plots currently
//! exist". Plotting backends register a figure under the port its own
//! rendering protocol listens on; browsers watch the directory through
//! control sessions tracked by the [`NotificationHub`], which pushes a
//! change event to every open session whenever the directory mutates.
//!
//! It has no HTTP dependencies: sessions are represented by plain
//! channels, so the transport (and tests) stay outside.
//!
//! # Example
//!
//! ```no_run
//! use figure_registry::{FigureHandle, FigureRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = FigureRegistry::new();
//!
//!     let handle = FigureHandle {
//!         port: 9001,
//!         width: 640,
//!         height: 480,
//!         header: "c.clear();".to_string(),
//!         frame: "c.lineTo(10,10);".to_string(),
//!     };
//!
//!     // Registers the figure and notifies every open control session.
//!     registry.add_figure(9001, handle).await;
//!     assert_eq!(registry.list_ports().await, vec![9001]);
//!
//!     registry.remove_figure(9001).await.unwrap();
//! }
//! ```

mod error;
mod figure;
mod hub;
mod registry;

pub use error::RegistryError;
pub use figure::FigureHandle;
pub use hub::{ControlEvent, NotificationHub, SessionId};
pub use registry::FigureRegistry;
