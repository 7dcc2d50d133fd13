use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use figure_registry::{FigureHandle, FigureRegistry, RegistryError};

use crate::config::ManagerConfig;
use crate::{AppState, views, ws};

/// Page-server routes. The fixed paths are checked in order: the
/// numeric viewer route, then `/thumbs`, then the not-found default.
pub fn page_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::viewer_page))
        .route("/thumbs", get(views::thumbs_page))
        .route("/{layout}", get(views::viewer_layout_page))
        .fallback(views::not_found)
        .with_state(state)
}

/// Control-channel routes: a single WebSocket endpoint at `/`.
pub fn control_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws::control_channel_handler))
        .with_state(state)
}

/// The manager: owns the figure directory and both listening servers.
///
/// Embedding backends keep one of these alive for the life of their
/// process and call [`add_figure`](Self::add_figure) /
/// [`remove_figure`](Self::remove_figure) as plots come and go.
pub struct PlotManager {
    registry: Arc<FigureRegistry>,
    config: Arc<ManagerConfig>,
    page_task: JoinHandle<()>,
    control_task: JoinHandle<()>,
}

impl PlotManager {
    /// Bind both endpoints and start serving.
    ///
    /// Both listeners are bound before either server starts, so a
    /// failed bind leaves nothing listening. Bind failure is fatal for
    /// the manager: it cannot provide its guarantee with only one
    /// endpoint up.
    pub async fn start(config: ManagerConfig) -> Result<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(FigureRegistry::new());
        let state = AppState {
            registry: registry.clone(),
            config: config.clone(),
        };

        let page_listener = TcpListener::bind(config.page_addr())
            .await
            .with_context(|| format!("failed to bind page server on {}", config.page_addr()))?;
        let control_listener = TcpListener::bind(config.control_addr())
            .await
            .with_context(|| {
                format!(
                    "failed to bind control channel on {}",
                    config.control_addr()
                )
            })?;

        let page_app = page_router(state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());
        let control_app = control_router(state);

        let page_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(page_listener, page_app.into_make_service()).await {
                error!("Page server error: {}", e);
            }
        });
        let control_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(
                control_listener,
                control_app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                error!("Control channel server error: {}", e);
            }
        });

        info!("Web server active. Browse to {} to view plots.", config.url());

        Ok(Self {
            registry,
            config,
            page_task,
            control_task,
        })
    }

    /// Register a figure under `port` and notify every watching browser.
    pub async fn add_figure(&self, port: u16, handle: FigureHandle) {
        self.registry.add_figure(port, handle).await;
    }

    /// Remove the figure at `port` and notify every watching browser.
    pub async fn remove_figure(&self, port: u16) -> Result<(), RegistryError> {
        self.registry.remove_figure(port).await
    }

    /// URL clients should browse to
    pub fn url(&self) -> String {
        self.config.url()
    }

    pub fn registry(&self) -> Arc<FigureRegistry> {
        self.registry.clone()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Stop both servers. Open control sessions are dropped with them.
    pub fn shutdown(&self) {
        self.page_task.abort();
        self.control_task.abort();
    }
}
