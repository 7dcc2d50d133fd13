//! Control-channel session handling.
//!
//! One task per accepted connection. There is deliberately no timeout
//! and no liveness probe: a half-open peer that never sends and never
//! errors holds its session slot until process shutdown. Broken
//! connections are detected only when a send or receive fails, and the
//! first failure is terminal for that session.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use futures::{sink::SinkExt, stream::StreamExt};
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tracing::{debug, info};

use figure_registry::ControlEvent;

use super::commands::command_table;
use crate::AppState;

pub async fn control_channel_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, state, peer))
}

/// Per-session loop; owns the session's lifetime in the hub.
///
/// Inbound messages carry no meaningful payload beyond legacy commands
/// and keep-alive noise; each one is answered with the same
/// state-changed event the hub pushes on registry mutations.
pub async fn run_session(socket: WebSocket, state: AppState, peer: SocketAddr) {
    info!("New control channel from {}", peer);

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ControlEvent>(16);
    let reply_tx = tx.clone();
    let id = state.registry.hub().register_session(tx, peer).await;

    // Pushes hub events out to the socket. A failed send ends the
    // session; the hub also prunes us on its next broadcast.
    let send_task = async move {
        while let Some(event) = rx.recv().await {
            if ws_sender
                .send(Message::Text(event.wire_text().into()))
                .await
                .is_err()
            {
                break;
            }
        }
    };

    // Receive loop: dispatch legacy commands, then reply through the
    // hub channel so the single sender task owns the socket sink.
    let recv_task = async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    command_table().dispatch(&text);
                    if reply_tx.send(ControlEvent::UpdateThumbnails).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Binary(_)) => {
                    if reply_tx.send(ControlEvent::UpdateThumbnails).await.is_err() {
                        break;
                    }
                }
                // Ping/pong is transport keep-alive, answered by axum.
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Ok(Message::Close(_)) | Err(_) => break,
            }
        }
    };

    tokio::select! {
        _ = send_task => {}
        _ = recv_task => {}
    }

    state.registry.hub().remove_session(id).await;
    debug!("Control channel from {} closed", peer);
}
