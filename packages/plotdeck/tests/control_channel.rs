use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use figure_registry::{FigureHandle, FigureRegistry};
use plotdeck::manager::control_router;
use plotdeck::{AppState, ManagerConfig};

async fn start_control_server() -> (SocketAddr, Arc<FigureRegistry>) {
    let registry = Arc::new(FigureRegistry::new());
    let mut config = ManagerConfig::new("127.0.0.1", 8891);
    config.advertised_ip = "127.0.0.1".to_string();
    let state = AppState {
        registry: registry.clone(),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = control_router(state);
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (addr, registry)
}

async fn wait_for_sessions(registry: &FigureRegistry, expected: usize) {
    for _ in 0..200 {
        if registry.hub().session_count().await == expected {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "hub never reached {} sessions (at {})",
        expected,
        registry.hub().session_count().await
    );
}

#[tokio::test]
async fn inbound_message_elicits_exactly_one_update_reply() {
    let (addr, _registry) = start_control_server().await;
    let (mut socket, _) = connect_async(format!("ws://{addr}/")).await.unwrap();

    socket.send(Message::text("/base args='')")).await.unwrap();

    let reply = socket.next().await.unwrap().unwrap();
    assert_eq!(reply.into_text().unwrap().as_str(), "update_thumbnails();");
}

#[tokio::test]
async fn registry_mutation_pushes_unsolicited_update() {
    let (addr, registry) = start_control_server().await;
    let (mut socket, _) = connect_async(format!("ws://{addr}/")).await.unwrap();
    wait_for_sessions(&registry, 1).await;

    registry
        .add_figure(9001, FigureHandle::new(9001, 64, 48, "", "c.stroke();"))
        .await;

    let event = socket.next().await.unwrap().unwrap();
    assert_eq!(event.into_text().unwrap().as_str(), "update_thumbnails();");
}

#[tokio::test]
async fn closed_connection_is_removed_from_the_hub() {
    let (addr, registry) = start_control_server().await;
    let (socket, _) = connect_async(format!("ws://{addr}/")).await.unwrap();
    wait_for_sessions(&registry, 1).await;

    drop(socket);
    wait_for_sessions(&registry, 0).await;
}

#[tokio::test]
async fn two_watchers_both_hear_about_a_change() {
    let (addr, registry) = start_control_server().await;
    let (mut a, _) = connect_async(format!("ws://{addr}/")).await.unwrap();
    let (mut b, _) = connect_async(format!("ws://{addr}/")).await.unwrap();
    wait_for_sessions(&registry, 2).await;

    registry
        .add_figure(9001, FigureHandle::new(9001, 64, 48, "", "c.stroke();"))
        .await;

    for socket in [&mut a, &mut b] {
        let event = socket.next().await.unwrap().unwrap();
        assert_eq!(event.into_text().unwrap().as_str(), "update_thumbnails();");
    }
}
