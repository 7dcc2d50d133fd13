use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, mpsc};
use tracing::debug;

/// Unique identifier for a control session
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Event pushed to browsers over the control channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// The set of registered figures changed
    UpdateThumbnails,
}

impl ControlEvent {
    /// Literal wire text the viewer page script executes on receipt
    pub fn wire_text(&self) -> &'static str {
        match self {
            ControlEvent::UpdateThumbnails => "update_thumbnails();",
        }
    }
}

/// One open control channel to one browser client
struct ControlSession {
    /// Peer address, kept for diagnostics only
    peer: SocketAddr,
    tx: mpsc::Sender<ControlEvent>,
}

/// Tracks the set of open control sessions and fans registry-change
/// events out to all of them.
///
/// Delivery is best-effort and at-most-once: there is no ack and no
/// retry, and a session whose send fails is pruned from the set without
/// aborting delivery to the rest.
pub struct NotificationHub {
    sessions: RwLock<HashMap<SessionId, ControlSession>>,
    next_id: AtomicU64,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Add a session; called once per accepted control connection.
    pub async fn register_session(
        &self,
        tx: mpsc::Sender<ControlEvent>,
        peer: SocketAddr,
    ) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.sessions
            .write()
            .await
            .insert(id, ControlSession { peer, tx });
        debug!("Registered control {} from {}", id, peer);
        id
    }

    /// Drop a session after its receive loop observes a broken connection.
    pub async fn remove_session(&self, id: SessionId) {
        if let Some(session) = self.sessions.write().await.remove(&id) {
            debug!("Removed control {} from {}", id, session.peer);
        }
    }

    /// Push a state-changed event to every open session.
    pub async fn broadcast(&self) {
        let mut sessions = self.sessions.write().await;
        let mut gone = Vec::new();

        for (id, session) in sessions.iter() {
            if session
                .tx
                .send(ControlEvent::UpdateThumbnails)
                .await
                .is_err()
            {
                debug!("Connection {} has gone. Closing...", session.peer);
                gone.push(*id);
            }
        }

        for id in gone {
            sessions.remove(&id);
        }
    }

    /// Number of currently open sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Peer addresses of the open sessions, for diagnostics
    pub async fn peers(&self) -> Vec<SocketAddr> {
        self.sessions
            .read()
            .await
            .values()
            .map(|s| s.peer)
            .collect()
    }
}
