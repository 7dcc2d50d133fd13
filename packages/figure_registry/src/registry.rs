use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::RegistryError;
use crate::figure::FigureHandle;
use crate::hub::NotificationHub;

/// The shared directory of active figures, keyed by each figure's port.
///
/// Every successful mutation notifies all open control sessions before
/// returning, so callers observe notification dispatch as part of the
/// mutation's completion.
pub struct FigureRegistry {
    // BTreeMap keeps list_ports()/snapshot() in ascending port order,
    // which both viewer pages rely on for stable layout.
    figures: RwLock<BTreeMap<u16, FigureHandle>>,
    hub: NotificationHub,
}

impl Default for FigureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureRegistry {
    pub fn new() -> Self {
        Self {
            figures: RwLock::new(BTreeMap::new()),
            hub: NotificationHub::new(),
        }
    }

    /// Register `handle` under `port`, overwriting any previous entry
    /// at that port (last write wins), then notify every open session.
    pub async fn add_figure(&self, port: u16, handle: FigureHandle) {
        self.figures.write().await.insert(port, handle);
        debug!("Added figure at port {}", port);
        self.hub.broadcast().await;
    }

    /// Remove the figure at `port`, then notify every open session.
    ///
    /// An unknown port is a lookup failure; nothing is broadcast.
    pub async fn remove_figure(&self, port: u16) -> Result<(), RegistryError> {
        self.figures
            .write()
            .await
            .remove(&port)
            .ok_or(RegistryError::FigureNotFound(port))?;
        debug!("Removed figure at port {}", port);
        self.hub.broadcast().await;
        Ok(())
    }

    /// Currently registered ports, ascending.
    pub async fn list_ports(&self) -> Vec<u16> {
        self.figures.read().await.keys().copied().collect()
    }

    /// Registered figures with their ports, in ascending port order.
    pub async fn snapshot(&self) -> Vec<(u16, FigureHandle)> {
        self.figures
            .read()
            .await
            .iter()
            .map(|(port, handle)| (*port, handle.clone()))
            .collect()
    }

    /// Number of registered figures
    pub async fn figure_count(&self) -> usize {
        self.figures.read().await.len()
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::ControlEvent;
    use tokio::sync::mpsc;

    fn figure(port: u16) -> FigureHandle {
        FigureHandle::new(port, 640, 480, "c.clear();", "c.lineTo(1,1);")
    }

    fn peer() -> std::net::SocketAddr {
        "127.0.0.1:40001".parse().unwrap()
    }

    #[tokio::test]
    async fn list_ports_tracks_adds_and_removes_sorted() {
        let registry = FigureRegistry::new();
        registry.add_figure(9003, figure(9003)).await;
        registry.add_figure(9001, figure(9001)).await;
        registry.add_figure(9002, figure(9002)).await;
        registry.remove_figure(9002).await.unwrap();

        assert_eq!(registry.list_ports().await, vec![9001, 9003]);
    }

    #[tokio::test]
    async fn add_figure_overwrites_silently() {
        let registry = FigureRegistry::new();
        registry.add_figure(9001, figure(9001)).await;

        let replacement = FigureHandle::new(9001, 800, 600, "c.clear();", "c.arc(0,0,5);");
        registry.add_figure(9001, replacement.clone()).await;

        assert_eq!(registry.list_ports().await, vec![9001]);
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot[0].1, replacement);
    }

    #[tokio::test]
    async fn remove_unknown_port_is_a_lookup_failure() {
        let registry = FigureRegistry::new();
        assert_eq!(
            registry.remove_figure(9009).await,
            Err(RegistryError::FigureNotFound(9009))
        );
    }

    #[tokio::test]
    async fn failed_removal_does_not_broadcast() {
        let registry = FigureRegistry::new();
        let (tx, mut rx) = mpsc::channel(8);
        registry.hub().register_session(tx, peer()).await;

        registry.remove_figure(9009).await.unwrap_err();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_mutation_broadcasts_exactly_once_per_session() {
        let registry = FigureRegistry::new();
        let (tx_a, mut rx_a) = mpsc::channel(16);
        let (tx_b, mut rx_b) = mpsc::channel(16);
        registry.hub().register_session(tx_a, peer()).await;
        registry.hub().register_session(tx_b, peer()).await;

        registry.add_figure(9001, figure(9001)).await;
        registry.add_figure(9002, figure(9002)).await;
        registry.remove_figure(9001).await.unwrap();

        for rx in [&mut rx_a, &mut rx_b] {
            let mut received = 0;
            while rx.try_recv() == Ok(ControlEvent::UpdateThumbnails) {
                received += 1;
            }
            assert_eq!(received, 3);
        }
    }

    #[tokio::test]
    async fn snapshot_is_in_ascending_port_order() {
        let registry = FigureRegistry::new();
        registry.add_figure(9005, figure(9005)).await;
        registry.add_figure(9001, figure(9001)).await;

        let ports: Vec<u16> = registry.snapshot().await.iter().map(|(p, _)| *p).collect();
        assert_eq!(ports, vec![9001, 9005]);
    }

    #[tokio::test]
    async fn empty_registry_lists_no_ports() {
        let registry = FigureRegistry::new();
        assert!(registry.list_ports().await.is_empty());
        assert_eq!(registry.figure_count().await, 0);
    }
}
