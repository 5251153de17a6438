//! WebSocket connection bookkeeping
//!
//! Each live socket registers a bounded outbound channel. Broadcasting pushes
//! a message into every channel and forgets connections whose channel closed
//! or filled up because the client stopped reading.

use crate::server::ws::ServerMessage;
use std::collections::HashMap;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Outbound message queue of one connection
pub type Outbox = mpsc::Sender<ServerMessage>;

/// Tracks live connections for broadcasting
#[derive(Default)]
pub struct ConnectionManager {
    connections: RwLock<HashMap<Uuid, Outbox>>,
}

impl ConnectionManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return its id
    pub async fn connect(&self, outbox: Outbox) -> Uuid {
        let id = Uuid::new_v4();
        let mut connections = self.connections.write().await;
        connections.insert(id, outbox);
        info!(
            "Client {} connected. Total connections: {}",
            id,
            connections.len()
        );
        id
    }

    /// Forget a connection; returns false if it was already gone
    pub async fn disconnect(&self, id: &Uuid) -> bool {
        let mut connections = self.connections.write().await;
        let removed = connections.remove(id).is_some();
        if removed {
            info!(
                "Client {} disconnected. Total connections: {}",
                id,
                connections.len()
            );
        }
        removed
    }

    /// Send a message to every connection
    ///
    /// Connections that can no longer receive are dropped. Returns the number
    /// of connections the message was delivered to.
    pub async fn broadcast(&self, message: &ServerMessage) -> usize {
        let mut failed = Vec::new();
        let mut delivered = 0;

        {
            let connections = self.connections.read().await;
            for (id, outbox) in connections.iter() {
                match outbox.try_send(message.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!("Dropping client {}: outbox full", id);
                        failed.push(*id);
                    }
                    Err(TrySendError::Closed(_)) => {
                        warn!("Error broadcasting to client {}: connection closed", id);
                        failed.push(*id);
                    }
                }
            }
        }

        for id in failed {
            self.disconnect(&id).await;
        }

        delivered
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Whether there are no live connections
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ServerMessage {
        ServerMessage::Error {
            message: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_disconnect() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = mpsc::channel(8);

        let id = manager.connect(tx).await;
        assert_eq!(manager.len().await, 1);

        assert!(manager.disconnect(&id).await);
        assert!(manager.is_empty().await);
        assert!(!manager.disconnect(&id).await);
    }

    #[tokio::test]
    async fn test_broadcast() {
        let manager = ConnectionManager::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        manager.connect(tx1).await;
        manager.connect(tx2).await;

        assert_eq!(manager.broadcast(&message()).await, 2);

        assert_eq!(rx1.recv().await.unwrap(), message());
        assert_eq!(rx2.recv().await.unwrap(), message());
    }

    #[tokio::test]
    async fn test_broadcast_with_failed_connection() {
        let manager = ConnectionManager::new();
        let (tx1, rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        manager.connect(tx1).await;
        let alive = manager.connect(tx2).await;

        drop(rx1);
        assert_eq!(manager.broadcast(&message()).await, 1);

        assert_eq!(manager.len().await, 1);
        assert_eq!(rx2.recv().await.unwrap(), message());
        assert!(manager.disconnect(&alive).await);
    }

    #[tokio::test]
    async fn test_broadcast_drops_client_with_full_outbox() {
        let manager = ConnectionManager::new();
        let (stalled_tx, mut stalled_rx) = mpsc::channel(1);
        let (tx, mut rx) = mpsc::channel(8);
        manager.connect(stalled_tx).await;
        manager.connect(tx).await;

        assert_eq!(manager.broadcast(&message()).await, 2);
        // the stalled client never reads, so its single slot is still taken
        assert_eq!(manager.broadcast(&message()).await, 1);
        assert_eq!(manager.len().await, 1);

        assert_eq!(manager.broadcast(&message()).await, 1);
        for _ in 0..3 {
            assert_eq!(rx.recv().await.unwrap(), message());
        }
        assert_eq!(stalled_rx.recv().await.unwrap(), message());
        assert!(stalled_rx.recv().await.is_none());
    }
}
