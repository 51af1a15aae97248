//! Outbound delivery interface.
//!
//! The domain layer defines how handlers hand frames to connections;
//! the infrastructure layer owns the actual WebSocket plumbing.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::UserId;

/// Write half of one connection: frames pushed here are drained by the
/// connection's writer task. Enqueue-only, never blocks.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Fan-out of serialized frames to live connections.
///
/// Delivery is fire-and-forget. A broadcast target whose connection has
/// already closed is skipped, never an error; disconnect processing and
/// concurrently triggered broadcasts are allowed to race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Bind a connection's write half to its user id.
    async fn register_client(&self, user_id: UserId, sender: PusherChannel);

    /// Forget a connection's write half (disconnect).
    async fn unregister_client(&self, user_id: &UserId);

    /// Deliver one frame to one connection.
    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), MessagePushError>;

    /// Deliver one frame to each target that is still connected.
    async fn broadcast(&self, targets: Vec<UserId>, content: &str);

    /// Deliver one frame to every open connection, registered or not.
    /// Used only for room-directory updates.
    async fn broadcast_all(&self, content: &str);
}
