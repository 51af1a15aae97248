//! WebSocket-backed message pusher.
//!
//! Keeps one unbounded sender per connected client. Pushing a frame only
//! enqueues it; the connection's writer task drains the channel onto the
//! socket, so callers never block on a slow client.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, UserId};

pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<UserId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, user_id: UserId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(user_id, sender);
        tracing::debug!("Client registered to pusher: {}", user_id);
    }

    async fn unregister_client(&self, user_id: &UserId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(user_id).is_some() {
            tracing::debug!("Client unregistered from pusher: {}", user_id);
        }
    }

    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let sender = clients
            .get(user_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(user_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast(&self, targets: Vec<UserId>, content: &str) {
        let clients = self.clients.lock().await;
        for target in &targets {
            match clients.get(target) {
                Some(sender) => {
                    // A send failure means the writer task already shut
                    // down; the disconnect cascade will clean up.
                    if sender.send(content.to_string()).is_err() {
                        tracing::warn!("Failed to push to client: {}", target);
                    }
                }
                None => {
                    tracing::warn!("Broadcast target is not connected: {}", target);
                }
            }
        }
    }

    async fn broadcast_all(&self, content: &str) {
        let clients = self.clients.lock().await;
        for (user_id, sender) in clients.iter() {
            if sender.send(content.to_string()).is_err() {
                tracing::warn!("Failed to push to client: {}", user_id);
            }
        }
    }
}
