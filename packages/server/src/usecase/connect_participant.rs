//! UseCase: participant connection.

use std::sync::Arc;

use quorum_shared::time::now_millis;

use crate::domain::{MessagePusher, PusherChannel, SessionRepository, Timestamp, UserId};

/// Admits a new WebSocket connection into the session.
///
/// Every connection gets a server-assigned id; no registration is needed
/// to connect, only to act.
pub struct ConnectParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Create the user record and wire the connection's outbound channel
    /// into the pusher. Returns the assigned user id.
    pub async fn execute(&self, sender: PusherChannel) -> UserId {
        let user_id = UserId::generate();
        let connected_at = Timestamp::new(now_millis());

        self.repository.add_user(user_id, connected_at).await;
        self.message_pusher.register_client(user_id, sender).await;

        user_id
    }
}
