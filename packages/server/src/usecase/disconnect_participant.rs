//! UseCase: participant disconnection.

use std::sync::Arc;

use crate::domain::{Departure, MessagePusher, SessionRepository, UserId};

/// Tears a connection down: the user leaves their room (with the full
/// lifecycle cascade), their record is dropped, and their outbound
/// channel is removed from the pusher.
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, user_id: UserId) -> Departure {
        let departure = self.repository.remove_user(user_id).await;
        self.message_pusher.unregister_client(&user_id).await;
        departure
    }
}
