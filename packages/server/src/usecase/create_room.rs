//! UseCase: room creation.

use std::sync::Arc;

use quorum_shared::time::now_millis;

use crate::domain::{
    CreatedRoom, MessagePusher, ProblemStatement, RoomTitle, SessionError, SessionRepository,
    Timestamp, UserId,
};

/// Opens a new room with the caller as admin and sole member.
pub struct CreateRoomUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Validate the title and problem, then create the room. The returned
    /// outcome carries the refreshed directory for the room-list broadcast.
    pub async fn execute(
        &self,
        user_id: UserId,
        raw_title: &str,
        raw_problem: &str,
    ) -> Result<CreatedRoom, SessionError> {
        let title = RoomTitle::new(raw_title)?;
        let problem = ProblemStatement::new(raw_problem)?;
        let created_at = Timestamp::new(now_millis());

        self.repository
            .create_room(user_id, title, problem, created_at)
            .await
    }

    /// Fan the refreshed room directory out to every connected client.
    pub async fn broadcast_room_list(&self, message: &str) {
        self.message_pusher.broadcast_all(message).await;
    }
}
