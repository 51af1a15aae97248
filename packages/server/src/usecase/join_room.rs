//! UseCase: joining a room.

use std::sync::Arc;

use crate::domain::{
    JoinOutcome, MessagePusher, RoomId, SessionError, SessionRepository, UserId,
};

/// Moves the caller into a room, implicitly leaving their current one.
pub struct JoinRoomUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Join the room identified by `raw_room_id`.
    ///
    /// An unparseable id is indistinguishable from an absent room; both
    /// come back as not-found so the wire never leaks the id format.
    pub async fn execute(
        &self,
        user_id: UserId,
        raw_room_id: &str,
    ) -> Result<JoinOutcome, SessionError> {
        let room_id = RoomId::parse(raw_room_id)
            .map_err(|_| SessionError::NotFound("Room not found".into()))?;
        self.repository.join_room(user_id, room_id).await
    }

    pub async fn broadcast_joined(&self, targets: Vec<UserId>, message: &str) {
        self.message_pusher.broadcast(targets, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Aftermath, DisplayName, MockMessagePusher, Timestamp};
    use crate::infrastructure::repository::InMemorySessionRepository;

    async fn registered_user(repository: &InMemorySessionRepository, name: &str) -> UserId {
        let user_id = UserId::generate();
        repository.add_user(user_id, Timestamp::new(1000)).await;
        repository
            .register(user_id, DisplayName::new(name).unwrap())
            .await
            .unwrap();
        user_id
    }

    async fn create_room(repository: &InMemorySessionRepository, admin: UserId) -> RoomId {
        repository
            .create_room(
                admin,
                crate::domain::RoomTitle::new("Lunch").unwrap(),
                crate::domain::ProblemStatement::new("Where?").unwrap(),
                Timestamp::new(2000),
            )
            .await
            .unwrap()
            .room_id
    }

    #[tokio::test]
    async fn test_execute_joins_and_reports_the_room() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = registered_user(&repository, "alice").await;
        let bob = registered_user(&repository, "bob").await;
        let room_id = create_room(&repository, alice).await;

        // when:
        let outcome = usecase.execute(bob, &room_id.to_string()).await.unwrap();

        // then:
        assert_eq!(outcome.snapshot.room_id, room_id);
        assert_eq!(outcome.participant_count, 2);
        assert_eq!(outcome.username, "bob");
        assert!(outcome.prior_exit.is_none());
    }

    #[tokio::test]
    async fn test_execute_maps_unparseable_id_to_not_found() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = registered_user(&repository, "alice").await;

        // when:
        let result = usecase.execute(alice, "definitely-not-a-uuid").await;

        // then:
        let error = result.unwrap_err();
        assert_eq!(error.code(), "not_found");
        assert_eq!(error.to_string(), "Room not found");
    }

    #[tokio::test]
    async fn test_execute_surfaces_the_implicit_leave() {
        // given: bob already sits in another room
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = registered_user(&repository, "alice").await;
        let carol = registered_user(&repository, "carol").await;
        let bob = registered_user(&repository, "bob").await;
        let first = create_room(&repository, alice).await;
        let second = create_room(&repository, carol).await;
        usecase.execute(bob, &first.to_string()).await.unwrap();

        // when:
        let outcome = usecase.execute(bob, &second.to_string()).await.unwrap();

        // then:
        let exit = outcome.prior_exit.expect("must leave the first room");
        assert_eq!(exit.room_id, first);
        assert!(matches!(exit.aftermath, Aftermath::Remaining { .. }));
    }
}
