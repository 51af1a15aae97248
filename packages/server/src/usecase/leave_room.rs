//! UseCase: leaving a room.

use std::sync::Arc;

use crate::domain::{Departure, MessagePusher, SessionRepository, UserId};

/// Removes the caller from their current room, cascading per the room
/// lifecycle rules. Its broadcast helpers also carry the fan-out for
/// exits produced by joins and disconnects.
pub struct LeaveRoomUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Leave the current room. Leaving while roomless is a no-op, not an
    /// error; the caller sees `Departure::Stayed`.
    pub async fn execute(&self, user_id: UserId) -> Departure {
        self.repository.leave_room(user_id).await
    }

    pub async fn broadcast_to(&self, targets: Vec<UserId>, message: &str) {
        self.message_pusher.broadcast(targets, message).await;
    }

    pub async fn broadcast_all(&self, message: &str) {
        self.message_pusher.broadcast_all(message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Aftermath, DisplayName, MockMessagePusher, ProblemStatement, RoomTitle, Timestamp,
    };
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

    #[tokio::test]
    async fn test_execute_without_a_room_stays() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = registered_user(&repository, "alice").await;

        // when:
        let departure = usecase.execute(alice).await;

        // then:
        assert_eq!(departure, Departure::Stayed);
    }

    #[tokio::test]
    async fn test_admin_leave_closes_the_room() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = registered_user(&repository, "alice").await;
        let bob = registered_user(&repository, "bob").await;
        let created = repository
            .create_room(
                alice,
                RoomTitle::new("Lunch").unwrap(),
                ProblemStatement::new("Where?").unwrap(),
                Timestamp::new(2000),
            )
            .await
            .unwrap();
        repository.join_room(bob, created.room_id).await.unwrap();

        // when: the admin leaves explicitly
        let departure = usecase.execute(alice).await;

        // then: closure, not survival
        let Departure::Left(exit) = departure else {
            panic!("alice was in the room");
        };
        match exit.aftermath {
            Aftermath::Closed {
                ref displaced,
                ref directory,
            } => {
                assert_eq!(displaced, &[bob]);
                assert!(directory.is_empty());
            }
            ref other => panic!("expected Closed, got {other:?}"),
        }
        assert!(repository.list_rooms().await.is_empty());
    }
}
