//! UseCase: room detail lookup.

use std::sync::Arc;

use crate::domain::{RoomId, RoomSnapshot, SessionError, SessionRepository, UserId};

/// Returns the full snapshot of one room: participants, decisions, and
/// whether the caller is its admin. Membership is not required to look.
pub struct RoomInfoUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl RoomInfoUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        caller: UserId,
        raw_room_id: &str,
    ) -> Result<RoomSnapshot, SessionError> {
        let room_id = RoomId::parse(raw_room_id)
            .map_err(|_| SessionError::NotFound("Room not found".into()))?;
        self.repository.room_info(room_id, caller).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, ProblemStatement, RoomTitle, Timestamp};
    use crate::infrastructure::repository::InMemorySessionRepository;

    #[tokio::test]
    async fn test_execute_returns_the_snapshot() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = RoomInfoUseCase::new(repository.clone());
        let alice = UserId::generate();
        repository.add_user(alice, Timestamp::new(1000)).await;
        repository
            .register(alice, DisplayName::new("alice").unwrap())
            .await
            .unwrap();
        let created = repository
            .create_room(
                alice,
                RoomTitle::new("Lunch").unwrap(),
                ProblemStatement::new("Where should we eat?").unwrap(),
                Timestamp::new(2000),
            )
            .await
            .unwrap();

        // when: an unregistered onlooker asks
        let onlooker = UserId::generate();
        repository.add_user(onlooker, Timestamp::new(1500)).await;
        let snapshot = usecase
            .execute(onlooker, &created.room_id.to_string())
            .await
            .unwrap();

        // then:
        assert_eq!(snapshot.title, "Lunch");
        assert_eq!(snapshot.problem, "Where should we eat?");
        assert_eq!(snapshot.admin_name, "alice");
        assert!(!snapshot.caller_is_admin);
        assert_eq!(snapshot.participants.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_unknown_room_is_not_found() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = RoomInfoUseCase::new(repository);
        let caller = UserId::generate();

        // when / then: bad uuid and absent room both read as not found
        let garbled = usecase.execute(caller, "nope").await.unwrap_err();
        assert_eq!(garbled.code(), "not_found");
        let absent = usecase
            .execute(caller, &RoomId::generate().to_string())
            .await
            .unwrap_err();
        assert_eq!(absent.code(), "not_found");
    }
}
