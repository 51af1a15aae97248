//! UseCase: room directory listing.

use std::sync::Arc;

use crate::domain::{RoomSummary, SessionRepository};

/// Returns the current room directory. Available to any connection,
/// registered or not, over both the WebSocket and the REST surface.
pub struct ListRoomsUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl ListRoomsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.repository.list_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, ProblemStatement, RoomTitle, Timestamp, UserId};
    use crate::infrastructure::repository::InMemorySessionRepository;

    #[tokio::test]
    async fn test_execute_lists_rooms_oldest_first() {
        // given: two rooms created at different times
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = ListRoomsUseCase::new(repository.clone());
        for (name, title, at) in [("alice", "Lunch", 2000), ("bob", "Dinner", 3000)] {
            let user_id = UserId::generate();
            repository.add_user(user_id, Timestamp::new(1000)).await;
            repository
                .register(user_id, DisplayName::new(name).unwrap())
                .await
                .unwrap();
            repository
                .create_room(
                    user_id,
                    RoomTitle::new(title).unwrap(),
                    ProblemStatement::new("Where?").unwrap(),
                    Timestamp::new(at),
                )
                .await
                .unwrap();
        }

        // when:
        let rooms = usecase.execute().await;

        // then:
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].title, "Lunch");
        assert_eq!(rooms[1].title, "Dinner");
    }

    #[tokio::test]
    async fn test_execute_on_empty_session_is_empty() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = ListRoomsUseCase::new(repository);

        // when / then:
        assert!(usecase.execute().await.is_empty());
    }
}
