//! Conversion logic between domain outcome types and DTOs.

use quorum_shared::time::millis_to_rfc3339;

use crate::domain::{DecisionEntry, ParticipantEntry, RoomSummary};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain outcome → DTO
// ========================================

impl From<ParticipantEntry> for dto::ParticipantDto {
    fn from(entry: ParticipantEntry) -> Self {
        Self {
            id: entry.user_id.to_string(),
            username: entry.username,
            is_admin: entry.is_admin,
        }
    }
}

impl From<DecisionEntry> for dto::DecisionDto {
    fn from(entry: DecisionEntry) -> Self {
        Self {
            user_id: entry.user_id.to_string(),
            username: entry.username,
            text: entry.text,
            timestamp: entry.submitted_at.value(),
        }
    }
}

impl From<RoomSummary> for dto::RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.room_id.to_string(),
            title: summary.title,
            participant_count: summary.participant_count,
            admin: summary.admin_name,
        }
    }
}

impl From<RoomSummary> for http::RoomDirectoryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.room_id.to_string(),
            title: summary.title,
            participant_count: summary.participant_count,
            admin: summary.admin_name,
            created_at: millis_to_rfc3339(summary.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomId, Timestamp, UserId};

    #[test]
    fn test_participant_entry_to_dto() {
        // given:
        let user_id = UserId::generate();
        let entry = ParticipantEntry {
            user_id,
            username: "alice".to_string(),
            is_admin: true,
        };

        // when:
        let dto: dto::ParticipantDto = entry.into();

        // then:
        assert_eq!(dto.id, user_id.to_string());
        assert_eq!(dto.username, "alice");
        assert!(dto.is_admin);
    }

    #[test]
    fn test_decision_entry_to_dto() {
        // given:
        let user_id = UserId::generate();
        let entry = DecisionEntry {
            user_id,
            username: "bob".to_string(),
            text: "Pizza".to_string(),
            submitted_at: Timestamp::new(1700000000000),
        };

        // when:
        let dto: dto::DecisionDto = entry.into();

        // then:
        assert_eq!(dto.user_id, user_id.to_string());
        assert_eq!(dto.username, "bob");
        assert_eq!(dto.text, "Pizza");
        assert_eq!(dto.timestamp, 1700000000000);
    }

    #[test]
    fn test_room_summary_to_websocket_dto() {
        // given:
        let room_id = RoomId::generate();
        let summary = RoomSummary {
            room_id,
            title: "Lunch".to_string(),
            participant_count: 3,
            admin_name: "alice".to_string(),
            created_at: Timestamp::new(1700000000000),
        };

        // when:
        let dto: dto::RoomSummaryDto = summary.into();

        // then:
        assert_eq!(dto.id, room_id.to_string());
        assert_eq!(dto.title, "Lunch");
        assert_eq!(dto.participant_count, 3);
        assert_eq!(dto.admin, "alice");
    }

    #[test]
    fn test_room_summary_to_directory_dto_renders_rfc3339() {
        // given:
        let summary = RoomSummary {
            room_id: RoomId::generate(),
            title: "Lunch".to_string(),
            participant_count: 1,
            admin_name: "alice".to_string(),
            created_at: Timestamp::new(0),
        };

        // when:
        let dto: http::RoomDirectoryDto = summary.into();

        // then:
        assert_eq!(dto.created_at, "1970-01-01T00:00:00+00:00");
    }
}
