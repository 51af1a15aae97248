//! Validated value objects for the decision-room domain.
//!
//! Constructors trim and validate their input once, at the boundary, so the
//! rest of the crate can treat the inner values as well-formed.

use std::fmt;

use uuid::Uuid;

use super::SessionError;

const MAX_DISPLAY_NAME_LENGTH: usize = 64;
const MAX_ROOM_TITLE_LENGTH: usize = 128;
const MAX_PROBLEM_LENGTH: usize = 2000;
const MAX_DECISION_LENGTH: usize = 2000;

/// Server-assigned identity of one connection/user. Never chosen by the
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| SessionError::Validation(format!("'{raw}' is not a valid user id")))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-assigned room identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(Uuid);

impl RoomId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| SessionError::Validation(format!("'{raw}' is not a valid room id")))
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user's display name. Assigned once at registration, immutable after.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Validation("Username is required".into()));
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(SessionError::Validation(format!(
                "Username must be at most {MAX_DISPLAY_NAME_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short human-readable title of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTitle(String);

impl RoomTitle {
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Validation(
                "Room title and problem are required".into(),
            ));
        }
        if trimmed.chars().count() > MAX_ROOM_TITLE_LENGTH {
            return Err(SessionError::Validation(format!(
                "Room title must be at most {MAX_ROOM_TITLE_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The decision problem a room is gathered around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemStatement(String);

impl ProblemStatement {
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Validation(
                "Room title and problem are required".into(),
            ));
        }
        if trimmed.chars().count() > MAX_PROBLEM_LENGTH {
            return Err(SessionError::Validation(format!(
                "Problem statement must be at most {MAX_PROBLEM_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One member's submitted decision text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionText(String);

impl DecisionText {
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Validation("Decision is required".into()));
        }
        if trimmed.chars().count() > MAX_DECISION_LENGTH {
            return Err(SessionError::Validation(format!(
                "Decision must be at most {MAX_DECISION_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_round_trips_through_display() {
        // given:
        let id = UserId::generate();

        // when:
        let parsed = UserId::parse(&id.to_string());

        // then:
        assert_eq!(parsed, Ok(id));
    }

    #[test]
    fn test_room_id_rejects_garbage() {
        // when:
        let result = RoomId::parse("not-a-uuid");

        // then:
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[test]
    fn test_display_name_trims_whitespace() {
        // when:
        let name = DisplayName::new("  alice  ").unwrap();

        // then:
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_display_name_rejects_empty_and_whitespace() {
        // when / then:
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
    }

    #[test]
    fn test_display_name_rejects_over_cap() {
        // given:
        let long = "x".repeat(MAX_DISPLAY_NAME_LENGTH + 1);

        // when / then:
        assert!(DisplayName::new(&long).is_err());
        assert!(DisplayName::new(&long[..MAX_DISPLAY_NAME_LENGTH]).is_ok());
    }

    #[test]
    fn test_room_title_and_problem_reject_empty() {
        // when / then:
        assert!(RoomTitle::new(" ").is_err());
        assert!(ProblemStatement::new("").is_err());
        assert!(RoomTitle::new("Lunch").is_ok());
        assert!(ProblemStatement::new("Where should we eat?").is_ok());
    }

    #[test]
    fn test_decision_text_validation() {
        // when / then:
        assert!(DecisionText::new("   ").is_err());
        assert_eq!(DecisionText::new(" Pizza ").unwrap().as_str(), "Pizza");
        assert!(DecisionText::new(&"x".repeat(MAX_DECISION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_timestamp_carries_value() {
        // given:
        let ts = Timestamp::new(1_672_531_200_000);

        // then:
        assert_eq!(ts.value(), 1_672_531_200_000);
    }
}
