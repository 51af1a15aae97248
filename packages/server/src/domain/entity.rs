//! Domain entities: users, rooms, and decisions.

use std::collections::{HashMap, HashSet};

use super::{
    DecisionText, DisplayName, ProblemStatement, RoomId, RoomTitle, SessionError, Timestamp,
    UserId,
};

/// One connected participant.
///
/// A user record exists for exactly as long as the underlying connection
/// is open. It starts unregistered (no display name) and may occupy at
/// most one room at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// `None` until the connection registers; immutable once set.
    pub name: Option<DisplayName>,
    pub current_room: Option<RoomId>,
    pub connected_at: Timestamp,
}

impl User {
    pub fn new(id: UserId, connected_at: Timestamp) -> Self {
        Self {
            id,
            name: None,
            current_room: None,
            connected_at,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.name.is_some()
    }
}

/// One member's submitted decision for a room.
///
/// The author's display name is denormalized at submission time; names
/// are immutable after registration, so it can never go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub author: UserId,
    pub author_name: DisplayName,
    pub text: DecisionText,
    pub submitted_at: Timestamp,
}

/// A shared decision context.
///
/// The admin is the creator, is always a member, and never changes for
/// the room's lifetime; admin departure destroys the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub title: RoomTitle,
    pub problem: ProblemStatement,
    pub admin: UserId,
    members: HashSet<UserId>,
    decisions: HashMap<UserId, Decision>,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a room with `admin` as its sole member.
    pub fn new(
        id: RoomId,
        title: RoomTitle,
        problem: ProblemStatement,
        admin: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            problem,
            admin,
            members: HashSet::from([admin]),
            decisions: HashMap::new(),
            created_at,
        }
    }

    pub fn is_admin(&self, user_id: &UserId) -> bool {
        self.admin == *user_id
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Add a member. Returns `false` if they were already a member.
    pub fn add_member(&mut self, user_id: UserId) -> bool {
        self.members.insert(user_id)
    }

    /// Remove a member together with their decision, if any.
    /// Returns `false` if they were not a member.
    pub fn remove_member(&mut self, user_id: &UserId) -> bool {
        self.decisions.remove(user_id);
        self.members.remove(user_id)
    }

    /// Upsert a member's decision. A resubmission replaces the previous
    /// text and timestamp.
    pub fn record_decision(&mut self, decision: Decision) -> Result<(), SessionError> {
        if !self.is_member(&decision.author) {
            return Err(SessionError::InvalidState("Not in room".into()));
        }
        self.decisions.insert(decision.author, decision);
        Ok(())
    }

    pub fn member_ids(&self) -> Vec<UserId> {
        self.members.iter().copied().collect()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The room's decisions, oldest submission first.
    pub fn decision_list(&self) -> Vec<&Decision> {
        let mut decisions: Vec<&Decision> = self.decisions.values().collect();
        decisions.sort_by_key(|d| (d.submitted_at, d.author));
        decisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room(admin: UserId) -> Room {
        Room::new(
            RoomId::generate(),
            RoomTitle::new("Lunch").unwrap(),
            ProblemStatement::new("Where should we eat?").unwrap(),
            admin,
            Timestamp::new(1000),
        )
    }

    fn decision(author: UserId, text: &str, at: i64) -> Decision {
        Decision {
            author,
            author_name: DisplayName::new("someone").unwrap(),
            text: DecisionText::new(text).unwrap(),
            submitted_at: Timestamp::new(at),
        }
    }

    #[test]
    fn test_new_room_has_admin_as_sole_member() {
        // given:
        let admin = UserId::generate();

        // when:
        let room = test_room(admin);

        // then:
        assert_eq!(room.member_count(), 1);
        assert!(room.is_member(&admin));
        assert!(room.is_admin(&admin));
    }

    #[test]
    fn test_add_member_is_idempotent() {
        // given:
        let admin = UserId::generate();
        let mut room = test_room(admin);
        let bob = UserId::generate();

        // when:
        assert!(room.add_member(bob));
        let second = room.add_member(bob);

        // then:
        assert!(!second);
        assert_eq!(room.member_count(), 2);
    }

    #[test]
    fn test_remove_member_discards_their_decision() {
        // given:
        let admin = UserId::generate();
        let mut room = test_room(admin);
        let bob = UserId::generate();
        room.add_member(bob);
        room.record_decision(decision(bob, "Pizza", 2000)).unwrap();

        // when:
        let removed = room.remove_member(&bob);

        // then:
        assert!(removed);
        assert!(!room.is_member(&bob));
        assert!(room.decision_list().is_empty());
    }

    #[test]
    fn test_record_decision_rejects_non_members() {
        // given:
        let admin = UserId::generate();
        let mut room = test_room(admin);
        let stranger = UserId::generate();

        // when:
        let result = room.record_decision(decision(stranger, "Pizza", 2000));

        // then:
        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[test]
    fn test_resubmission_replaces_the_previous_decision() {
        // given:
        let admin = UserId::generate();
        let mut room = test_room(admin);
        room.record_decision(decision(admin, "Pizza", 2000)).unwrap();

        // when:
        room.record_decision(decision(admin, "Sushi", 3000)).unwrap();

        // then: exactly one entry, with the latest text and timestamp
        let decisions = room.decision_list();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].text.as_str(), "Sushi");
        assert_eq!(decisions[0].submitted_at.value(), 3000);
    }

    #[test]
    fn test_decision_list_is_ordered_by_submission_time() {
        // given:
        let admin = UserId::generate();
        let mut room = test_room(admin);
        let bob = UserId::generate();
        room.add_member(bob);
        room.record_decision(decision(bob, "Sushi", 3000)).unwrap();
        room.record_decision(decision(admin, "Pizza", 2000)).unwrap();

        // when:
        let decisions = room.decision_list();

        // then:
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].text.as_str(), "Pizza");
        assert_eq!(decisions[1].text.as_str(), "Sushi");
    }

    #[test]
    fn test_fresh_user_is_unregistered_and_roomless() {
        // when:
        let user = User::new(UserId::generate(), Timestamp::new(1000));

        // then:
        assert!(!user.is_registered());
        assert!(user.current_room.is_none());
    }
}
