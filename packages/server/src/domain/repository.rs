//! Session repository interface and its outcome types.
//!
//! One trait covers the connection registry, the room store, and the
//! embedded decision ledger, because `User.current_room` and
//! `Room.members` must change as a single transactional update. Each
//! method is one atomic unit: it validates, mutates, and computes every
//! snapshot the caller will fan out, all before returning.

use async_trait::async_trait;

use super::{
    DecisionText, DisplayName, ProblemStatement, RoomId, RoomTitle, SessionError, Timestamp,
    UserId,
};

/// One member in a room snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub user_id: UserId,
    pub username: String,
    pub is_admin: bool,
}

/// One decision in a snapshot or a `decisions_updated` fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEntry {
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub submitted_at: Timestamp,
}

/// One line of the room directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub title: String,
    pub participant_count: usize,
    pub admin_name: String,
    pub created_at: Timestamp,
}

/// Full, non-incremental rendering of one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub title: String,
    pub problem: String,
    pub admin_name: String,
    pub participants: Vec<ParticipantEntry>,
    pub decisions: Vec<DecisionEntry>,
    pub caller_is_admin: bool,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub user_id: UserId,
    pub username: String,
}

/// Result of a successful room creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    pub title: String,
    pub problem: String,
    /// Directory snapshot taken under the same lock as the creation,
    /// ready for the population-wide update.
    pub directory: Vec<RoomSummary>,
}

/// What a departure left behind in the departed room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aftermath {
    /// Non-admin left; the room lives on.
    Remaining {
        members: Vec<UserId>,
        participant_count: usize,
        decisions: Vec<DecisionEntry>,
    },
    /// The admin departed: the room is destroyed regardless of remaining
    /// membership, and `displaced` lists the members who were unbound.
    Closed {
        displaced: Vec<UserId>,
        directory: Vec<RoomSummary>,
    },
    /// Membership reached zero; the room is destroyed with nobody left
    /// to notify.
    Emptied { directory: Vec<RoomSummary> },
}

/// A departure that actually removed the user from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomExit {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub username: String,
    pub aftermath: Aftermath,
}

/// Outcome of leave/disconnect. Leaving is never rejected; a roomless
/// caller simply `Stayed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    Stayed,
    Left(RoomExit),
}

/// Outcome of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub snapshot: RoomSnapshot,
    pub username: String,
    pub participant_count: usize,
    /// Members to notify with `participant_joined` (empty for an
    /// idempotent re-join of the caller's current room).
    pub notify: Vec<UserId>,
    /// Cascade of the implicit leave of a previously occupied room.
    pub prior_exit: Option<RoomExit>,
}

/// Outcome of a successful decision submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub members: Vec<UserId>,
    pub decisions: Vec<DecisionEntry>,
}

/// The shared session state: connection registry + room store +
/// per-room decision ledgers. The domain owns this interface; the
/// infrastructure layer provides the in-memory implementation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Track a new connection as an unregistered user.
    async fn add_user(&self, user_id: UserId, connected_at: Timestamp);

    /// Bind a display name to a connection. A connection registers
    /// exactly once; a second attempt is an `InvalidState` error.
    async fn register(
        &self,
        user_id: UserId,
        name: DisplayName,
    ) -> Result<Registered, SessionError>;

    /// Disconnect: run the full leave cascade for any occupied room,
    /// then forget the user record. Idempotent.
    async fn remove_user(&self, user_id: UserId) -> Departure;

    /// Create a room with the caller as sole member and admin. Requires
    /// the caller to be registered and roomless.
    async fn create_room(
        &self,
        user_id: UserId,
        title: RoomTitle,
        problem: ProblemStatement,
        created_at: Timestamp,
    ) -> Result<CreatedRoom, SessionError>;

    /// Join a room, implicitly leaving a different current room first.
    async fn join_room(&self, user_id: UserId, room_id: RoomId)
    -> Result<JoinOutcome, SessionError>;

    /// Explicit leave. Never rejected.
    async fn leave_room(&self, user_id: UserId) -> Departure;

    /// Upsert the caller's decision in their current room.
    async fn submit_decision(
        &self,
        user_id: UserId,
        text: DecisionText,
        submitted_at: Timestamp,
    ) -> Result<SubmitOutcome, SessionError>;

    /// Directory of every active room.
    async fn list_rooms(&self) -> Vec<RoomSummary>;

    /// Full snapshot of one room. Membership is not required; read
    /// access needs nothing beyond a live connection.
    async fn room_info(
        &self,
        room_id: RoomId,
        caller: UserId,
    ) -> Result<RoomSnapshot, SessionError>;
}
