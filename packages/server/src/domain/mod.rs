//! Domain layer: value objects, entities, errors, and the interfaces
//! that the infrastructure layer implements (dependency inversion).

mod entity;
mod error;
mod pusher;
mod repository;
mod value_object;

pub use entity::{Decision, Room, User};
pub use error::SessionError;
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{
    Aftermath, CreatedRoom, DecisionEntry, Departure, JoinOutcome, ParticipantEntry, Registered,
    RoomExit, RoomSnapshot, RoomSummary, SessionRepository, SubmitOutcome,
};
pub use value_object::{
    DecisionText, DisplayName, ProblemStatement, RoomId, RoomTitle, Timestamp, UserId,
};
