//! Application use cases.
//!
//! One struct per inbound operation. A use case validates raw input into
//! domain values, drives the repository, and returns an outcome the UI
//! layer renders into frames. Broadcasting goes through thin helpers so
//! the frame JSON is built in one place (the DTO layer) and the pusher
//! stays behind its trait.

pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod join_room;
pub mod leave_room;
pub mod list_rooms;
pub mod register_user;
pub mod room_info;
pub mod submit_decision;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use register_user::RegisterUserUseCase;
pub use room_info::RoomInfoUseCase;
pub use submit_decision::SubmitDecisionUseCase;
