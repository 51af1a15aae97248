//! Server state and connection management.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{MessagePusher, SessionRepository};
use crate::usecase::{
    ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, ListRoomsUseCase, RegisterUserUseCase, RoomInfoUseCase,
    SubmitDecisionUseCase,
};

/// Shared application state: one use case per inbound operation, all
/// wired to the same repository and pusher.
pub struct AppState {
    /// Held across one inbound event's state change and the frames it
    /// enqueues, so outbound frames always carry snapshots in mutation
    /// order.
    pub dispatch_lock: Mutex<()>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub submit_decision_usecase: Arc<SubmitDecisionUseCase>,
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    pub room_info_usecase: Arc<RoomInfoUseCase>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            dispatch_lock: Mutex::new(()),
            message_pusher: message_pusher.clone(),
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            register_user_usecase: Arc::new(RegisterUserUseCase::new(repository.clone())),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            submit_decision_usecase: Arc::new(SubmitDecisionUseCase::new(
                repository.clone(),
                message_pusher,
            )),
            list_rooms_usecase: Arc::new(ListRoomsUseCase::new(repository.clone())),
            room_info_usecase: Arc::new(RoomInfoUseCase::new(repository)),
        }
    }
}
