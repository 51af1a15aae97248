//! WebSocket connection handlers.
//!
//! One task pair per connection: `pusher_loop` drains the outbound
//! channel onto the socket while the receive loop routes inbound frames
//! through the use cases. When either side ends, the other is aborted
//! and the disconnect cascade runs.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{Aftermath, RoomExit, RoomSnapshot, SessionError, UserId},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage, decode},
    ui::state::AppState,
};

const GREETING: &str = "Connected to Quorum decision platform";
const ROOM_CLOSED_NOTICE: &str = "Room admin has left,room is being closed";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns the task that drains the outbound channel onto the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Admit the connection; the id is server-assigned. Registering the
    // channel and greeting it happen as one unit so the connected frame
    // is always first in the queue, ahead of any concurrent broadcast.
    let user_id = {
        let _serial = state.dispatch_lock.lock().await;
        let user_id = state.connect_participant_usecase.execute(tx).await;
        reply(
            &state,
            user_id,
            &ServerMessage::Connected {
                user_id: user_id.to_string(),
                message: GREETING.to_string(),
            },
        )
        .await;
        user_id
    };
    tracing::info!("New connection: {}", user_id);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error for {}: {}", user_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    route_frame(&state_clone, user_id, &text).await;
                }
                Message::Close(_) => {
                    tracing::info!("Client {} requested close", user_id);
                    break;
                }
                // Ping/pong is handled by the protocol layer.
                _ => {}
            }
        }
    });

    // If either task completes, abort the other.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, user_id).await;
}

/// Decode one inbound frame and dispatch it. Public so in-process tests
/// can drive a connection without a socket.
pub async fn route_frame(state: &Arc<AppState>, user_id: UserId, text: &str) {
    // One inbound event at a time: the session mutation and every frame
    // it enqueues form a single indivisible unit, so members never see a
    // newer snapshot before an older one.
    let _serial = state.dispatch_lock.lock().await;

    let message = match decode(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Undecodable frame from {}: {}", user_id, e.message());
            reply(state, user_id, &ServerMessage::error(e.code(), e.message())).await;
            return;
        }
    };

    match message {
        ClientMessage::Register { username } => {
            handle_register(state, user_id, &username).await;
        }
        ClientMessage::CreateRoom { title, problem } => {
            handle_create_room(state, user_id, &title, &problem).await;
        }
        ClientMessage::JoinRoom { room_id } => {
            handle_join_room(state, user_id, &room_id).await;
        }
        ClientMessage::LeaveRoom => {
            handle_leave_room(state, user_id).await;
        }
        ClientMessage::SubmitDecision { decision } => {
            handle_submit_decision(state, user_id, &decision).await;
        }
        ClientMessage::ListRooms => {
            handle_list_rooms(state, user_id).await;
        }
        ClientMessage::RoomInfo { room_id } => {
            handle_room_info(state, user_id, &room_id).await;
        }
    }
}

/// Run the disconnect cascade for a closed connection. Public for the
/// same reason as [`route_frame`].
pub async fn handle_disconnect(state: &Arc<AppState>, user_id: UserId) {
    let _serial = state.dispatch_lock.lock().await;

    let departure = state.disconnect_participant_usecase.execute(user_id).await;
    tracing::info!("User disconnected: {}", user_id);

    if let crate::domain::Departure::Left(exit) = departure {
        publish_exit(state, &exit).await;
    }
}

async fn handle_register(state: &Arc<AppState>, user_id: UserId, username: &str) {
    match state.register_user_usecase.execute(user_id, username).await {
        Ok(registered) => {
            tracing::info!("User {} registered as '{}'", user_id, registered.username);
            reply(
                state,
                user_id,
                &ServerMessage::Registered {
                    user_id: registered.user_id.to_string(),
                    username: registered.username,
                },
            )
            .await;
        }
        Err(e) => report(state, user_id, &e).await,
    }
}

async fn handle_create_room(state: &Arc<AppState>, user_id: UserId, title: &str, problem: &str) {
    match state
        .create_room_usecase
        .execute(user_id, title, problem)
        .await
    {
        Ok(created) => {
            tracing::info!("Room {} created by {}", created.room_id, user_id);
            reply(
                state,
                user_id,
                &ServerMessage::RoomCreated {
                    room_id: created.room_id.to_string(),
                    title: created.title,
                    problem: created.problem,
                },
            )
            .await;

            let updated = ServerMessage::RoomListUpdated {
                rooms: created.directory.into_iter().map(Into::into).collect(),
            };
            state
                .create_room_usecase
                .broadcast_room_list(&updated.to_json())
                .await;
        }
        Err(e) => report(state, user_id, &e).await,
    }
}

async fn handle_join_room(state: &Arc<AppState>, user_id: UserId, room_id: &str) {
    match state.join_room_usecase.execute(user_id, room_id).await {
        Ok(outcome) => {
            // The implicit leave is announced before the join, in the
            // same order an explicit leave-then-join would produce.
            if let Some(exit) = &outcome.prior_exit {
                reply(state, user_id, &ServerMessage::RoomLeft).await;
                publish_exit(state, exit).await;
            }

            reply(
                state,
                user_id,
                &ServerMessage::RoomJoined {
                    room_id: outcome.snapshot.room_id.to_string(),
                    title: outcome.snapshot.title.clone(),
                    problem: outcome.snapshot.problem.clone(),
                    is_admin: outcome.snapshot.caller_is_admin,
                    participants: outcome
                        .snapshot
                        .participants
                        .iter()
                        .cloned()
                        .map(Into::into)
                        .collect(),
                    decisions: outcome
                        .snapshot
                        .decisions
                        .iter()
                        .cloned()
                        .map(Into::into)
                        .collect(),
                },
            )
            .await;

            if !outcome.notify.is_empty() {
                let joined = ServerMessage::ParticipantJoined {
                    user_id: user_id.to_string(),
                    username: outcome.username.clone(),
                    participant_count: outcome.participant_count,
                };
                state
                    .join_room_usecase
                    .broadcast_joined(outcome.notify.clone(), &joined.to_json())
                    .await;
            }
        }
        Err(e) => report(state, user_id, &e).await,
    }
}

async fn handle_leave_room(state: &Arc<AppState>, user_id: UserId) {
    match state.leave_room_usecase.execute(user_id).await {
        crate::domain::Departure::Stayed => {
            tracing::debug!("User {} left nothing", user_id);
        }
        crate::domain::Departure::Left(exit) => {
            reply(state, user_id, &ServerMessage::RoomLeft).await;
            publish_exit(state, &exit).await;
        }
    }
}

async fn handle_submit_decision(state: &Arc<AppState>, user_id: UserId, decision: &str) {
    match state
        .submit_decision_usecase
        .execute(user_id, decision)
        .await
    {
        Ok(outcome) => {
            reply(state, user_id, &ServerMessage::DecisionSubmitted).await;

            let updated = ServerMessage::DecisionsUpdated {
                decisions: outcome.decisions.into_iter().map(Into::into).collect(),
            };
            state
                .submit_decision_usecase
                .broadcast_decisions(outcome.members, &updated.to_json())
                .await;
        }
        Err(e) => report(state, user_id, &e).await,
    }
}

async fn handle_list_rooms(state: &Arc<AppState>, user_id: UserId) {
    let rooms = state.list_rooms_usecase.execute().await;
    reply(
        state,
        user_id,
        &ServerMessage::RoomList {
            rooms: rooms.into_iter().map(Into::into).collect(),
        },
    )
    .await;
}

async fn handle_room_info(state: &Arc<AppState>, user_id: UserId, room_id: &str) {
    match state.room_info_usecase.execute(user_id, room_id).await {
        Ok(snapshot) => reply(state, user_id, &room_info_frame(snapshot)).await,
        Err(e) => report(state, user_id, &e).await,
    }
}

fn room_info_frame(snapshot: RoomSnapshot) -> ServerMessage {
    ServerMessage::RoomInfo {
        room_id: snapshot.room_id.to_string(),
        title: snapshot.title,
        problem: snapshot.problem,
        admin: snapshot.admin_name,
        participants: snapshot.participants.into_iter().map(Into::into).collect(),
        decisions: snapshot.decisions.into_iter().map(Into::into).collect(),
        is_admin: snapshot.caller_is_admin,
    }
}

/// Fan out the lifecycle consequences of one member leaving a room.
async fn publish_exit(state: &Arc<AppState>, exit: &RoomExit) {
    match &exit.aftermath {
        Aftermath::Remaining {
            members,
            participant_count,
            decisions,
        } => {
            let left = ServerMessage::ParticipantLeft {
                user_id: exit.user_id.to_string(),
                username: exit.username.clone(),
                participant_count: *participant_count,
            };
            state
                .leave_room_usecase
                .broadcast_to(members.clone(), &left.to_json())
                .await;

            // The departed member's decision is gone with them.
            let updated = ServerMessage::DecisionsUpdated {
                decisions: decisions.iter().cloned().map(Into::into).collect(),
            };
            state
                .leave_room_usecase
                .broadcast_to(members.clone(), &updated.to_json())
                .await;
        }
        Aftermath::Closed {
            displaced,
            directory,
        } => {
            tracing::info!("Room {} closed by admin departure", exit.room_id);
            let closed = ServerMessage::RoomClosed {
                message: ROOM_CLOSED_NOTICE.to_string(),
            };
            state
                .leave_room_usecase
                .broadcast_to(displaced.clone(), &closed.to_json())
                .await;

            let updated = ServerMessage::RoomListUpdated {
                rooms: directory.iter().cloned().map(Into::into).collect(),
            };
            state.leave_room_usecase.broadcast_all(&updated.to_json()).await;
        }
        Aftermath::Emptied { directory } => {
            tracing::info!("Room {} emptied and removed", exit.room_id);
            let updated = ServerMessage::RoomListUpdated {
                rooms: directory.iter().cloned().map(Into::into).collect(),
            };
            state.leave_room_usecase.broadcast_all(&updated.to_json()).await;
        }
    }
}

/// Direct replies ride the same pusher as broadcasts, so a connection's
/// acknowledgements and the fan-out they trigger share one queue.
async fn reply(state: &Arc<AppState>, user_id: UserId, message: &ServerMessage) {
    if let Err(e) = state
        .message_pusher
        .push_to(&user_id, &message.to_json())
        .await
    {
        tracing::warn!("Frame to {} dropped: {}", user_id, e);
    }
}

async fn report(state: &Arc<AppState>, user_id: UserId, error: &SessionError) {
    reply(
        state,
        user_id,
        &ServerMessage::error(error.code(), &error.to_string()),
    )
    .await;
}
