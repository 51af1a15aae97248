//! In-memory session repository.
//!
//! `SessionState` is the synchronous lifecycle state machine: users map
//! plus rooms map, mutated together so the two can never drift.
//! `InMemorySessionRepository` wraps it in a single `tokio::sync::Mutex`;
//! every trait method takes the lock exactly once, so one inbound
//! message's validation, mutation, and snapshot computation form one
//! indivisible unit against every concurrent message and disconnect.
//! Nothing under the lock performs I/O.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Aftermath, CreatedRoom, Decision, DecisionEntry, DecisionText, Departure, DisplayName,
    JoinOutcome, ParticipantEntry, ProblemStatement, Registered, Room, RoomExit, RoomId,
    RoomSnapshot, RoomSummary, RoomTitle, SessionError, SessionRepository, SubmitOutcome,
    Timestamp, User, UserId,
};

/// Fallback for ids that no longer resolve to a registered user; only
/// reachable through departure races that the snapshots tolerate.
const UNKNOWN_USER: &str = "Unknown";

fn username_of(users: &HashMap<UserId, User>, user_id: &UserId) -> String {
    users
        .get(user_id)
        .and_then(|user| user.name.as_ref())
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

fn decision_entries(room: &Room) -> Vec<DecisionEntry> {
    room.decision_list()
        .into_iter()
        .map(|decision| DecisionEntry {
            user_id: decision.author,
            username: decision.author_name.as_str().to_string(),
            text: decision.text.as_str().to_string(),
            submitted_at: decision.submitted_at,
        })
        .collect()
}

/// What to do with the departed room once the member is out.
enum Fate {
    Close,
    Drop,
    Keep {
        members: Vec<UserId>,
        participant_count: usize,
        decisions: Vec<DecisionEntry>,
    },
}

#[derive(Debug, Default)]
struct SessionState {
    users: HashMap<UserId, User>,
    rooms: HashMap<RoomId, Room>,
}

impl SessionState {
    fn add_user(&mut self, user_id: UserId, connected_at: Timestamp) {
        self.users.insert(user_id, User::new(user_id, connected_at));
    }

    fn register(&mut self, user_id: UserId, name: DisplayName) -> Result<Registered, SessionError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| SessionError::InvalidState("User not registered".into()))?;
        if user.is_registered() {
            return Err(SessionError::InvalidState("Already registered".into()));
        }
        let username = name.as_str().to_string();
        user.name = Some(name);
        Ok(Registered { user_id, username })
    }

    fn require_registered(&self, user_id: &UserId) -> Result<&User, SessionError> {
        self.users
            .get(user_id)
            .filter(|user| user.is_registered())
            .ok_or_else(|| SessionError::InvalidState("User not registered".into()))
    }

    fn create_room(
        &mut self,
        user_id: UserId,
        title: RoomTitle,
        problem: ProblemStatement,
        created_at: Timestamp,
    ) -> Result<CreatedRoom, SessionError> {
        let user = self.require_registered(&user_id)?;
        if user.current_room.is_some() {
            return Err(SessionError::InvalidState("Already in a room".into()));
        }

        let room_id = RoomId::generate();
        let room = Room::new(room_id, title, problem, user_id, created_at);
        let title = room.title.as_str().to_string();
        let problem = room.problem.as_str().to_string();
        self.rooms.insert(room_id, room);
        if let Some(user) = self.users.get_mut(&user_id) {
            user.current_room = Some(room_id);
        }

        Ok(CreatedRoom {
            room_id,
            title,
            problem,
            directory: self.directory(),
        })
    }

    fn join_room(&mut self, user_id: UserId, room_id: RoomId) -> Result<JoinOutcome, SessionError> {
        let user = self.require_registered(&user_id)?;
        let current = user.current_room;

        // The target must exist before any implicit leave runs, so a bad
        // join can never tear the caller out of their current room.
        if !self.rooms.contains_key(&room_id) {
            return Err(SessionError::NotFound("Room not found".into()));
        }

        let username = username_of(&self.users, &user_id);

        if current == Some(room_id) {
            // Re-joining the current room is an idempotent snapshot
            // refresh; running the leave cascade here would let an admin
            // destroy their own room by re-joining it.
            let snapshot = self.snapshot_of(room_id, user_id)?;
            let participant_count = snapshot.participants.len();
            return Ok(JoinOutcome {
                snapshot,
                username,
                participant_count,
                notify: Vec::new(),
                prior_exit: None,
            });
        }

        let prior_exit = match self.depart(user_id) {
            Departure::Left(exit) => Some(exit),
            Departure::Stayed => None,
        };

        // The implicit leave only touches the caller's old room, which is
        // a different one, so the target is still there.
        let (notify, participant_count) = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                room.add_member(user_id);
                (room.member_ids(), room.member_count())
            }
            None => return Err(SessionError::NotFound("Room not found".into())),
        };
        if let Some(user) = self.users.get_mut(&user_id) {
            user.current_room = Some(room_id);
        }

        let snapshot = self.snapshot_of(room_id, user_id)?;
        Ok(JoinOutcome {
            snapshot,
            username,
            participant_count,
            notify,
            prior_exit,
        })
    }

    /// The one leave cascade. Explicit leave, disconnect, and the
    /// implicit leave inside join all come through here.
    fn depart(&mut self, user_id: UserId) -> Departure {
        let Some(room_id) = self.users.get(&user_id).and_then(|user| user.current_room) else {
            return Departure::Stayed;
        };
        let username = username_of(&self.users, &user_id);
        if let Some(user) = self.users.get_mut(&user_id) {
            user.current_room = None;
        }

        let fate = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                room.remove_member(&user_id);
                if room.is_admin(&user_id) {
                    // Admin departure always closes the room, even with
                    // members remaining.
                    Fate::Close
                } else if room.is_empty() {
                    Fate::Drop
                } else {
                    Fate::Keep {
                        members: room.member_ids(),
                        participant_count: room.member_count(),
                        decisions: decision_entries(room),
                    }
                }
            }
            None => return Departure::Stayed,
        };

        let aftermath = match fate {
            Fate::Close => {
                let displaced = match self.rooms.remove(&room_id) {
                    Some(room) => room.member_ids(),
                    None => Vec::new(),
                };
                for member in &displaced {
                    if let Some(user) = self.users.get_mut(member) {
                        user.current_room = None;
                    }
                }
                Aftermath::Closed {
                    displaced,
                    directory: self.directory(),
                }
            }
            Fate::Drop => {
                self.rooms.remove(&room_id);
                Aftermath::Emptied {
                    directory: self.directory(),
                }
            }
            Fate::Keep {
                members,
                participant_count,
                decisions,
            } => Aftermath::Remaining {
                members,
                participant_count,
                decisions,
            },
        };

        Departure::Left(RoomExit {
            room_id,
            user_id,
            username,
            aftermath,
        })
    }

    fn remove_user(&mut self, user_id: UserId) -> Departure {
        let departure = self.depart(user_id);
        self.users.remove(&user_id);
        departure
    }

    fn submit_decision(
        &mut self,
        user_id: UserId,
        text: DecisionText,
        submitted_at: Timestamp,
    ) -> Result<SubmitOutcome, SessionError> {
        let user = self.require_registered(&user_id)?;
        let Some(author_name) = user.name.clone() else {
            return Err(SessionError::InvalidState("User not registered".into()));
        };
        let Some(room_id) = user.current_room else {
            return Err(SessionError::InvalidState("Not in room".into()));
        };

        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| SessionError::NotFound("Room not found".into()))?;
        room.record_decision(Decision {
            author: user_id,
            author_name,
            text,
            submitted_at,
        })?;

        Ok(SubmitOutcome {
            members: room.member_ids(),
            decisions: decision_entries(room),
        })
    }

    fn snapshot_of(&self, room_id: RoomId, caller: UserId) -> Result<RoomSnapshot, SessionError> {
        let room = self
            .rooms
            .get(&room_id)
            .ok_or_else(|| SessionError::NotFound("Room not found".into()))?;

        let mut participants: Vec<ParticipantEntry> = room
            .member_ids()
            .into_iter()
            .map(|member| ParticipantEntry {
                user_id: member,
                username: username_of(&self.users, &member),
                is_admin: room.is_admin(&member),
            })
            .collect();
        // The member set is unordered; sort for a stable rendering.
        participants.sort_by(|a, b| a.username.cmp(&b.username).then(a.user_id.cmp(&b.user_id)));

        Ok(RoomSnapshot {
            room_id,
            title: room.title.as_str().to_string(),
            problem: room.problem.as_str().to_string(),
            admin_name: username_of(&self.users, &room.admin),
            participants,
            decisions: decision_entries(room),
            caller_is_admin: room.is_admin(&caller),
        })
    }

    fn directory(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .rooms
            .values()
            .map(|room| RoomSummary {
                room_id: room.id,
                title: room.title.as_str().to_string(),
                participant_count: room.member_count(),
                admin_name: username_of(&self.users, &room.admin),
                created_at: room.created_at,
            })
            .collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.room_id.cmp(&b.room_id)));
        rooms
    }
}

/// In-memory `SessionRepository` implementation: the whole shared state
/// behind one lock.
pub struct InMemorySessionRepository {
    state: Mutex<SessionState>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn add_user(&self, user_id: UserId, connected_at: Timestamp) {
        let mut state = self.state.lock().await;
        state.add_user(user_id, connected_at);
    }

    async fn register(
        &self,
        user_id: UserId,
        name: DisplayName,
    ) -> Result<Registered, SessionError> {
        let mut state = self.state.lock().await;
        state.register(user_id, name)
    }

    async fn remove_user(&self, user_id: UserId) -> Departure {
        let mut state = self.state.lock().await;
        state.remove_user(user_id)
    }

    async fn create_room(
        &self,
        user_id: UserId,
        title: RoomTitle,
        problem: ProblemStatement,
        created_at: Timestamp,
    ) -> Result<CreatedRoom, SessionError> {
        let mut state = self.state.lock().await;
        state.create_room(user_id, title, problem, created_at)
    }

    async fn join_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<JoinOutcome, SessionError> {
        let mut state = self.state.lock().await;
        state.join_room(user_id, room_id)
    }

    async fn leave_room(&self, user_id: UserId) -> Departure {
        let mut state = self.state.lock().await;
        state.depart(user_id)
    }

    async fn submit_decision(
        &self,
        user_id: UserId,
        text: DecisionText,
        submitted_at: Timestamp,
    ) -> Result<SubmitOutcome, SessionError> {
        let mut state = self.state.lock().await;
        state.submit_decision(user_id, text, submitted_at)
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;
        state.directory()
    }

    async fn room_info(
        &self,
        room_id: RoomId,
        caller: UserId,
    ) -> Result<RoomSnapshot, SessionError> {
        let state = self.state.lock().await;
        state.snapshot_of(room_id, caller)
    }
}
