//! WebSocket frame DTOs.
//!
//! Every frame in either direction is a JSON object discriminated by its
//! `type` field. Inbound frames are decoded through [`decode`], which
//! distinguishes unparseable payloads from unknown frame kinds before
//! serde ever sees the value, so each failure class maps to its own
//! error code on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frame kinds the server accepts.
pub const KNOWN_KINDS: [&str; 7] = [
    "register",
    "create_room",
    "join_room",
    "leave_room",
    "submit_decision",
    "list_rooms",
    "room_info",
];

/// An inbound client frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Register {
        #[serde(default)]
        username: String,
    },
    CreateRoom {
        #[serde(default)]
        title: String,
        #[serde(default)]
        problem: String,
    },
    JoinRoom {
        #[serde(rename = "roomId", default)]
        room_id: String,
    },
    LeaveRoom,
    SubmitDecision {
        #[serde(default)]
        decision: String,
    },
    ListRooms,
    RoomInfo {
        #[serde(rename = "roomId", default)]
        room_id: String,
    },
}

/// Why an inbound frame could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not JSON, not an object, or no string `type` field.
    Malformed,
    /// A well-formed frame whose `type` the server does not know.
    UnknownKind,
    /// A known frame kind whose payload fields have the wrong shape.
    Validation(String),
}

impl DecodeError {
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Malformed => "malformed_payload",
            DecodeError::UnknownKind => "unknown_message",
            DecodeError::Validation(_) => "validation",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DecodeError::Malformed => "Invalid message format",
            DecodeError::UnknownKind => "Unknown message type",
            DecodeError::Validation(message) => message,
        }
    }
}

/// Decode one inbound frame.
pub fn decode(text: &str) -> Result<ClientMessage, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|_| DecodeError::Malformed)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::Malformed)?;
    if !KNOWN_KINDS.contains(&kind) {
        return Err(DecodeError::UnknownKind);
    }
    // Payload string fields are defaulted, so a merely absent field gets
    // past decoding and fails domain validation with its own wording.
    // What fails here is an ill-typed field, e.g. a numeric username.
    serde_json::from_value(value).map_err(|e| DecodeError::Validation(e.to_string()))
}

/// A participant as rendered in room snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// One submitted decision as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDto {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    pub text: String,
    pub timestamp: i64,
}

/// A room as rendered in directory listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "participantCount")]
    pub participant_count: usize,
    pub admin: String,
}

/// An outbound server frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Connected {
        #[serde(rename = "userId")]
        user_id: String,
        message: String,
    },
    Registered {
        #[serde(rename = "userId")]
        user_id: String,
        username: String,
    },
    RoomCreated {
        #[serde(rename = "roomId")]
        room_id: String,
        title: String,
        problem: String,
    },
    RoomJoined {
        #[serde(rename = "roomId")]
        room_id: String,
        title: String,
        problem: String,
        #[serde(rename = "isAdmin")]
        is_admin: bool,
        participants: Vec<ParticipantDto>,
        decisions: Vec<DecisionDto>,
    },
    RoomLeft,
    RoomClosed {
        message: String,
    },
    ParticipantJoined {
        #[serde(rename = "userId")]
        user_id: String,
        username: String,
        #[serde(rename = "participantCount")]
        participant_count: usize,
    },
    ParticipantLeft {
        #[serde(rename = "userId")]
        user_id: String,
        username: String,
        #[serde(rename = "participantCount")]
        participant_count: usize,
    },
    DecisionSubmitted,
    DecisionsUpdated {
        decisions: Vec<DecisionDto>,
    },
    RoomList {
        rooms: Vec<RoomSummaryDto>,
    },
    RoomListUpdated {
        rooms: Vec<RoomSummaryDto>,
    },
    RoomInfo {
        #[serde(rename = "roomId")]
        room_id: String,
        title: String,
        problem: String,
        admin: String,
        participants: Vec<ParticipantDto>,
        decisions: Vec<DecisionDto>,
        #[serde(rename = "isAdmin")]
        is_admin: bool,
    },
    Error {
        code: String,
        message: String,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ServerMessage should serialize")
    }

    pub fn error(code: &str, message: &str) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}
