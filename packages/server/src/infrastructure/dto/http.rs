//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One room in the REST directory listing.
///
/// Unlike the WebSocket directory frames, the REST listing carries the
/// creation time, rendered as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDirectoryDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "participantCount")]
    pub participant_count: usize,
    pub admin: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
