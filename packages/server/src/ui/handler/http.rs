//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomDirectoryDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the current room directory
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomDirectoryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomDirectoryDto::from).collect())
}
