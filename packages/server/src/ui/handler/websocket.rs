//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State, ws::WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{domain::RoomId, ui::session::ConnectionSession, ui::state::AppState};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub room: Option<String>,
}

/// Validates the room id, then upgrades. Nothing is created for a rejected
/// request.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(room) = query.room else {
        tracing::warn!("Rejecting connection without a room id");
        return Err(StatusCode::BAD_REQUEST);
    };

    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection with invalid room id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!("Accepting connection for room '{}'", room_id);
    Ok(ws
        .on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| ConnectionSession::new(state, room_id).run(socket)))
}
