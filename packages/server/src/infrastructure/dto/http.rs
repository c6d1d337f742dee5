//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for the room list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
    pub history_length: usize,
    pub background_color: String,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Room detail for the room detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub member_count: usize,
    pub background_color: String,
    /// Kinds of the recorded commands, in replay order
    pub history: Vec<String>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}
