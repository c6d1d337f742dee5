//! Conversion logic between domain types and DTOs.

use kokuban_shared::time::timestamp_to_rfc3339;

use crate::domain::RoomOverview;
use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};

// ========================================
// Domain → DTO
// ========================================

impl From<RoomOverview> for RoomSummaryDto {
    fn from(overview: RoomOverview) -> Self {
        Self {
            id: overview.id.into_string(),
            member_count: overview.member_count,
            history_length: overview.history.len(),
            background_color: overview.background_color.as_str().to_string(),
            created_at: timestamp_to_rfc3339(overview.created_at.value()),
        }
    }
}

impl From<RoomOverview> for RoomDetailDto {
    fn from(overview: RoomOverview) -> Self {
        Self {
            id: overview.id.into_string(),
            member_count: overview.member_count,
            background_color: overview.background_color.as_str().to_string(),
            history: overview
                .history
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(overview.created_at.value()),
        }
    }
}
