//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomOverview, RoomRegistry};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 生存している全ての Room の概要を ID 順に返す
    pub async fn execute(&self) -> Vec<RoomOverview> {
        let rooms = self.registry.list().await;
        let mut overviews = Vec::with_capacity(rooms.len());
        for room in rooms {
            overviews.push(room.overview().await);
        }
        overviews
    }
}
