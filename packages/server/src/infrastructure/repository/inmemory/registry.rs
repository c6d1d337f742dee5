//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセスを再起動すると全て失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use kokuban_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionHandle, Room, RoomId, RoomRegistry, Timestamp, WhiteboardSnapshot,
};

/// インメモリ Room Registry 実装
///
/// Room は最初の参加時に作成され、最後のメンバーが抜けた時点で削除されます。
/// 同じ ID で再度参加すると、デフォルト状態の新しい Room が作られます。
pub struct InMemoryRoomRegistry {
    /// Room ID → Room
    rooms: Mutex<HashMap<RoomId, Arc<Room>>>,
    /// Room の作成時刻に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn get_or_insert(
        &self,
        rooms: &mut HashMap<RoomId, Arc<Room>>,
        room_id: &RoomId,
    ) -> Arc<Room> {
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id);
                Arc::new(Room::new(
                    room_id.clone(),
                    Timestamp::new(self.clock.now_millis()),
                ))
            })
            .clone()
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<Room> {
        let mut rooms = self.rooms.lock().await;
        self.get_or_insert(&mut rooms, room_id)
    }

    async fn join(
        &self,
        room_id: &RoomId,
        handle: ConnectionHandle,
    ) -> (Arc<Room>, WhiteboardSnapshot) {
        let mut rooms = self.rooms.lock().await;
        let room = self.get_or_insert(&mut rooms, room_id);
        let snapshot = room.join(handle).await;
        (room, snapshot)
    }

    async fn release_if_empty(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(room_id) else {
            return false;
        };
        if !room.is_empty().await {
            return false;
        }
        rooms.remove(room_id);
        tracing::info!("Room '{}' reclaimed", room_id);
        true
    }

    async fn find(&self, room_id: &RoomId) -> Option<Arc<Room>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list(&self) -> Vec<Arc<Room>> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Arc<Room>> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id().cmp(b.id()));
        list
    }
}
