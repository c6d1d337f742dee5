//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加時に Room が作成（または再利用）され、現在の状態が返ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room への参加、既存の Room への参加

use std::sync::Arc;

use crate::domain::{ConnectionHandle, Room, RoomId, RoomRegistry, WhiteboardSnapshot};

/// 参加結果
pub struct JoinedRoom {
    /// 参加した Room
    pub room: Arc<Room>,
    /// 参加時点のホワイトボード状態（history メッセージとして送る）
    pub snapshot: WhiteboardSnapshot,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RoomRegistry（Room 対応表の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加する Room の ID（Domain Model）
    /// * `handle` - 参加する接続（送信キューを含む）
    pub async fn execute(&self, room_id: &RoomId, handle: ConnectionHandle) -> JoinedRoom {
        let (room, snapshot) = self.registry.join(room_id, handle).await;
        tracing::debug!(
            "Replaying {} commands to new member of room '{}'",
            snapshot.commands.len(),
            room_id
        );
        JoinedRoom { room, snapshot }
    }
}
