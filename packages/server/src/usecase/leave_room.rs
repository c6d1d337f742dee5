//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出後、Room が空になっていれば registry から回収されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：最後のメンバーの退出（回収される）、他のメンバーが残る退出
//! - エッジケース：同じ接続の二重退出（冪等）

use std::sync::Arc;

use crate::domain::{ConnectionId, Room, RoomRegistry};

/// 退出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// 退出時にまだメンバーだったか（退去済みなら `false`）
    pub was_member: bool,
    /// Room が空になり registry から削除されたか
    pub room_released: bool,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// RoomRegistry（Room 対応表の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行
    ///
    /// 何度呼んでも安全。2 回目以降は `was_member == false` になる。
    pub async fn execute(&self, room: &Room, connection_id: &ConnectionId) -> LeaveOutcome {
        let was_member = room.leave(connection_id).await;
        let room_released = self.registry.release_if_empty(room.id()).await;
        LeaveOutcome {
            was_member,
            room_released,
        }
    }
}
