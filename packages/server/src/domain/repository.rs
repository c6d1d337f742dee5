//! RoomRegistry trait 定義
//!
//! Room ID → Room の対応表へのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    entity::WhiteboardSnapshot,
    room::{ConnectionHandle, Room},
    value_object::RoomId,
};

/// Room Registry trait
///
/// ## ロック順序
///
/// 実装は registry → room membership → whiteboard の順でのみロックを取得すること。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Room を取得し、存在しなければデフォルト状態で作成する
    ///
    /// 参加を伴わない取得用。接続の参加には競合を避けるため `join` を使うこと。
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<Room>;

    /// Room を取得（作成）し、そのまま接続を参加させる
    ///
    /// 取得と参加は registry のロック内で行われるため、同じ ID に対する
    /// `release_if_empty` と競合して参加者が孤立した Room に入ることはない。
    async fn join(
        &self,
        room_id: &RoomId,
        handle: ConnectionHandle,
    ) -> (Arc<Room>, WhiteboardSnapshot);

    /// Room が空なら対応表から削除する。削除した場合は `true`
    async fn release_if_empty(&self, room_id: &RoomId) -> bool;

    /// 生存している Room を取得
    async fn find(&self, room_id: &RoomId) -> Option<Arc<Room>>;

    /// 生存している全ての Room を取得（ID 順）
    async fn list(&self) -> Vec<Arc<Room>>;
}
