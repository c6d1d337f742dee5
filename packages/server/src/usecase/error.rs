//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RoomError, ValueObjectError};

/// イベント送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitEventError {
    /// 送信者がすでにルームから退去させられている
    #[error("sender is no longer in the room: {0}")]
    SenderNotInRoom(#[from] RoomError),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] ValueObjectError),

    #[error("room not found")]
    RoomNotFound,
}
