//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Room ID が空（空白のみを含む）
    #[error("room id must not be empty")]
    EmptyRoomId,

    /// Room ID が長すぎる
    #[error("room id must be at most {max} bytes (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },
}

/// 送信キューへのメッセージ投入エラー
///
/// どちらのバリアントも、ブロードキャスト時には相手をルームから退去させる理由になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信キューが満杯（遅いピア）
    #[error("outbound queue is full")]
    QueueFull,

    /// 送信タスクが終了済み（切断済みのピア）
    #[error("peer is disconnected")]
    Disconnected,
}

/// Room 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 送信者がルームのメンバーではない（退去済みなど）
    #[error("connection '{0}' is not a member of room '{1}'")]
    NotAMember(String, String),
}
