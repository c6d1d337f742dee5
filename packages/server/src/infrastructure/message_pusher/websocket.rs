//! 有界キューを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`mpsc::channel`）の送信側を保持
//! - ブロードキャスト側からの `push` を非ブロッキングでキューに積む
//!
//! ## 設計ノート
//!
//! キューの受信側は UI 層（`src/ui/session.rs`）の送信タスクが保持し、
//! WebSocket へ書き出します。ブロードキャスト側は決して待たず、キューが満杯なら
//! `QueueFull` を返してその接続を退去させます。

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{MessagePushError, MessagePusher, RawMessage};

/// 送信キューのデフォルト容量（メッセージ数）
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// 有界キューを使った MessagePusher 実装
#[derive(Debug, Clone)]
pub struct WebSocketMessagePusher {
    sender: mpsc::Sender<RawMessage>,
}

impl WebSocketMessagePusher {
    /// 容量 `capacity` の送信キューを作成し、送信側と受信側を返す
    ///
    /// # Panics
    ///
    /// `capacity` が 0 の場合（`mpsc::channel` の制約）
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RawMessage>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn push(&self, message: RawMessage) -> Result<(), MessagePushError> {
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::QueueFull,
            TrySendError::Closed(_) => MessagePushError::Disconnected,
        })
    }
}
