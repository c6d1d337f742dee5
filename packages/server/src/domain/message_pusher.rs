//! MessagePusher trait 定義
//!
//! ルームから 1 つの接続へメッセージを届けるためのインターフェース。
//! 具体的な実装（接続ごとの有界キュー）は Infrastructure 層が提供します。

use super::{error::MessagePushError, value_object::RawMessage};

/// 1 つの接続への送信口
///
/// `push` はブロックしてはならない。キューが満杯、または接続が閉じている場合は
/// 即座にエラーを返し、呼び出し側（ブロードキャスト）がその接続を退去させる。
#[cfg_attr(test, mockall::automock)]
pub trait MessagePusher: Send + Sync {
    /// メッセージを送信キューに積む
    fn push(&self, message: RawMessage) -> Result<(), MessagePushError>;
}
