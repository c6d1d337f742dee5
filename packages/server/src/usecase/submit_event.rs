//! UseCase: ホワイトボードイベント送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitEventUseCase::execute() メソッド
//! - イベントが履歴に反映され、送信者以外にそのまま中継されること
//!
//! ### なぜこのテストが必要か
//! - background は履歴 1 件のみ（二重追加しない）であることを保証
//! - clear で履歴が圧縮されることを保証
//! - 退去済みの接続からのイベントが反映されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：draw / background / clear の送信
//! - 異常系：退去済みの送信者
//! - エッジケース：送信者のみが参加している場合（中継対象なし）

use crate::domain::{BroadcastReport, ConnectionId, Room, WhiteboardEvent};

use super::error::SubmitEventError;

/// ホワイトボードイベント送信のユースケース
#[derive(Debug, Default)]
pub struct SubmitEventUseCase;

impl SubmitEventUseCase {
    /// 新しい SubmitEventUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// イベント送信を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 送信者が参加している Room
    /// * `sender` - 送信者の接続 ID
    /// * `event` - 分類済みのイベント（生メッセージを含む）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 中継先の数と、退去させた接続
    /// * `Err(SubmitEventError)` - 送信者がすでにメンバーでない
    pub async fn execute(
        &self,
        room: &Room,
        sender: &ConnectionId,
        event: WhiteboardEvent,
    ) -> Result<BroadcastReport, SubmitEventError> {
        let report = room.apply(sender, &event).await?;
        tracing::debug!(
            "Relayed '{}' from '{}' to {} peers in room '{}'",
            event.kind(),
            sender,
            report.delivered,
            room.id()
        );
        if !report.evicted.is_empty() {
            tracing::info!(
                "Evicted {} unresponsive peers from room '{}'",
                report.evicted.len(),
                room.id()
            );
        }
        Ok(report)
    }
}
