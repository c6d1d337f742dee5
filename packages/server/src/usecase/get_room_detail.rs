//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomId, RoomOverview, RoomRegistry};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 指定した ID の Room の概要を返す
    ///
    /// # Errors
    ///
    /// * `InvalidRoomId` - ID の形式が不正
    /// * `RoomNotFound` - その ID の Room が生存していない
    pub async fn execute(&self, room_id: String) -> Result<RoomOverview, GetRoomDetailError> {
        let room_id = RoomId::try_from(room_id)?;
        let room = self
            .registry
            .find(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        Ok(room.overview().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionHandle, ConnectionId, ValueObjectError},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
    };

    #[tokio::test]
    async fn test_get_room_detail_found() {
        // テスト項目: 生存している Room の詳細が取得できる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::default());
        let usecase = GetRoomDetailUseCase::new(registry.clone());
        let (pusher, _rx) = WebSocketMessagePusher::channel(1);
        registry
            .join(
                &RoomId::new("alpha".to_string()).unwrap(),
                ConnectionHandle::new(ConnectionId::generate(), Arc::new(pusher)),
            )
            .await;

        // when (操作):
        let result = usecase.execute("alpha".to_string()).await;

        // then (期待する結果):
        let overview = result.unwrap();
        assert_eq!(overview.id.as_str(), "alpha");
        assert_eq!(overview.member_count, 1);
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない Room は RoomNotFound になる
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(Arc::new(InMemoryRoomRegistry::default()));

        // when (操作):
        let result = usecase.execute("missing".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), GetRoomDetailError::RoomNotFound);
    }

    #[tokio::test]
    async fn test_get_room_detail_invalid_id() {
        // テスト項目: 不正な ID は InvalidRoomId になる
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(Arc::new(InMemoryRoomRegistry::default()));

        // when (操作):
        let result = usecase.execute("  ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            GetRoomDetailError::InvalidRoomId(ValueObjectError::EmptyRoomId)
        );
    }
}
