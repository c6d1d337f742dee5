//! Server state shared by every handler and session.

use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, SubmitEventUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SubmitEventUseCase（イベント送信のユースケース）
    pub submit_event_usecase: Arc<SubmitEventUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// 接続ごとの送信キュー容量
    pub queue_capacity: NonZeroUsize,
    /// ソケットへの 1 回の書き込みに許す最大時間
    pub write_timeout: Duration,
}
