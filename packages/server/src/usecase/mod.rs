//! UseCase 層
//!
//! ドメイン層の Room / RoomRegistry を組み合わせて、接続ごとの操作
//! （参加・退出・イベント送信）と HTTP API 用の参照処理を提供します。

mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod submit_event;

pub use error::{GetRoomDetailError, SubmitEventError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinRoomUseCase, JoinedRoom};
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use submit_event::SubmitEventUseCase;
