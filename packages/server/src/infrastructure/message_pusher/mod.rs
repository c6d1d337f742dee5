//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: 接続ごとの有界キューを使った実装（WebSocket 送信タスクが消費する）

pub mod websocket;

pub use websocket::{DEFAULT_QUEUE_CAPACITY, WebSocketMessagePusher};
