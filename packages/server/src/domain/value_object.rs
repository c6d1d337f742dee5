//! 値オブジェクト
//!
//! Room ID、接続 ID、背景色、生メッセージ、タイムスタンプを表す不変の値。

use std::{fmt, sync::Arc};

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Room ID の最大長（バイト）
pub const ROOM_ID_MAX_LEN: usize = 128;

/// ルームを識別する ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成
    ///
    /// # Errors
    ///
    /// * 空文字列または空白のみの場合は `ValueObjectError::EmptyRoomId`
    /// * `ROOM_ID_MAX_LEN` を超える場合は `ValueObjectError::RoomIdTooLong`
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        if value.len() > ROOM_ID_MAX_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                max: ROOM_ID_MAX_LEN,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1 つの WebSocket 接続を識別する ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// ランダムな ConnectionId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ホワイトボードの背景色
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub const DEFAULT_BACKGROUND: &'static str = "#ffffff";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BACKGROUND)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントから受信したそのままのメッセージ
///
/// 履歴への保存とブロードキャストは常にこのバイト列で行う。
/// `clone` は参照カウントの増加のみで、本文はコピーされない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawMessage(Arc<str>);

impl RawMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawMessage {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for RawMessage {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
