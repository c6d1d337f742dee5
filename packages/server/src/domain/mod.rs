//! Domain layer: value objects, the whiteboard state, the room aggregate and
//! the interfaces the other layers implement.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{CommandKind, DrawingCommand, WhiteboardSnapshot, WhiteboardState};
pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use event::WhiteboardEvent;
pub use message_pusher::MessagePusher;
pub use repository::RoomRegistry;
pub use room::{BroadcastReport, ConnectionHandle, Room, RoomOverview};
pub use value_object::{Color, ConnectionId, RawMessage, RoomId, Timestamp};
