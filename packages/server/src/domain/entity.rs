//! Whiteboard state entities.
//!
//! `WhiteboardState` is a plain value; the exclusive-access guarantees come
//! from the lock that the owning [`Room`](super::Room) wraps it in.

use std::fmt;

use super::value_object::{Color, RawMessage};

/// Discriminant of a recorded command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Draw,
    Text,
    Background,
    Clear,
    /// Any other kind a client sent; kept and relayed as-is.
    Other(String),
}

impl CommandKind {
    pub const DRAW: &'static str = "draw";
    pub const TEXT: &'static str = "text";
    pub const BACKGROUND: &'static str = "background";
    pub const CLEAR: &'static str = "clear";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Draw => Self::DRAW,
            Self::Text => Self::TEXT,
            Self::Background => Self::BACKGROUND,
            Self::Clear => Self::CLEAR,
            Self::Other(kind) => kind,
        }
    }
}

impl From<&str> for CommandKind {
    fn from(value: &str) -> Self {
        match value {
            Self::DRAW => Self::Draw,
            Self::TEXT => Self::Text,
            Self::BACKGROUND => Self::Background,
            Self::CLEAR => Self::Clear,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event in a room's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingCommand {
    pub kind: CommandKind,
    /// The original wire message, byte for byte.
    pub payload: RawMessage,
}

impl DrawingCommand {
    pub fn new(kind: CommandKind, payload: RawMessage) -> Self {
        Self { kind, payload }
    }
}

/// Owned copy of a room's whiteboard, safe to hand out of the lock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WhiteboardSnapshot {
    pub background_color: Color,
    pub commands: Vec<DrawingCommand>,
}

/// Background color plus the ordered replay log of one room.
///
/// `history` is either every accepted event since the room was created, or,
/// right after a clear, exactly one `Clear` command followed by whatever was
/// accepted afterwards.
#[derive(Debug, Clone, Default)]
pub struct WhiteboardState {
    background_color: Color,
    history: Vec<DrawingCommand>,
}

impl WhiteboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background_color(&self) -> &Color {
        &self.background_color
    }

    pub fn history(&self) -> &[DrawingCommand] {
        &self.history
    }

    /// Append one command to the end of the history.
    pub fn append(&mut self, command: DrawingCommand) {
        self.history.push(command);
    }

    /// Set the background color. Does not touch the history.
    pub fn set_background(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Compact the history down to a single clear marker.
    ///
    /// The background color is left as it is.
    pub fn clear(&mut self, payload: RawMessage) {
        self.history.clear();
        self.history
            .push(DrawingCommand::new(CommandKind::Clear, payload));
    }

    pub fn snapshot(&self) -> WhiteboardSnapshot {
        WhiteboardSnapshot {
            background_color: self.background_color.clone(),
            commands: self.history.clone(),
        }
    }
}
