//! Classified inbound whiteboard events.

use super::{
    entity::{CommandKind, DrawingCommand, WhiteboardState},
    value_object::{Color, RawMessage},
};

/// One client→server message whose discriminant was understood.
///
/// Every variant carries the raw frame; that is what gets recorded and
/// relayed, whatever the typed fields turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhiteboardEvent {
    Draw(RawMessage),
    Text(RawMessage),
    /// `color` is `None` when the color field was missing or not a string.
    Background {
        raw: RawMessage,
        color: Option<Color>,
    },
    Clear(RawMessage),
    Unrecognized {
        kind: String,
        raw: RawMessage,
    },
}

impl WhiteboardEvent {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Draw(_) => CommandKind::Draw,
            Self::Text(_) => CommandKind::Text,
            Self::Background { .. } => CommandKind::Background,
            Self::Clear(_) => CommandKind::Clear,
            Self::Unrecognized { kind, .. } => CommandKind::Other(kind.clone()),
        }
    }

    pub fn raw(&self) -> &RawMessage {
        match self {
            Self::Draw(raw)
            | Self::Text(raw)
            | Self::Clear(raw)
            | Self::Background { raw, .. }
            | Self::Unrecognized { raw, .. } => raw,
        }
    }

    /// Record this event in `state`.
    ///
    /// Each event produces exactly one history entry: clear replaces the
    /// history, everything else appends. A background event with a parsed
    /// color also updates the current color.
    pub fn apply_to(&self, state: &mut WhiteboardState) {
        if let Self::Clear(raw) = self {
            state.clear(raw.clone());
            return;
        }

        state.append(DrawingCommand::new(self.kind(), self.raw().clone()));

        if let Self::Background {
            color: Some(color), ..
        } = self
        {
            state.set_background(color.clone());
        }
    }
}
