//! WebSocket wire format.
//!
//! Every message is a JSON object whose `type` field is the discriminant.
//! Inbound messages are classified by that field alone; type-specific fields
//! are read only where the server acts on them (background color) or to log
//! partially malformed input. What gets stored and relayed is always the
//! original frame.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::domain::{Color, CommandKind, RawMessage, WhiteboardEvent, WhiteboardSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Draw,
    Text,
    Background,
    Clear,
    /// Server→client only, sent once per join.
    History,
}

/// A stroke segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawMessage {
    pub r#type: MessageType,
    pub prev_x: f64,
    pub prev_y: f64,
    pub curr_x: f64,
    pub curr_y: f64,
    pub color: String,
    pub brush_size: i64,
}

/// A text label placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub r#type: MessageType,
    pub text: String,
    pub x: i64,
    pub y: i64,
    pub color: String,
    pub text_size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundMessage {
    pub r#type: MessageType,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearMessage {
    pub r#type: MessageType,
}

/// Full-state replay sent to a peer right after it joins.
#[derive(Debug, Serialize)]
pub struct HistoryMessage<'a> {
    pub r#type: MessageType,
    /// Current background color. Needed because a clear compacts away the
    /// background entries that set it.
    pub background: &'a str,
    pub commands: Vec<HistoryEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub r#type: &'a str,
    /// The recorded frame, embedded as JSON without re-encoding.
    pub payload: &'a RawValue,
}

/// Only the discriminant; every other field is ignored.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Error)]
pub enum MessageParseError {
    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message type could not be parsed: {0}")]
    InvalidType(#[from] serde_json::Error),
}

/// Classify an inbound frame.
///
/// # Errors
///
/// Returns `MessageParseError` when the frame is not a JSON object with a
/// string `type` field. Such frames must be dropped without any state change.
pub fn parse_event(raw: RawMessage) -> Result<WhiteboardEvent, MessageParseError> {
    // serde would also accept a JSON array for a struct
    if !raw.as_str().trim_start().starts_with('{') {
        return Err(MessageParseError::NotAnObject);
    }
    let envelope: Envelope = serde_json::from_str(raw.as_str())?;

    let event = match CommandKind::from(envelope.kind.as_str()) {
        CommandKind::Draw => {
            if let Err(e) = serde_json::from_str::<DrawMessage>(raw.as_str()) {
                tracing::debug!("Draw message fields not understood, relaying as-is: {}", e);
            }
            WhiteboardEvent::Draw(raw)
        }
        CommandKind::Text => {
            if let Err(e) = serde_json::from_str::<TextMessage>(raw.as_str()) {
                tracing::debug!("Text message fields not understood, relaying as-is: {}", e);
            }
            WhiteboardEvent::Text(raw)
        }
        CommandKind::Background => {
            let color = match serde_json::from_str::<BackgroundMessage>(raw.as_str()) {
                Ok(message) => Some(Color::new(message.color)),
                Err(e) => {
                    tracing::warn!("Background message without a usable color: {}", e);
                    None
                }
            };
            WhiteboardEvent::Background { raw, color }
        }
        CommandKind::Clear => WhiteboardEvent::Clear(raw),
        CommandKind::Other(kind) => WhiteboardEvent::Unrecognized { kind, raw },
    };

    Ok(event)
}

/// Encode a snapshot as the `history` message.
///
/// # Errors
///
/// Fails only if a recorded payload is not valid JSON, which `parse_event`
/// rules out for everything it lets into the history.
pub fn encode_history(snapshot: &WhiteboardSnapshot) -> Result<String, serde_json::Error> {
    let commands = snapshot
        .commands
        .iter()
        .map(|command| -> Result<HistoryEntry<'_>, serde_json::Error> {
            Ok(HistoryEntry {
                r#type: command.kind.as_str(),
                payload: serde_json::from_str(command.payload.as_str())?,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    serde_json::to_string(&HistoryMessage {
        r#type: MessageType::History,
        background: snapshot.background_color.as_str(),
        commands,
    })
}
