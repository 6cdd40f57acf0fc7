// event.rs — Messages between the presentation surface and a diff session.
//
// Incoming messages are JSON objects with a `command` field. The four
// commands the core understands decode into typed variants; anything else is
// kept as `Custom` and forwarded to the host's listener untouched.
//
// Save wire shape:
//   { "command": "save", "contents": { "left": "...", "right": "..." } }

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;

/// Editor contents at the moment of saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveContents {
    #[serde(default)]
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEvent {
    pub contents: SaveContents,
}

impl SaveEvent {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            contents: SaveContents {
                left: left.into(),
                right: right.into(),
            },
        }
    }

    /// The user's current right-hand content.
    pub fn saved_content(&self) -> &str {
        &self.contents.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The view is ready for its payload.
    Load,
    /// The user edited the right-hand side.
    Change,
    Save(SaveEvent),
    /// Exchange left and right paths.
    Swap,
    Custom { command: String, payload: Value },
}

/// The typed subset of the wire protocol.
#[derive(Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum WireEvent {
    Load,
    Change,
    Save { contents: SaveContents },
    Swap,
}

impl From<WireEvent> for SessionEvent {
    fn from(event: WireEvent) -> Self {
        match event {
            WireEvent::Load => Self::Load,
            WireEvent::Change => Self::Change,
            WireEvent::Save { contents } => Self::Save(SaveEvent { contents }),
            WireEvent::Swap => Self::Swap,
        }
    }
}

impl SessionEvent {
    /// Decode a raw message from the presentation surface.
    pub fn from_json(message: &str) -> Result<Self, SessionError> {
        Self::from_value(serde_json::from_str(message)?)
    }

    pub fn from_value(value: Value) -> Result<Self, SessionError> {
        let command = value
            .get("command")
            .and_then(Value::as_str)
            .ok_or_else(|| SessionError::InvalidEvent("missing \"command\" field".to_string()))?
            .to_string();

        match command.as_str() {
            "load" | "change" | "save" | "swap" => {
                Ok(serde_json::from_value::<WireEvent>(value)?.into())
            }
            _ => Ok(Self::Custom {
                command,
                payload: value,
            }),
        }
    }

    pub fn command(&self) -> &str {
        match self {
            Self::Load => "load",
            Self::Change => "change",
            Self::Save(_) => "save",
            Self::Swap => "swap",
            Self::Custom { command, .. } => command,
        }
    }
}
