//! JSON messages exchanged over the game socket.
//!
//! Every server frame is an object `{"type": ..., "data": ...}`. The
//! payload shape depends on the type, so frames are decoded in two steps:
//! first the envelope, then the payload for the known types. Unknown
//! types are preserved as [`ServerMessage::Unknown`] so callers can log
//! and skip them.

use chess::{PieceColor, UciMove};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialPayload {
    pub player: PieceColor,
    pub fen: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub fen: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub moves: Vec<String>,
    #[serde(rename = "move")]
    pub last_move: String,
}

/// Error payloads arrive either as a bare string or as `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Text(String),
    Detailed { message: String },
}

impl ErrorPayload {
    pub fn message(&self) -> &str {
        match self {
            Self::Text(message) | Self::Detailed { message } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Initial(InitialPayload),
    Move(MovePayload),
    Error(ErrorPayload),
    /// The color of the losing side.
    GameOver(PieceColor),
    Unknown(String),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl ServerMessage {
    /// Decode one JSON frame.
    pub fn from_json(text: &str) -> ClientResult<Self> {
        let envelope: Envelope = serde_json::from_str(text)?;
        let message = match envelope.kind.as_str() {
            "initial" => Self::Initial(serde_json::from_value(envelope.data)?),
            "move" => Self::Move(serde_json::from_value(envelope.data)?),
            "error" => Self::Error(serde_json::from_value(envelope.data)?),
            "gameover" => Self::GameOver(serde_json::from_value(envelope.data)?),
            _ => Self::Unknown(envelope.kind),
        };
        Ok(message)
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Initial(_) => "initial",
            Self::Move(_) => "move",
            Self::Error(_) => "error",
            Self::GameOver(_) => "gameover",
            Self::Unknown(kind) => kind,
        }
    }
}

/// Messages the client sends. Only moves are ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Move { data: String, player: PieceColor },
}

impl ClientMessage {
    pub fn new_move(mv: UciMove, player: PieceColor) -> Self {
        Self::Move {
            data: mv.to_string(),
            player,
        }
    }

    pub fn to_json(&self) -> ClientResult<String> {
        serde_json::to_string(self).map_err(ClientError::from)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Split a text frame into its JSON messages. The server may batch
/// several queued messages into one frame, separated by newlines.
pub fn split_frame(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}
