//! Error types for the chess client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_websockets::Error),

    #[error("Lobby request failed: {0}")]
    Lobby(#[from] reqwest::Error),

    #[error("Malformed server message: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Mock response not configured for: {0}")]
    NotConfigured(String),
}
