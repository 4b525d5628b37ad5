//! GameTransport trait abstraction for client implementations

use crate::error::ClientResult;
use crate::protocol::{ClientMessage, ServerMessage};
use async_trait::async_trait;

/// Duplex message channel to one game on the server.
/// Implemented by both the WebSocket ChessClient and MockTransport.
#[async_trait]
pub trait GameTransport: Send {
    /// Send one message to the server
    async fn send(&mut self, message: &ClientMessage) -> ClientResult<()>;

    /// Wait for the next server message.
    ///
    /// Returns `None` once the connection has closed. A frame that does
    /// not decode yields `Some(Err(..))` and the stream carries on.
    async fn recv(&mut self) -> Option<ClientResult<ServerMessage>>;

    /// Close the connection
    async fn close(&mut self) -> ClientResult<()>;
}
