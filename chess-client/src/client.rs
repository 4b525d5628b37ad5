//! WebSocket transport to one game on the server

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_websockets::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream};

use crate::error::{ClientError, ClientResult};
use crate::protocol::{split_frame, ClientMessage, ServerMessage};
use crate::traits::GameTransport;

/// Network client bound to a single game id
pub struct ChessClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    game_id: String,
    pending: VecDeque<String>,
}

impl ChessClient {
    /// Open the game socket at `ws://<server>/game/<game_id>`
    pub async fn connect(server: &str, game_id: &str) -> ClientResult<Self> {
        let url = game_url(server, game_id);
        let builder = ClientBuilder::new()
            .uri(&url)
            .map_err(|e| ClientError::InvalidAddress(format!("{url}: {e}")))?;
        let (stream, _response) = builder.connect().await?;

        tracing::info!(game_id, %url, "Connected to game");

        Ok(Self {
            stream,
            game_id: game_id.to_string(),
            pending: VecDeque::new(),
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
}

#[async_trait]
impl GameTransport for ChessClient {
    async fn send(&mut self, message: &ClientMessage) -> ClientResult<()> {
        let json = message.to_json()?;
        tracing::debug!(game_id = %self.game_id, %json, "Sending message");
        self.stream.send(Message::text(json)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<ClientResult<ServerMessage>> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                tracing::debug!(game_id = %self.game_id, %line, "Message received");
                return Some(ServerMessage::from_json(&line));
            }

            match self.stream.next().await? {
                Ok(msg) if msg.is_close() => {
                    tracing::info!(game_id = %self.game_id, "Server closed the connection");
                    return None;
                }
                Ok(msg) => {
                    if let Some(text) = msg.as_text() {
                        self.pending.extend(split_frame(text).map(str::to_owned));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) -> ClientResult<()> {
        self.stream.close().await?;
        Ok(())
    }
}

/// Host and port with any scheme prefix and trailing slash removed.
pub fn server_host(server: &str) -> &str {
    let host = ["ws://", "wss://", "http://", "https://"]
        .iter()
        .find_map(|scheme| server.strip_prefix(scheme))
        .unwrap_or(server);
    host.trim_end_matches('/')
}

pub fn game_url(server: &str, game_id: &str) -> String {
    format!("ws://{}/game/{}", server_host(server), game_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_host_strips_scheme() {
        assert_eq!(server_host("localhost:8080"), "localhost:8080");
        assert_eq!(server_host("http://localhost:8080/"), "localhost:8080");
        assert_eq!(server_host("ws://example.com"), "example.com");
    }

    #[test]
    fn test_game_url() {
        assert_eq!(
            game_url("localhost:8080", "abc-123"),
            "ws://localhost:8080/game/abc-123"
        );
    }
}
