//! Chess game client library
//!
//! Provides the JSON message protocol and an async WebSocket transport
//! for playing a game hosted by the chess server. Can be used by the TUI
//! or any other client application.
//!
//! # Example
//!
//! ```no_run
//! use chess_client::{fetch_new_game, ChessClient, GameTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let game_id = fetch_new_game("localhost:8080").await?;
//!     let mut client = ChessClient::connect("localhost:8080", &game_id).await?;
//!     while let Some(message) = client.recv().await {
//!         println!("Received: {:?}", message?);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod lobby;
pub mod protocol;
mod traits;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use client::{game_url, server_host, ChessClient};
pub use error::{ClientError, ClientResult};
pub use lobby::fetch_new_game;
pub use protocol::{ClientMessage, ErrorPayload, InitialPayload, MovePayload, ServerMessage};
pub use traits::GameTransport;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockTransport};
