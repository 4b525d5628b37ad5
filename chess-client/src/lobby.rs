//! Game allocation over plain HTTP

use serde::Deserialize;

use crate::client::server_host;
use crate::error::ClientResult;

#[derive(Debug, Deserialize)]
struct NewGame {
    game_id: String,
}

/// Ask the server for a fresh game and return its id.
///
/// Every call allocates a new game. An opponent joins by connecting to
/// the same id.
pub async fn fetch_new_game(server: &str) -> ClientResult<String> {
    let url = lobby_url(server);
    tracing::debug!(%url, "Requesting new game");

    let game: NewGame = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json()
        .await?;

    tracing::info!(game_id = %game.game_id, "Allocated game");
    Ok(game.game_id)
}

fn lobby_url(server: &str) -> String {
    format!("http://{}/game", server_host(server))
}
