use std::path::PathBuf;

use clap::Parser;
use client_tui::{ui, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Play chess against another player in the terminal.
#[derive(Debug, Parser)]
#[command(name = "client-tui", version, about)]
struct Cli {
    /// Game server address (host:port). Overrides CHESSBOARD_SERVER.
    #[arg(long)]
    server: Option<String>,

    /// Join an existing game instead of creating one.
    #[arg(long = "game")]
    game_id: Option<String>,

    /// Directory for log files. Overrides CHESSBOARD_LOG_DIR.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.server, cli.game_id, cli.log_dir);

    // Set up tracing with file output; the terminal belongs to the UI
    std::fs::create_dir_all(&config.log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "client-tui");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(server = %config.server, game_id = ?config.game_id, "Chess client starting up");

    println!("Chess - Terminal Board");
    println!("Connecting to server at {}", config.server);
    println!("Debug logs: {}/client-tui.YYYY-MM-DD", config.log_dir.display());
    ui::run_app(config).await?;

    tracing::info!("Chess client shutting down");
    Ok(())
}
