use anyhow::Context;
use chess_client::{fetch_new_game, ChessClient, ClientResult, GameTransport, ServerMessage};
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Alignment,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::io;
use std::time::Duration;

use super::app::App;
use super::input::AppAction;
use super::theme::Theme;
use crate::config::Config;
use crate::state::SyncController;

/// Why the game loop exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Quit,
    NewGame,
}

/// What woke the UI loop.
enum LoopEvent {
    Terminal(Event),
    Server(Option<ClientResult<ServerMessage>>),
    Tick,
}

pub async fn run_app(config: Config) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_games(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

/// Outer loop: connect → play → (restart → connect → play) ...
async fn run_games<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> anyhow::Result<()> {
    // Only the first game may join a given id. Restarts always ask for a new one.
    let mut requested_id = config.game_id.clone();

    loop {
        draw_connecting(terminal, &config.server)?;

        let game_id = match requested_id.take() {
            Some(id) => id,
            None => fetch_new_game(&config.server)
                .await
                .with_context(|| format!("Failed to create a game on {}", config.server))?,
        };

        let client = ChessClient::connect(&config.server, &game_id)
            .await
            .with_context(|| format!("Failed to join game {game_id}"))?;

        let mut app = App::new(SyncController::new(client, game_id), Theme::detect());
        let reason = run_ui_loop(terminal, &mut app, config.tick).await;
        app.sync.close().await;

        match reason? {
            ExitReason::Quit => return Ok(()),
            ExitReason::NewGame => {
                tracing::info!("Starting a new game");
                continue;
            }
        }
    }
}

fn draw_connecting<B: Backend>(terminal: &mut Terminal<B>, server: &str) -> anyhow::Result<()> {
    let theme = Theme::detect();
    terminal.draw(|f| {
        let text = Paragraph::new(format!("Connecting to {server}…"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary))
            .block(
                Block::default()
                    .title("♟ Chess ♟")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.panel_border)),
            );
        f.render_widget(text, f.area());
    })?;
    Ok(())
}

async fn run_ui_loop<B: Backend, T: GameTransport>(
    terminal: &mut Terminal<B>,
    app: &mut App<T>,
    tick: Duration,
) -> anyhow::Result<ExitReason> {
    let mut term_events = EventStream::new();

    // Caps the frame rate. Input and server messages wake the loop immediately.
    let mut render_tick = tokio::time::interval(tick);

    loop {
        terminal.draw(|f| app.render(f))?;

        // Wait for whichever comes first: terminal, server, or UI tick.
        let event = tokio::select! {
            biased;

            maybe_event = term_events.next() => match maybe_event {
                Some(Ok(ev)) => LoopEvent::Terminal(ev),
                Some(Err(e)) => {
                    tracing::warn!("Terminal event error: {}", e);
                    LoopEvent::Tick
                }
                None => return Ok(ExitReason::Quit),
            },

            message = app.sync.recv() => LoopEvent::Server(message),

            _ = render_tick.tick() => LoopEvent::Tick,
        };

        match event {
            LoopEvent::Terminal(ev) => match app.on_event(ev).await {
                AppAction::Continue => {}
                AppAction::Quit => return Ok(ExitReason::Quit),
                AppAction::NewGame => return Ok(ExitReason::NewGame),
            },
            LoopEvent::Server(message) => {
                let outcome = app.on_remote(message);
                tracing::debug!(?outcome, phase = ?app.sync.phase(), "Server message handled");
            }
            LoopEvent::Tick => {}
        }
    }
}
