use chess::{Square, UciMove};
use chess_client::{ClientResult, GameTransport, ServerMessage};
use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::state::{SyncController, SyncEvent, SyncPhase};
use crate::ui::gesture::{GestureEngine, GestureOutcome, GestureRejection, PointerHit};
use crate::ui::input::{key_command, AppAction, KeyCommand};
use crate::ui::surface::{BoardSurface, HighlightKind};
use crate::ui::theme::Theme;
use crate::ui::widgets::{AnnotationOverlay, BoardGeometry, BoardWidget, ControlsPanel, GameInfoPanel};

/// Width of the info/controls column to the right of the board.
const SIDE_PANEL_WIDTH: u16 = 36;
const CONTROLS_HEIGHT: u16 = 13;

/// Everything one game needs on screen. Dropped and rebuilt on restart.
pub struct App<T: GameTransport> {
    pub sync: SyncController<T>,
    pub surface: BoardSurface,
    pub gestures: GestureEngine,
    pub annotations: AnnotationOverlay,
    pub theme: Theme,
    /// Board placement from the last frame, used for mouse hit-testing.
    geometry: Option<BoardGeometry>,
    /// Square under the secondary button when it went down.
    arrow_start: Option<Square>,
}

impl<T: GameTransport> App<T> {
    pub fn new(sync: SyncController<T>, theme: Theme) -> Self {
        Self {
            sync,
            surface: BoardSurface::default(),
            gestures: GestureEngine::new(),
            annotations: AnnotationOverlay::new(),
            theme,
            geometry: None,
            arrow_start: None,
        }
    }

    pub fn geometry(&self) -> Option<BoardGeometry> {
        self.geometry
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(frame.area());
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(CONTROLS_HEIGHT)])
            .split(columns[1]);

        self.geometry = Some(BoardGeometry::for_area(columns[0]));

        frame.render_widget(
            BoardWidget::new(&self.surface, &self.annotations, &self.theme)
                .dragging(self.gestures.active()),
            columns[0],
        );
        frame.render_widget(
            GameInfoPanel {
                game_id: self.sync.game_id(),
                phase: self.sync.phase(),
                session: self.sync.session(),
                status_message: self.sync.status_message(),
                theme: &self.theme,
            },
            side[0],
        );
        frame.render_widget(ControlsPanel::new(self.sync.phase(), &self.theme), side[1]);
    }

    /// Handle the result of waiting on the server.
    pub fn on_remote(&mut self, message: Option<ClientResult<ServerMessage>>) -> SyncEvent {
        match message {
            Some(Ok(message)) => {
                tracing::debug!(kind = message.kind(), "Server message received");
                let event = self.sync.apply(message, &mut self.surface);
                match event {
                    SyncEvent::Initialized { .. } | SyncEvent::MoveApplied(_) => {
                        self.gestures.reconcile(self.sync.session(), &mut self.surface);
                    }
                    SyncEvent::GameOver { .. } => {
                        self.gestures.cancel(&mut self.surface);
                    }
                    _ => {}
                }
                event
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to read server message: {}", e);
                self.sync.set_status(e.to_string());
                SyncEvent::Rejected(e.to_string())
            }
            None => {
                self.gestures.cancel(&mut self.surface);
                self.sync.connection_closed();
                SyncEvent::Ignored
            }
        }
    }

    pub async fn on_event(&mut self, event: Event) -> AppAction {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => {
                self.on_mouse(mouse).await;
                AppAction::Continue
            }
            Event::FocusLost => {
                self.gestures.cancel(&mut self.surface);
                self.arrow_start = None;
                AppAction::Continue
            }
            _ => AppAction::Continue,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        let Some(command) = key_command(key) else {
            return AppAction::Continue;
        };
        match command {
            KeyCommand::Quit => AppAction::Quit,
            KeyCommand::ClearAnnotations => {
                self.gestures.cancel(&mut self.surface);
                self.annotations.clear();
                AppAction::Continue
            }
            KeyCommand::FlipBoard => {
                self.gestures.cancel(&mut self.surface);
                let orientation = self.surface.orientation().flipped();
                let grid = self.surface.grid();
                self.surface.draw(&grid, orientation);
                tracing::debug!(?orientation, "Board flipped");
                AppAction::Continue
            }
            KeyCommand::ToggleTheme => {
                self.theme.toggle();
                AppAction::Continue
            }
            KeyCommand::NewGame => match self.sync.phase() {
                SyncPhase::Terminated(_) => AppAction::NewGame,
                _ => AppAction::Continue,
            },
        }
    }

    pub async fn on_mouse(&mut self, mouse: MouseEvent) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let hit = geometry.hit(mouse.column, mouse.row);
        let pointer = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if hit.is_some() {
                    self.annotations.clear();
                }
                if let GestureOutcome::Started { origin, .. } = self.gestures.pointer_down(
                    hit,
                    pointer,
                    self.sync.session(),
                    &mut self.surface,
                ) {
                    tracing::debug!(%origin, "Piece lifted");
                    self.sync.clear_status();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.gestures.pointer_move(pointer);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                match self
                    .gestures
                    .pointer_up(hit, self.sync.session(), &mut self.surface)
                {
                    GestureOutcome::Committed(mv) => self.submit(mv).await,
                    GestureOutcome::Cancelled(GestureRejection::OutOfTurn) => {
                        self.sync.set_status(GestureRejection::OutOfTurn.to_string());
                    }
                    _ => {}
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.arrow_start = self.square_at(hit);
            }
            MouseEventKind::Up(MouseButton::Right) => {
                let (Some(from), Some(to)) = (self.arrow_start.take(), self.square_at(hit)) else {
                    return;
                };
                if from == to {
                    self.annotations.toggle_mark(from);
                } else if let Some(arrow) = self.annotations.add_arrow(from, to) {
                    tracing::debug!(?arrow, "Arrow drawn");
                }
            }
            _ => {}
        }
    }

    fn square_at(&self, hit: Option<PointerHit>) -> Option<Square> {
        hit.and_then(|hit| self.surface.cell(hit.row, hit.col))
            .map(|cell| cell.square)
    }

    async fn submit(&mut self, mv: UciMove) {
        if let Err(e) = self.sync.submit_move(mv).await {
            tracing::warn!(%mv, "Move not sent: {}", e);
            self.sync.set_status(e.to_string());
            // Put the board back to the last position the server confirmed.
            if let Some(position) = self.sync.session().position() {
                let orientation = self.surface.orientation();
                self.surface.draw(position.grid(), orientation);
                self.surface.clear_highlights(HighlightKind::LastMove);
            }
        }
    }
}
