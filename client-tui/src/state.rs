use chess::{LegalMoveSet, Orientation, PieceColor, Position, UciMove};
use chess_client::{
    ClientError, ClientMessage, ClientResult, GameTransport, InitialPayload, MovePayload,
    ServerMessage,
};

use crate::ui::surface::{BoardSurface, HighlightKind};

/// What the client knows about the game.
/// The server is the source of truth. The client stores the latest
/// position and legal moves it was sent and never computes chess rules.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    local_color: Option<PieceColor>,
    position: Option<Position>,
    legal_moves: LegalMoveSet,
    /// Move sent to the server and not yet echoed back.
    pending_move: Option<UciMove>,
}

impl SessionState {
    pub fn new(local_color: PieceColor, position: Position, legal_moves: LegalMoveSet) -> Self {
        Self {
            local_color: Some(local_color),
            position: Some(position),
            legal_moves,
            pending_move: None,
        }
    }

    pub fn local_color(&self) -> Option<PieceColor> {
        self.local_color
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn side_to_move(&self) -> Option<PieceColor> {
        self.position.as_ref().map(Position::side_to_move)
    }

    pub fn legal_moves(&self) -> &LegalMoveSet {
        &self.legal_moves
    }

    pub fn pending_move(&self) -> Option<UciMove> {
        self.pending_move
    }

    /// True when the side to move is ours and no move of ours is in flight.
    pub fn is_local_turn(&self) -> bool {
        self.pending_move.is_none()
            && matches!(
                (self.local_color, self.side_to_move()),
                (Some(local), Some(side)) if local == side
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    GameOver { loser: PieceColor },
    ConnectionClosed,
}

impl TerminationReason {
    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            Self::GameOver { loser } => Some(loser.opposite()),
            Self::ConnectionClosed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Connecting,
    Synced,
    Terminated(TerminationReason),
}

/// Result of applying one server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Initialized { local_color: PieceColor },
    MoveApplied(UciMove),
    GameOver { loser: PieceColor },
    ServerError(String),
    /// The message was dropped and state left as it was.
    Rejected(String),
    Ignored,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Not your turn")]
    OutOfTurn,
    #[error("Waiting for the game to start")]
    NotSynced,
    #[error("The game has ended")]
    SessionTerminated,
    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// Keeps the local session in step with the server and gates outgoing moves.
pub struct SyncController<T: GameTransport> {
    transport: T,
    transport_open: bool,
    game_id: String,
    phase: SyncPhase,
    session: SessionState,
    status_message: Option<String>,
}

impl<T: GameTransport> SyncController<T> {
    pub fn new(transport: T, game_id: impl Into<String>) -> Self {
        Self {
            transport,
            transport_open: true,
            game_id: game_id.into(),
            phase: SyncPhase::Connecting,
            session: SessionState::default(),
            status_message: None,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Wait for the next server message. Never resolves once the
    /// connection is gone, so it can sit in a `select!` unconditionally.
    pub async fn recv(&mut self) -> Option<ClientResult<ServerMessage>> {
        if !self.transport_open {
            return std::future::pending().await;
        }
        let message = self.transport.recv().await;
        if message.is_none() {
            self.transport_open = false;
        }
        message
    }

    /// Apply one server message to the session and the surface.
    pub fn apply(&mut self, message: ServerMessage, surface: &mut BoardSurface) -> SyncEvent {
        match message {
            ServerMessage::Initial(payload) => self.apply_initial(payload, surface),
            ServerMessage::Move(payload) => self.apply_move(payload, surface),
            ServerMessage::Error(payload) => self.apply_error(payload.message(), surface),
            ServerMessage::GameOver(loser) => self.finish(loser),
            ServerMessage::Unknown(kind) => {
                tracing::warn!(%kind, "Unhandled message type");
                SyncEvent::Ignored
            }
        }
    }

    fn apply_initial(&mut self, payload: InitialPayload, surface: &mut BoardSurface) -> SyncEvent {
        if let SyncPhase::Terminated(_) = self.phase {
            tracing::warn!("Initial message after the game ended, ignoring");
            return SyncEvent::Ignored;
        }

        let position = match Position::parse(&payload.fen) {
            Ok(position) => position,
            Err(e) => return self.reject(format!("Malformed position from server: {e}")),
        };
        let legal_moves = legal_move_set(&payload.moves);

        tracing::info!(
            game_id = %self.game_id,
            player = %payload.player,
            fen = %position,
            legal_moves = legal_moves.len(),
            "Game initialised"
        );

        surface.clear_all_highlights();
        surface.draw(position.grid(), Orientation::from(payload.player));

        self.session = SessionState::new(payload.player, position, legal_moves);
        self.phase = SyncPhase::Synced;
        self.status_message = None;

        SyncEvent::Initialized {
            local_color: payload.player,
        }
    }

    fn apply_move(&mut self, payload: MovePayload, surface: &mut BoardSurface) -> SyncEvent {
        match self.phase {
            SyncPhase::Synced => {}
            SyncPhase::Connecting => {
                tracing::warn!(mv = %payload.last_move, "Move received before the initial state");
                return SyncEvent::Ignored;
            }
            SyncPhase::Terminated(_) => {
                tracing::debug!(mv = %payload.last_move, "Move received after the game ended");
                return SyncEvent::Ignored;
            }
        }

        let position = match Position::parse(&payload.fen) {
            Ok(position) => position,
            Err(e) => return self.reject(format!("Malformed position from server: {e}")),
        };
        let mv = match UciMove::from_move_prefix(&payload.last_move) {
            Ok(mv) => mv,
            Err(e) => return self.reject(format!("Malformed move from server: {e}")),
        };
        let legal_moves = legal_move_set(&payload.moves);

        tracing::info!(%mv, fen = %position, legal_moves = legal_moves.len(), "Move applied");

        surface.apply_move(mv);
        surface.draw(position.grid(), surface.orientation());

        let loser = position.side_to_move();
        self.session.position = Some(position);
        self.session.legal_moves = legal_moves;
        self.session.pending_move = None;
        self.status_message = None;

        if self.session.legal_moves.is_empty() {
            return self.finish(loser);
        }
        SyncEvent::MoveApplied(mv)
    }

    fn apply_error(&mut self, message: &str, surface: &mut BoardSurface) -> SyncEvent {
        tracing::warn!(%message, "Server reported an error");

        // The server refused our move; put the board back the way it last said.
        if let Some(pending) = self.session.pending_move.take() {
            tracing::info!(mv = %pending, "Reverting unconfirmed move");
            if let Some(position) = &self.session.position {
                surface.draw(position.grid(), surface.orientation());
                surface.clear_highlights(HighlightKind::LastMove);
            }
        }

        self.status_message = Some(message.to_string());
        SyncEvent::ServerError(message.to_string())
    }

    fn finish(&mut self, loser: PieceColor) -> SyncEvent {
        if let SyncPhase::Terminated(reason) = self.phase {
            tracing::debug!(?reason, "Game already terminated");
            return SyncEvent::Ignored;
        }
        tracing::info!(game_id = %self.game_id, %loser, "Game over");
        self.phase = SyncPhase::Terminated(TerminationReason::GameOver { loser });
        self.session.pending_move = None;
        SyncEvent::GameOver { loser }
    }

    fn reject(&mut self, reason: String) -> SyncEvent {
        tracing::warn!(%reason, "Rejected server message");
        self.status_message = Some(reason.clone());
        SyncEvent::Rejected(reason)
    }

    /// Record that the server went away.
    pub fn connection_closed(&mut self) {
        self.transport_open = false;
        if let SyncPhase::Terminated(_) = self.phase {
            return;
        }
        tracing::info!(game_id = %self.game_id, "Connection closed");
        self.phase = SyncPhase::Terminated(TerminationReason::ConnectionClosed);
        self.status_message = Some("Connection to server lost".to_string());
    }

    /// Send a move the player has committed on the board.
    pub async fn submit_move(&mut self, mv: UciMove) -> Result<(), SyncError> {
        match self.phase {
            SyncPhase::Connecting => return Err(SyncError::NotSynced),
            SyncPhase::Terminated(_) => return Err(SyncError::SessionTerminated),
            SyncPhase::Synced => {}
        }
        if !self.session.is_local_turn() {
            tracing::debug!(%mv, "Not your turn");
            return Err(SyncError::OutOfTurn);
        }
        let player = self.session.local_color.ok_or(SyncError::NotSynced)?;

        self.transport
            .send(&ClientMessage::new_move(mv, player))
            .await?;
        self.session.pending_move = Some(mv);

        tracing::info!(%mv, %player, "Move submitted");
        Ok(())
    }

    pub async fn close(&mut self) {
        if !self.transport_open {
            return;
        }
        self.transport_open = false;
        if let Err(e) = self.transport.close().await {
            tracing::debug!("Error closing connection: {}", e);
        }
    }
}

fn legal_move_set(moves: &[String]) -> LegalMoveSet {
    let set = LegalMoveSet::from_strings(moves);
    if !set.unsupported().is_empty() {
        tracing::warn!(moves = ?set.unsupported(), "Server sent moves the board cannot play");
    }
    set
}
