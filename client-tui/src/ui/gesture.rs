//! Drag-and-drop of pieces with the primary mouse button.
//!
//! A drag starts on a cell holding one of the local player's pieces and
//! resolves on release: it commits only when the move is in the legal
//! set and it is the local player's turn. Every other release snaps the
//! piece back, which needs no work because the surface was never touched.

use chess::{PieceColor, Square, UciMove};

use crate::state::SessionState;
use crate::ui::surface::{BoardSurface, HighlightKind};

/// Where a pointer event landed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerHit {
    pub row: usize,
    pub col: usize,
    /// Offset of the pointer inside the cell, in terminal columns/rows.
    pub offset: (u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    pub origin: Square,
    pub piece: chess::Piece,
    /// Grab point inside the origin cell, kept so the piece does not jump.
    pub pointer_offset: (u16, u16),
    /// Last known pointer position in terminal coordinates.
    pub pointer: (u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GestureRejection {
    #[error("Released outside the board")]
    OffBoard,
    #[error("Illegal move {0}")]
    IllegalMove(UciMove),
    #[error("Not your turn")]
    OutOfTurn,
    #[error("Drag cancelled")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Started {
        origin: Square,
        destinations: Vec<Square>,
    },
    Moved,
    Committed(UciMove),
    Cancelled(GestureRejection),
}

#[derive(Debug, Default)]
pub struct GestureEngine {
    state: DragState,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Primary button pressed at `pointer`.
    pub fn pointer_down(
        &mut self,
        hit: Option<PointerHit>,
        pointer: (u16, u16),
        session: &SessionState,
        surface: &mut BoardSurface,
    ) -> GestureOutcome {
        if self.is_dragging() {
            return GestureOutcome::Ignored;
        }
        let Some(hit) = hit else {
            return GestureOutcome::Ignored;
        };
        let Some(cell) = surface.cell(hit.row, hit.col).copied() else {
            return GestureOutcome::Ignored;
        };
        let Some(piece) = cell.occupant else {
            return GestureOutcome::Ignored;
        };
        if !owns(session.local_color(), piece.color) {
            tracing::debug!(square = %cell.square, "Not your piece");
            return GestureOutcome::Ignored;
        }

        let origin = cell.square;
        let destinations = session.legal_moves().destinations_from(origin);

        surface.clear_highlights(HighlightKind::Selected);
        surface.clear_highlights(HighlightKind::LegalDestination);
        surface.highlight([origin], HighlightKind::Selected);
        surface.highlight(destinations.iter().copied(), HighlightKind::LegalDestination);

        self.state = DragState::Dragging(ActiveDrag {
            origin,
            piece,
            pointer_offset: hit.offset,
            pointer,
        });

        tracing::debug!(%origin, destinations = destinations.len(), "Drag started");
        GestureOutcome::Started {
            origin,
            destinations,
        }
    }

    /// Pointer moved with the primary button held.
    pub fn pointer_move(&mut self, pointer: (u16, u16)) -> GestureOutcome {
        match &mut self.state {
            DragState::Dragging(drag) => {
                drag.pointer = pointer;
                GestureOutcome::Moved
            }
            DragState::Idle => GestureOutcome::Ignored,
        }
    }

    /// Primary button released. `hit` is `None` when off the board.
    pub fn pointer_up(
        &mut self,
        hit: Option<PointerHit>,
        session: &SessionState,
        surface: &mut BoardSurface,
    ) -> GestureOutcome {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return GestureOutcome::Ignored;
        };

        surface.clear_highlights(HighlightKind::Selected);
        surface.clear_highlights(HighlightKind::LegalDestination);

        let Some(destination) = hit
            .and_then(|hit| surface.cell(hit.row, hit.col))
            .map(|cell| cell.square)
        else {
            return cancelled(GestureRejection::OffBoard);
        };

        let candidate = UciMove::new(drag.origin, destination);
        if !session.legal_moves().contains(&candidate) {
            return cancelled(GestureRejection::IllegalMove(candidate));
        }
        if !session.is_local_turn() {
            return cancelled(GestureRejection::OutOfTurn);
        }

        surface.apply_move(candidate);
        tracing::debug!(mv = %candidate, "Move committed on board");
        GestureOutcome::Committed(candidate)
    }

    /// Bring a drag in progress in line with a fresh server position.
    ///
    /// The drag survives only while its piece still stands on the origin
    /// square; its destinations are then recomputed from the new legal
    /// moves. Otherwise the drag is cancelled.
    pub fn reconcile(
        &mut self,
        session: &SessionState,
        surface: &mut BoardSurface,
    ) -> GestureOutcome {
        let DragState::Dragging(drag) = self.state else {
            return GestureOutcome::Ignored;
        };
        if surface.occupant(drag.origin) != Some(drag.piece) {
            tracing::debug!(origin = %drag.origin, "Dragged piece replaced by server update");
            return self.cancel(surface);
        }

        let destinations = session.legal_moves().destinations_from(drag.origin);
        surface.clear_highlights(HighlightKind::LegalDestination);
        surface.highlight([drag.origin], HighlightKind::Selected);
        surface.highlight(destinations.iter().copied(), HighlightKind::LegalDestination);
        GestureOutcome::Started {
            origin: drag.origin,
            destinations,
        }
    }

    /// Abandon a drag in progress, e.g. on Escape or focus loss.
    pub fn cancel(&mut self, surface: &mut BoardSurface) -> GestureOutcome {
        if !self.is_dragging() {
            return GestureOutcome::Ignored;
        }
        self.state = DragState::Idle;
        surface.clear_highlights(HighlightKind::Selected);
        surface.clear_highlights(HighlightKind::LegalDestination);
        cancelled(GestureRejection::Aborted)
    }
}

fn owns(local: Option<PieceColor>, piece: PieceColor) -> bool {
    local == Some(piece)
}

fn cancelled(reason: GestureRejection) -> GestureOutcome {
    tracing::debug!(%reason, "Drag cancelled");
    GestureOutcome::Cancelled(reason)
}
