//! Display-side board model.
//!
//! The surface is what the board widget paints: one [`Cell`] per grid
//! position with its square, shade and occupant, plus the highlight
//! sets. It is redrawn wholesale from a [`Grid`] whenever the server
//! sends a position, and patched in place for speculative moves.

use std::collections::HashMap;

use chess::{castling_rook_move, square_at, to_grid, Grid, Orientation, Piece, Square, UciMove};

const SIZE: usize = chess::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Selected,
    LegalDestination,
    LastMove,
}

impl HighlightKind {
    /// Highest precedence first.
    pub const BY_PRECEDENCE: [Self; 3] = [Self::Selected, Self::LegalDestination, Self::LastMove];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub square: Square,
    pub shade: Shade,
    pub occupant: Option<Piece>,
}

#[derive(Debug, Clone)]
pub struct BoardSurface {
    orientation: Orientation,
    cells: [[Cell; SIZE]; SIZE],
    highlights: HashMap<HighlightKind, Vec<Square>>,
}

impl BoardSurface {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            cells: blank_cells(orientation),
            highlights: HashMap::new(),
        }
    }

    /// Rebuild every cell from `grid` as seen from `orientation`.
    /// Highlights are kept; they are tracked by square, not by cell.
    pub fn draw(&mut self, grid: &Grid, orientation: Orientation) {
        self.orientation = orientation;
        self.cells = blank_cells(orientation);
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.occupant = grid.piece_on(cell.square);
            }
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    /// Cells in display order, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (row, col, cell))
        })
    }

    pub fn occupant(&self, square: Square) -> Option<Piece> {
        let (row, col) = to_grid(square, self.orientation);
        self.cells[row][col].occupant
    }

    /// Move the occupant of `from` onto `to`, replacing any piece there.
    /// Returns false when `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        let (from_row, from_col) = to_grid(from, self.orientation);
        let Some(piece) = self.cells[from_row][from_col].occupant.take() else {
            return false;
        };
        let (to_row, to_col) = to_grid(to, self.orientation);
        self.cells[to_row][to_col].occupant = Some(piece);
        true
    }

    /// Show a move: relocate the piece, bring the rook along when the
    /// move is a castle, and mark both squares as the last move.
    pub fn apply_move(&mut self, mv: UciMove) {
        if !self.relocate(mv.from, mv.to) {
            tracing::debug!(%mv, "No piece on origin square, nothing to relocate");
        }
        if let Some(rook) = castling_rook_move(mv) {
            self.relocate(rook.from, rook.to);
        }
        self.clear_highlights(HighlightKind::LastMove);
        self.highlight([mv.from, mv.to], HighlightKind::LastMove);
    }

    /// Add squares to a highlight set.
    pub fn highlight(&mut self, squares: impl IntoIterator<Item = Square>, kind: HighlightKind) {
        let set = self.highlights.entry(kind).or_default();
        for square in squares {
            if !set.contains(&square) {
                set.push(square);
            }
        }
    }

    pub fn clear_highlights(&mut self, kind: HighlightKind) {
        self.highlights.remove(&kind);
    }

    pub fn clear_all_highlights(&mut self) {
        self.highlights.clear();
    }

    pub fn highlighted(&self, kind: HighlightKind) -> &[Square] {
        self.highlights.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The highlight a square is painted with, if any.
    pub fn highlight_of(&self, square: Square) -> Option<HighlightKind> {
        HighlightKind::BY_PRECEDENCE
            .into_iter()
            .find(|kind| self.highlighted(*kind).contains(&square))
    }

    /// Current placement as shown, in canonical (white) order.
    pub fn grid(&self) -> Grid {
        let mut grid = Grid::empty();
        for (_, _, cell) in self.cells() {
            grid.put(cell.square, cell.occupant);
        }
        grid
    }
}

impl Default for BoardSurface {
    fn default() -> Self {
        Self::new(Orientation::White)
    }
}

fn blank_cells(orientation: Orientation) -> [[Cell; SIZE]; SIZE] {
    std::array::from_fn(|row| {
        std::array::from_fn(|col| Cell {
            square: square_at(row, col, orientation),
            shade: if (row + col) % 2 == 0 {
                Shade::Light
            } else {
                Shade::Dark
            },
            occupant: None,
        })
    })
}
