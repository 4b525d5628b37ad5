//! Mapping between board squares and on-screen grid cells.
//!
//! A grid cell is `(row, col)` with row 0 at the top of the display.
//! From white's point of view rank 8 is the top row and file a the left
//! column. Black's view rotates the board half a turn, so both axes flip.

use cozy_chess::{File, Rank, Square};

use crate::grid::BOARD_SIZE;
use crate::types::PieceColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl From<PieceColor> for Orientation {
    fn from(color: PieceColor) -> Self {
        match color {
            PieceColor::White => Self::White,
            PieceColor::Black => Self::Black,
        }
    }
}

/// Square shown at a grid cell, or `None` when the cell is off the board.
pub fn to_square(row: usize, col: usize, orientation: Orientation) -> Option<Square> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    Some(square_at(row, col, orientation))
}

/// Same as [`to_square`] for a cell already known to be on the board.
///
/// # Panics
///
/// Panics if `row` or `col` is 8 or more.
pub fn square_at(row: usize, col: usize, orientation: Orientation) -> Square {
    let (file, rank) = match orientation {
        Orientation::White => (col, BOARD_SIZE - 1 - row),
        Orientation::Black => (BOARD_SIZE - 1 - col, row),
    };
    Square::new(File::index(file), Rank::index(rank))
}

/// Grid cell at which a square is shown.
pub fn to_grid(square: Square, orientation: Orientation) -> (usize, usize) {
    let file = square.file() as usize;
    let rank = square.rank() as usize;
    match orientation {
        Orientation::White => (BOARD_SIZE - 1 - rank, file),
        Orientation::Black => (rank, BOARD_SIZE - 1 - file),
    }
}

/// Parse a square in algebraic notation ("e4"). Lowercase file only.
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].checked_sub(b'a')? as usize;
    let rank = bytes[1].checked_sub(b'1')? as usize;
    if file >= BOARD_SIZE || rank >= BOARD_SIZE {
        return None;
    }
    Some(Square::new(File::index(file), Rank::index(rank)))
}

/// Format a square in algebraic notation.
pub fn format_square(square: Square) -> String {
    square.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_white_view_corners() {
        assert_eq!(to_square(0, 0, Orientation::White), Some(Square::A8));
        assert_eq!(to_square(7, 7, Orientation::White), Some(Square::H1));
        assert_eq!(to_square(7, 4, Orientation::White), Some(Square::E1));
    }

    #[test]
    fn test_black_view_flips_both_axes() {
        assert_eq!(to_square(0, 0, Orientation::Black), Some(Square::H1));
        assert_eq!(to_square(7, 7, Orientation::Black), Some(Square::A8));
        assert_eq!(to_grid(Square::E1, Orientation::Black), (0, 3));
    }

    #[test]
    fn test_off_board_cells() {
        assert_eq!(to_square(8, 0, Orientation::White), None);
        assert_eq!(to_square(0, 8, Orientation::Black), None);
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("e4"), Some(Square::E4));
        assert_eq!(parse_square("a1"), Some(Square::A1));
        assert_eq!(parse_square("h8"), Some(Square::H8));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a0"), None);
        assert_eq!(parse_square("E4"), None);
        assert_eq!(parse_square("e"), None);
        assert_eq!(parse_square("e44"), None);
        assert_eq!(parse_square(""), None);
    }

    #[test]
    fn test_format_square() {
        assert_eq!(format_square(Square::G1), "g1");
        assert_eq!(format_square(Square::C8), "c8");
    }

    #[test]
    fn test_orientation_from_color() {
        assert_eq!(Orientation::from(PieceColor::Black), Orientation::Black);
        assert_eq!(Orientation::White.flipped(), Orientation::Black);
    }

    fn arb_orientation() -> impl Strategy<Value = Orientation> {
        prop_oneof![Just(Orientation::White), Just(Orientation::Black)]
    }

    proptest! {
        #[test]
        fn prop_grid_square_round_trip(row in 0usize..8, col in 0usize..8, o in arb_orientation()) {
            let square = to_square(row, col, o).unwrap();
            prop_assert_eq!(to_grid(square, o), (row, col));
        }

        #[test]
        fn prop_orientations_are_point_reflections(row in 0usize..8, col in 0usize..8) {
            let white = to_square(row, col, Orientation::White).unwrap();
            let black = to_square(7 - row, 7 - col, Orientation::Black).unwrap();
            prop_assert_eq!(white, black);
        }

        #[test]
        fn prop_square_notation_round_trip(idx in 0usize..64) {
            let square = Square::index(idx);
            prop_assert_eq!(parse_square(&format_square(square)), Some(square));
        }
    }
}
