//! Position strings as sent by the game server.
//!
//! Only the placement and side-to-move fields are interpreted. Castling
//! rights, en-passant target and the move clocks are carried as an
//! opaque tail so a parsed position prints back exactly as received.

use std::fmt;
use std::str::FromStr;

use crate::grid::Grid;
use crate::types::PieceColor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Empty position string")]
    Empty,
    #[error("Expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("Rank {rank} describes {cells} cells, expected 8")]
    RankLength { rank: usize, cells: usize },
    #[error("Invalid piece symbol: {0:?}")]
    InvalidSymbol(char),
    #[error("Missing side-to-move field")]
    MissingSideToMove,
    #[error("Invalid side-to-move field: {0:?}")]
    InvalidSideToMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: Grid,
    side_to_move: PieceColor,
    rest: String,
}

impl Position {
    pub fn parse(fen: &str) -> Result<Self, PositionError> {
        let (placement, tail) = split_field(fen.trim());
        let grid = Grid::decode(placement)?;

        let (side, rest) = split_field(tail.trim_start());
        let mut side_chars = side.chars();
        let side_to_move = match (side_chars.next(), side_chars.next()) {
            (None, _) => return Err(PositionError::MissingSideToMove),
            (Some(c), None) => PieceColor::from_fen_char(c)
                .ok_or_else(|| PositionError::InvalidSideToMove(side.to_string()))?,
            _ => return Err(PositionError::InvalidSideToMove(side.to_string())),
        };

        Ok(Self {
            grid,
            side_to_move,
            rest: rest.trim_start().to_string(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    /// Castling, en-passant and clock fields, untouched.
    pub fn auxiliary(&self) -> &str {
        &self.rest
    }
}

fn split_field(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.grid, self.side_to_move.to_fen_char())?;
        if !self.rest.is_empty() {
            write!(f, " {}", self.rest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Square;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_parse_start_position() {
        let pos = Position::parse(START_FEN).unwrap();
        assert_eq!(pos.side_to_move(), PieceColor::White);
        assert_eq!(pos.auxiliary(), "KQkq - 0 1");
        assert_eq!(pos.grid().piece_count(), 32);
    }

    #[test]
    fn test_display_preserves_opaque_fields() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
        assert_eq!(Position::parse(fen).unwrap().to_string(), fen);
    }

    #[test]
    fn test_black_to_move() {
        let pos: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse()
            .unwrap();
        assert_eq!(pos.side_to_move(), PieceColor::Black);
        assert!(pos.grid().piece_on(Square::E4).is_some());
    }

    #[test]
    fn test_placement_and_side_only() {
        let pos = Position::parse("8/8/8/8/8/8/8/8 b").unwrap();
        assert_eq!(pos.auxiliary(), "");
        assert_eq!(pos.to_string(), "8/8/8/8/8/8/8/8 b");
    }

    #[test]
    fn test_missing_side_to_move_is_an_error() {
        assert_eq!(
            Position::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::MissingSideToMove)
        );
    }

    #[test]
    fn test_invalid_side_to_move() {
        assert_eq!(
            Position::parse("8/8/8/8/8/8/8/8 white"),
            Err(PositionError::InvalidSideToMove("white".to_string()))
        );
        assert_eq!(
            Position::parse("8/8/8/8/8/8/8/8 x"),
            Err(PositionError::InvalidSideToMove("x".to_string()))
        );
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(Position::parse("   "), Err(PositionError::Empty));
    }

    #[test]
    fn test_bad_placement_propagates() {
        assert_eq!(
            Position::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w"),
            Err(PositionError::RankCount(7))
        );
    }
}
