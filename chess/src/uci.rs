//! UCI move strings ("e2e4") as exchanged with the game server.

use std::fmt;
use std::str::FromStr;

use cozy_chess::Square;

use crate::coords::parse_square;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Move must be four characters: {0:?}")]
    Length(String),
    #[error("Promotion moves are not supported: {0:?}")]
    Promotion(String),
    #[error("Invalid square in move: {0:?}")]
    InvalidSquare(String),
}

/// A from/to pair. Promotion suffixes are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
}

impl UciMove {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parse only the origin and destination of a server move, ignoring
    /// any promotion suffix. Used to display moves the board did not make.
    pub fn from_move_prefix(s: &str) -> Result<Self, MoveError> {
        match s.get(..4) {
            Some(prefix) => prefix.parse(),
            None => Err(MoveError::Length(s.to_string())),
        }
    }

    pub fn is_castling(&self) -> bool {
        castling_rook_move(*self).is_some()
    }
}

impl FromStr for UciMove {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 5 && s.is_char_boundary(4) && matches!(&s[4..], "q" | "r" | "b" | "n") {
            return Err(MoveError::Promotion(s.to_string()));
        }
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveError::Length(s.to_string()));
        }
        let from = parse_square(&s[..2]).ok_or_else(|| MoveError::InvalidSquare(s.to_string()))?;
        let to = parse_square(&s[2..]).ok_or_else(|| MoveError::InvalidSquare(s.to_string()))?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Rook relocation that accompanies a castling king move.
///
/// Only the four standard king moves match; anything else, including a
/// king stepping from e1 to f1, returns `None`.
pub fn castling_rook_move(king_move: UciMove) -> Option<UciMove> {
    let (from, to) = match (king_move.from, king_move.to) {
        (Square::E1, Square::G1) => (Square::H1, Square::F1),
        (Square::E1, Square::C1) => (Square::A1, Square::D1),
        (Square::E8, Square::G8) => (Square::H8, Square::F8),
        (Square::E8, Square::C8) => (Square::A8, Square::D8),
        _ => return None,
    };
    Some(UciMove::new(from, to))
}
