//! 8x8 piece placement decoded from the first FEN field.
//!
//! Rows are stored in FEN reading order: row 0 is rank 8, column 0 is
//! file a. The grid never knows how it is displayed; the mapping onto
//! screen cells lives in [`crate::coords`].

use std::fmt;
use std::str::FromStr;

use cozy_chess::Square;

use crate::coords::{to_grid, Orientation};
use crate::fen::PositionError;
use crate::types::Piece;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a placement field such as `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn decode(placement: &str) -> Result<Self, PositionError> {
        if placement.is_empty() {
            return Err(PositionError::Empty);
        }

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(PositionError::RankCount(ranks.len()));
        }

        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank_str.chars() {
                match c.to_digit(10) {
                    Some(skip @ 1..=8) => col += skip as usize,
                    _ => {
                        let piece = Piece::from_symbol(c).ok_or(PositionError::InvalidSymbol(c))?;
                        if col < BOARD_SIZE {
                            cells[row][col] = Some(piece);
                        }
                        col += 1;
                    }
                }
                if col > BOARD_SIZE {
                    break;
                }
            }
            if col != BOARD_SIZE {
                return Err(PositionError::RankLength {
                    rank: BOARD_SIZE - row,
                    cells: col,
                });
            }
        }

        Ok(Self { cells })
    }

    /// Encode back to a placement field using minimal empty-run digits.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(71);
        for (row, rank) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for cell in rank {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
        }
        out
    }

    /// Piece at a raw grid cell; out-of-range cells read as empty.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn set(&mut self, row: usize, col: usize, piece: Option<Piece>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = piece;
        }
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let (row, col) = to_grid(square, Orientation::White);
        self.cells[row][col]
    }

    pub fn put(&mut self, square: Square, piece: Option<Piece>) {
        let (row, col) = to_grid(square, Orientation::White);
        self.cells[row][col] = piece;
    }

    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let (row, col) = to_grid(square, Orientation::White);
        self.cells[row][col].take()
    }

    /// Move whatever stands on `from` to `to`, capturing any occupant.
    /// Returns false when `from` is empty.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        match self.take(from) {
            Some(piece) => {
                self.put(to, Some(piece));
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl FromStr for Grid {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
