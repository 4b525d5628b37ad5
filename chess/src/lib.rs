pub mod coords;
pub mod fen;
pub mod grid;
pub mod moves;
pub mod types;
pub mod uci;

pub use coords::{format_square, parse_square, square_at, to_grid, to_square, Orientation};
pub use fen::{Position, PositionError};
pub use grid::{Grid, BOARD_SIZE};
pub use moves::LegalMoveSet;
pub use types::{Piece, PieceColor, PieceKind};
pub use uci::{castling_rook_move, MoveError, UciMove};

pub use cozy_chess::{File, Rank, Square};
