//! Canonical piece and color types for the project.

use serde::{Deserialize, Serialize};

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Project-owned color type.
///
/// Serialized as `"white"` / `"black"`; the single-letter forms used by
/// the FEN side-to-move field are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[serde(alias = "w")]
    White,
    #[serde(alias = "b")]
    Black,
}

/// A colored piece as it sits on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn to_char_lower(self) -> char {
        self.to_char_upper().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The side-to-move letter used in FEN.
    pub fn to_fen_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Parse a placement letter: uppercase is white, lowercase is black.
    pub fn from_symbol(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { kind, color })
    }

    /// The placement letter for this piece.
    pub fn symbol(self) -> char {
        match self.color {
            PieceColor::White => self.kind.to_char_upper(),
            PieceColor::Black => self.kind.to_char_lower(),
        }
    }

    /// Unicode figurine. White pieces use the outlined set, black the filled set.
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (PieceColor::White, PieceKind::King) => '♔',
            (PieceColor::White, PieceKind::Queen) => '♕',
            (PieceColor::White, PieceKind::Rook) => '♖',
            (PieceColor::White, PieceKind::Bishop) => '♗',
            (PieceColor::White, PieceKind::Knight) => '♘',
            (PieceColor::White, PieceKind::Pawn) => '♙',
            (PieceColor::Black, PieceKind::King) => '♚',
            (PieceColor::Black, PieceKind::Queen) => '♛',
            (PieceColor::Black, PieceKind::Rook) => '♜',
            (PieceColor::Black, PieceKind::Bishop) => '♝',
            (PieceColor::Black, PieceKind::Knight) => '♞',
            (PieceColor::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl From<cozy_chess::Color> for PieceColor {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Self::White,
            cozy_chess::Color::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_case_encodes_color() {
        let white_knight = Piece::from_symbol('N').unwrap();
        assert_eq!(white_knight, Piece::new(PieceKind::Knight, PieceColor::White));

        let black_queen = Piece::from_symbol('q').unwrap();
        assert_eq!(black_queen, Piece::new(PieceKind::Queen, PieceColor::Black));
    }

    #[test]
    fn test_symbol_rejects_unknown_letters() {
        assert_eq!(Piece::from_symbol('x'), None);
        assert_eq!(Piece::from_symbol('3'), None);
        assert_eq!(Piece::from_symbol(' '), None);
    }

    #[test]
    fn test_symbol_round_trip_all_pieces() {
        for c in "PNBRQKpnbrqk".chars() {
            assert_eq!(Piece::from_symbol(c).unwrap().symbol(), c);
        }
    }

    #[test]
    fn test_glyph_uses_filled_set_for_black() {
        assert_eq!(Piece::from_symbol('r').unwrap().glyph(), '♜');
        assert_eq!(Piece::from_symbol('R').unwrap().glyph(), '♖');
    }

    #[test]
    fn test_color_serde_accepts_short_and_long_forms() {
        let long: PieceColor = serde_json::from_str("\"black\"").unwrap();
        let short: PieceColor = serde_json::from_str("\"w\"").unwrap();
        assert_eq!(long, PieceColor::Black);
        assert_eq!(short, PieceColor::White);
        assert_eq!(serde_json::to_string(&PieceColor::White).unwrap(), "\"white\"");
    }

    #[test]
    fn test_opposite_color() {
        assert_eq!(PieceColor::White.opposite(), PieceColor::Black);
        assert_eq!(PieceColor::Black.opposite(), PieceColor::White);
    }
}
