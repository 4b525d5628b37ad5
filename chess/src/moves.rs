//! The set of legal moves the server publishes with every position.

use std::collections::HashSet;

use cozy_chess::Square;

use crate::uci::UciMove;

/// Legal moves for the side to move.
///
/// Entries the client cannot represent (promotions) are kept aside in
/// [`unsupported`](Self::unsupported). They still count towards
/// [`len`](Self::len) so an all-promotion position is not mistaken for
/// the end of the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveSet {
    moves: HashSet<UciMove>,
    unsupported: Vec<String>,
}

impl LegalMoveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strings<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in moves {
            let raw = raw.as_ref();
            match raw.parse::<UciMove>() {
                Ok(mv) => {
                    set.moves.insert(mv);
                }
                Err(_) => set.unsupported.push(raw.to_string()),
            }
        }
        set
    }

    pub fn contains(&self, mv: &UciMove) -> bool {
        self.moves.contains(mv)
    }

    /// Destinations reachable from `origin`, ordered rank then file.
    pub fn destinations_from(&self, origin: Square) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .moves
            .iter()
            .filter(|mv| mv.from == origin)
            .map(|mv| mv.to)
            .collect();
        sort_squares(&mut squares);
        squares
    }

    pub fn unsupported(&self) -> &[String] {
        &self.unsupported
    }

    pub fn len(&self) -> usize {
        self.moves.len() + self.unsupported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sort_squares(squares: &mut [Square]) {
    squares.sort_by_key(|sq| (sq.rank() as u8, sq.file() as u8));
}

impl FromIterator<UciMove> for LegalMoveSet {
    fn from_iter<I: IntoIterator<Item = UciMove>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
            unsupported: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening_moves() -> LegalMoveSet {
        LegalMoveSet::from_strings([
            "a2a3", "a2a4", "b1a3", "b1c3", "e2e3", "e2e4", "g1f3", "g1h3",
        ])
    }

    #[test]
    fn test_contains() {
        let set = opening_moves();
        assert!(set.contains(&"e2e4".parse().unwrap()));
        assert!(!set.contains(&"e2e5".parse().unwrap()));
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_destinations_from() {
        let set = opening_moves();
        assert_eq!(set.destinations_from(Square::E2), vec![Square::E3, Square::E4]);
        assert_eq!(set.destinations_from(Square::G1), vec![Square::F3, Square::H3]);
        assert!(set.destinations_from(Square::E7).is_empty());
    }

    #[test]
    fn test_promotions_are_kept_aside() {
        let set = LegalMoveSet::from_strings(["e7e8q", "e7e8n", "h2h3"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.unsupported(), ["e7e8q", "e7e8n"]);
        assert!(set.contains(&"h2h3".parse().unwrap()));
        assert!(set.destinations_from(Square::E7).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let set = LegalMoveSet::from_strings(Vec::<String>::new());
        assert!(set.is_empty());
        assert!(set.destinations_from(Square::E2).is_empty());
    }
}
