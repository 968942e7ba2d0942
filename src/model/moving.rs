//! Moves as coordinate deltas.
//!
//! A [`Move`] never touches a board itself. It only describes, through
//! [`Move::changes`], which squares receive which pieces; the
//! [`Board`](crate::model::board::Board) applies that delta and the check
//! checker reads through it without applying it.

use indexmap::IndexMap;

use crate::model::{Square, castling::CastlingRight, vectors::Vector};

/// An ordered change set.
///
/// `target => Some(source)` means "put the piece currently on `source` on
/// `target`", `target => None` means "clear `target`". Entries are applied
/// in insertion order, and sources are always read before they are cleared.
pub type Changes = IndexMap<Square, Option<Square>>;

/// A bare from/to pair, as produced by piece geometry or by a user
/// dragging a piece, before any board has been consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveDescription {
    pub from: Square,
    pub to: Square,
}

impl MoveDescription {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Full displacement.
    #[inline]
    pub fn vector(self) -> Vector {
        Vector(
            self.to.row() as i8 - self.from.row() as i8,
            self.to.col() as i8 - self.from.col() as i8,
        )
    }

    /// Displacement reduced to a single step along the same line.
    #[inline]
    pub fn sub_vector(self) -> Vector {
        self.vector().step()
    }
}

/// Representation of a concrete move on a concrete board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Any move, capturing or not, that relocates exactly one piece.
    Classic { from: Square, to: Square },
    /// King and rook relocate together.
    Castle(CastlingRight),
    /// Pawn capture onto an empty square, removing the pawn beside it.
    EnPassant {
        from: Square,
        to: Square,
        captured: Square,
    },
}

impl Move {
    /// Square the moving piece (the king, for castles) starts on.
    pub fn origin(&self) -> Square {
        match *self {
            Move::Classic { from, .. } | Move::EnPassant { from, .. } => from,
            Move::Castle(right) => right.rules().king_start,
        }
    }

    /// Square the moving piece (the king, for castles) ends on.
    pub fn destination(&self) -> Square {
        match *self {
            Move::Classic { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castle(right) => right.rules().king_end,
        }
    }

    pub fn description(&self) -> MoveDescription {
        MoveDescription::new(self.origin(), self.destination())
    }

    /// The delta this move applies to a board.
    pub fn changes(&self) -> Changes {
        let mut changes = Changes::with_capacity(4);
        match *self {
            Move::Classic { from, to } => {
                changes.insert(to, Some(from));
                changes.insert(from, None);
            }
            Move::Castle(right) => {
                let rules = right.rules();
                changes.insert(rules.rook_end, Some(rules.rook_start));
                changes.insert(rules.king_end, Some(rules.king_start));
                changes.insert(rules.rook_start, None);
                changes.insert(rules.king_start, None);
            }
            Move::EnPassant { from, to, captured } => {
                changes.insert(to, Some(from));
                changes.insert(from, None);
                changes.insert(captured, None);
            }
        }
        changes
    }
}

#[test]
fn castle_changes_read_before_clearing() {
    let changes = Move::Castle(CastlingRight::WHITE_QUEENSIDE).changes();
    let order: Vec<_> = changes.iter().map(|(t, s)| (*t, *s)).collect();
    assert_eq!(
        order,
        vec![
            (Square::d1, Some(Square::a1)),
            (Square::c1, Some(Square::e1)),
            (Square::a1, None),
            (Square::e1, None),
        ]
    );
}

#[test]
fn en_passant_clears_the_captured_pawn() {
    let mv = Move::EnPassant {
        from: Square::b4,
        to: Square::a3,
        captured: Square::a4,
    };
    let changes = mv.changes();
    assert_eq!(changes.get(&Square::a3), Some(&Some(Square::b4)));
    assert_eq!(changes.get(&Square::a4), Some(&None));
    assert_eq!(mv.destination(), Square::a3);
}
