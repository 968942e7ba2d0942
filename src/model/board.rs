//! # The mailbox board.
//!
//! One `Option<ChessMan>` per square, plus a reverse index from each of
//! the twelve piece signatures to the squares it occupies. The index is a
//! derived cache: every write to the tiles goes through [`Board::write`],
//! which keeps both in lockstep, so the union of the index sets is always
//! exactly the set of occupied squares.

use std::{collections::BTreeSet, fmt::Display};

use strum::VariantArray;

use crate::model::{ChessColor, ChessMan, PieceKind, Square, moving::Move};

/// Read access to squares.
///
/// Implemented by the [`Board`] itself and by views that overlay a pending
/// move on top of one, so that move geometry can be evaluated against
/// either without caring which.
pub trait TileView {
    fn tile(&self, sq: Square) -> Option<ChessMan>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Option<ChessMan>; 64],
    positions: [BTreeSet<Square>; 12],
}

impl TileView for Board {
    #[inline]
    fn tile(&self, sq: Square) -> Option<ChessMan> {
        self.tiles[sq.ix()]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::ROOK,
    PieceKind::KNIGHT,
    PieceKind::BISHOP,
    PieceKind::QUEEN,
    PieceKind::KING,
    PieceKind::BISHOP,
    PieceKind::KNIGHT,
    PieceKind::ROOK,
];

impl Board {
    pub fn empty() -> Self {
        Self {
            tiles: [None; 64],
            positions: std::array::from_fn(|_| BTreeSet::new()),
        }
    }

    /// The standard starting array.
    pub fn startpos() -> Self {
        let mut res = Self::empty();
        res.set_starting_position();
        res
    }

    /// Clear every square.
    pub fn clear_all(&mut self) {
        self.tiles = [None; 64];
        for set in &mut self.positions {
            set.clear();
        }
    }

    /// Back to the standard starting array.
    pub fn reset(&mut self) {
        self.set_starting_position();
    }

    /// Clear the board, then lay out the standard starting array.
    pub fn set_starting_position(&mut self) {
        self.clear_all();
        for color in [ChessColor::WHITE, ChessColor::BLACK] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                self.place_piece(
                    Square::new(color.back_row(), col as u8),
                    ChessMan::new(color, *kind),
                );
                self.place_piece(
                    Square::new(color.pawn_row(), col as u8),
                    ChessMan::new(color, PieceKind::PAWN),
                );
            }
        }
    }

    /// Put a chessman on a square, replacing whatever was there.
    ///
    /// No legality of any kind is checked.
    pub fn place_piece(&mut self, sq: Square, man: ChessMan) {
        self.write(sq, Some(man));
    }

    pub fn clear(&mut self, sq: Square) {
        self.write(sq, None);
    }

    fn write(&mut self, sq: Square, man: Option<ChessMan>) {
        if let Some(old) = self.tiles[sq.ix()] {
            self.positions[old.ix()].remove(&sq);
        }
        if let Some(new) = man {
            self.positions[new.ix()].insert(sq);
        }
        self.tiles[sq.ix()] = man;
    }

    /// # Panics
    ///
    /// When `name` is not a square name.
    pub fn tile_named(&self, name: &str) -> Option<ChessMan> {
        self.tile(Square::named(name))
    }

    /// Apply a move's change set, entry by entry in order.
    pub fn play_move(&mut self, mv: &Move) {
        for (target, source) in mv.changes() {
            let man = source.and_then(|s| self.tiles[s.ix()]);
            self.write(target, man);
        }
    }

    /// Squares currently holding this chessman.
    #[inline]
    pub fn positions_of(&self, man: ChessMan) -> &BTreeSet<Square> {
        &self.positions[man.ix()]
    }

    /// Where the king of this color stands, if it is on the board at all.
    pub fn king(&self, color: ChessColor) -> Option<Square> {
        self.positions_of(ChessMan::new(color, PieceKind::KING))
            .first()
            .copied()
    }

    /// All occupied squares, a1 to h8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, ChessMan)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(ix, t)| t.map(|man| (Square::from_u8(ix as u8), man)))
    }

    /// Occupied squares according to the reverse index.
    pub fn indexed(&self) -> impl Iterator<Item = (Square, ChessMan)> + '_ {
        ChessMan::VARIANTS
            .iter()
            .flat_map(|&man| self.positions_of(man).iter().map(move |&sq| (sq, man)))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8 {
                let c = self
                    .tile(Square::new(row, col))
                    .map(ChessMan::fen_char)
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
fn index_matches_tiles(board: &Board) -> bool {
    let mut indexed: Vec<_> = board.indexed().collect();
    indexed.sort_by_key(|(sq, _)| *sq);
    indexed == board.occupied().collect::<Vec<_>>()
}

#[test]
fn startpos_layout() {
    let board = Board::startpos();
    assert_eq!(board.occupied().count(), 32);
    assert_eq!(board.tile_named("e1"), Some(ChessMan::WHITE_KING));
    assert_eq!(board.tile_named("d8"), Some(ChessMan::BLACK_QUEEN));
    assert_eq!(board.tile_named("e4"), None);
    assert_eq!(board.positions_of(ChessMan::BLACK_PAWN).len(), 8);
    assert_eq!(board.king(ChessColor::BLACK), Some(Square::e8));
    assert!(index_matches_tiles(&board));
}

#[test]
fn overwrite_keeps_index_disjoint() {
    let mut board = Board::empty();
    board.place_piece(Square::d4, ChessMan::WHITE_KNIGHT);
    board.place_piece(Square::d4, ChessMan::BLACK_ROOK);
    assert!(board.positions_of(ChessMan::WHITE_KNIGHT).is_empty());
    assert_eq!(board.positions_of(ChessMan::BLACK_ROOK).len(), 1);
    board.clear(Square::d4);
    assert_eq!(board.indexed().count(), 0);
    assert!(index_matches_tiles(&board));
}

#[test]
fn castle_relocates_both_pieces() {
    use crate::model::castling::CastlingRight;

    let mut board = Board::empty();
    board.place_piece(Square::e1, ChessMan::WHITE_KING);
    board.place_piece(Square::h1, ChessMan::WHITE_ROOK);
    board.play_move(&Move::Castle(CastlingRight::WHITE_KINGSIDE));
    assert_eq!(board.tile_named("g1"), Some(ChessMan::WHITE_KING));
    assert_eq!(board.tile_named("f1"), Some(ChessMan::WHITE_ROOK));
    assert_eq!(board.tile_named("e1"), None);
    assert_eq!(board.tile_named("h1"), None);
    assert!(index_matches_tiles(&board));
}

#[test]
fn copies_are_independent() {
    let original = Board::startpos();
    let mut copy = original.clone();
    copy.play_move(&Move::Classic {
        from: Square::e2,
        to: Square::e4,
    });
    assert_eq!(original.tile_named("e2"), Some(ChessMan::WHITE_PAWN));
    assert_eq!(copy.tile_named("e2"), None);
    assert!(original.positions_of(ChessMan::WHITE_PAWN).contains(&Square::e2));
    assert!(!copy.positions_of(ChessMan::WHITE_PAWN).contains(&Square::e2));
}

#[test]
fn display_grid() {
    let text = Board::startpos().to_string();
    let first = text.lines().next().unwrap_or_default();
    assert_eq!(first, "8  r n b q k b n r");
}

#[test]
fn reset_restores_the_starting_array() {
    let mut board = Board::startpos();
    board.play_move(&Move::Classic {
        from: Square::g1,
        to: Square::f3,
    });
    board.place_piece(Square::d5, ChessMan::BLACK_QUEEN);
    board.reset();
    assert_eq!(board, Board::startpos());
    assert!(index_matches_tiles(&board));

    board.clear_all();
    assert_eq!(board.occupied().count(), 0);
    assert!(board.positions_of(ChessMan::WHITE_KING).is_empty());
}
