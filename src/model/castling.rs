//! Castling geometry and rights.

use strum::VariantArray;

use crate::model::{ChessColor, ChessMan, PieceKind, Square, board::TileView};

/// The four castling rights, in the fixed `KQkq` order.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum CastlingRight {
    WHITE_KINGSIDE = 0,
    WHITE_QUEENSIDE = 1,
    BLACK_KINGSIDE = 2,
    BLACK_QUEENSIDE = 3,
}

/// Which way the king goes.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CastlingSide {
    /// Aka. the 'short' castling, `O-O`.
    KINGSIDE,
    /// Aka. the 'long' castling, `O-O-O`.
    QUEENSIDE,
}

/// Squares involved in one castling move.
#[derive(Debug)]
pub struct CastlingRules {
    pub king_start: Square,
    pub king_end: Square,
    pub rook_start: Square,
    pub rook_end: Square,
}

/// Indexed by [`CastlingRight::ix`].
pub const STANDARD: [CastlingRules; 4] = [
    CastlingRules {
        king_start: Square::e1,
        king_end: Square::g1,
        rook_start: Square::h1,
        rook_end: Square::f1,
    },
    CastlingRules {
        king_start: Square::e1,
        king_end: Square::c1,
        rook_start: Square::a1,
        rook_end: Square::d1,
    },
    CastlingRules {
        king_start: Square::e8,
        king_end: Square::g8,
        rook_start: Square::h8,
        rook_end: Square::f8,
    },
    CastlingRules {
        king_start: Square::e8,
        king_end: Square::c8,
        rook_start: Square::a8,
        rook_end: Square::d8,
    },
];

impl CastlingRight {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    pub fn new(color: ChessColor, side: CastlingSide) -> Self {
        match (color, side) {
            (ChessColor::WHITE, CastlingSide::KINGSIDE) => Self::WHITE_KINGSIDE,
            (ChessColor::WHITE, CastlingSide::QUEENSIDE) => Self::WHITE_QUEENSIDE,
            (ChessColor::BLACK, CastlingSide::KINGSIDE) => Self::BLACK_KINGSIDE,
            (ChessColor::BLACK, CastlingSide::QUEENSIDE) => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn color(self) -> ChessColor {
        if self.ix() < 2 {
            ChessColor::WHITE
        } else {
            ChessColor::BLACK
        }
    }

    pub fn side(self) -> CastlingSide {
        if self.ix() % 2 == 0 {
            CastlingSide::KINGSIDE
        } else {
            CastlingSide::QUEENSIDE
        }
    }

    #[inline]
    pub fn rules(self) -> &'static CastlingRules {
        &STANDARD[self.ix()]
    }

    /// FEN letter of this right.
    pub fn fen_char(self) -> char {
        ['K', 'Q', 'k', 'q'][self.ix()]
    }

    /// Both rights of one color.
    pub fn of_color(color: ChessColor) -> [Self; 2] {
        [
            Self::new(color, CastlingSide::KINGSIDE),
            Self::new(color, CastlingSide::QUEENSIDE),
        ]
    }

    /// King and rook are both still on their original squares.
    pub fn is_position_correct(self, tiles: &impl TileView) -> bool {
        let rules = self.rules();
        let color = self.color();
        tiles.tile(rules.king_start) == Some(ChessMan::new(color, PieceKind::KING))
            && tiles.tile(rules.rook_start) == Some(ChessMan::new(color, PieceKind::ROOK))
    }

    /// Pieces in place and nothing between king and rook.
    ///
    /// Says nothing about checks, which is the check checker's business.
    pub fn is_possible(self, tiles: &impl TileView) -> bool {
        let rules = self.rules();
        let row = rules.king_start.row();
        let (lo, hi) = if rules.rook_start.col() < rules.king_start.col() {
            (rules.rook_start.col(), rules.king_start.col())
        } else {
            (rules.king_start.col(), rules.rook_start.col())
        };
        ((lo + 1)..hi).all(|col| tiles.tile(Square::new(row, col)).is_none())
            && self.is_position_correct(tiles)
    }
}
