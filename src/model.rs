//! Modeling the game of chess on a plain 8×8 array.
//!
//! The submodules build on each other from the leaves up: geometry,
//! piece behaviour, the board, moves, the move factory, the check
//! checker, and finally positions and games.

use strum::{EnumIs, EnumIter, VariantArray, VariantNames};

pub mod attacking;
pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod moving;
pub mod perft;
pub mod pieces;
pub mod position;
pub mod vectors;

use vectors::Vector;

/// Representation of the squares on a chessboard.
///
/// This enum uses the convention of numbering
/// squares starting with a1 = 0 and then counting
/// up over the files first, b1 = 1, c1 = 2, ... and then the
/// ranks, a2 = 8, a3 = 16, ... ending with h8 = 63.
///
/// In row/column terms a square is `row * 8 + column`, where row 0 is
/// white's back rank and column 0 is the a-file.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    VariantNames, EnumIter)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Use this Square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x3Fu8) }
    }

    /// Square at the given row and column.
    ///
    /// # Panics
    ///
    /// Coordinates outside `0..8` are a programming error.
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
        Self::from_u8(row << 3 | col)
    }

    /// Square from its algebraic name, e.g. `"e4"`.
    ///
    /// # Panics
    ///
    /// Panics on anything that is not a square name.
    pub fn named(name: &str) -> Self {
        match Self::VARIANTS.iter().position(|n| *n == name) {
            Some(ix) => Self::from_u8(ix as u8),
            None => panic!("{name:?} is not a square"),
        }
    }

    /// Row index, 0 being white's back rank.
    #[inline]
    pub fn row(self) -> u8 {
        self as u8 >> 3
    }

    /// Column index, 0 being the a-file.
    #[inline]
    pub fn col(self) -> u8 {
        self as u8 & 0x7
    }

    /// Split a square into file and rank
    #[inline]
    pub fn coords(self) -> (BoardFile, BoardRank) {
        (BoardFile::from_u8(self.col()), BoardRank::from_u8(self.row()))
    }

    /// Join file and rank into a square
    #[inline]
    pub fn from_coords(f: BoardFile, r: BoardRank) -> Self {
        Self::from_u8(f as u8 | (r as u8) << 3)
    }

    /// Translate by a vector, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, v: Vector) -> Option<Self> {
        let row = self.row() as i8 + v.0;
        let col = self.col() as i8 + v.1;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// File of this square.
    #[inline]
    pub fn file(self) -> BoardFile {
        BoardFile::from_u8(self.col())
    }

    /// Rank of this square.
    #[inline]
    pub fn rank(self) -> BoardRank {
        BoardRank::from_u8(self.row())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BoardRank {
    _1 = 0,
    _2 = 1,
    _3 = 2,
    _4 = 3,
    _5 = 4,
    _6 = 5,
    _7 = 6,
    _8 = 7,
}

impl BoardRank {
    pub const VARIANTS: &'static [&'static str] = &["1", "2", "3", "4", "5", "6", "7", "8"];

    /// Use this rank as a row index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BoardFile {
    a_ = 0,
    b_ = 1,
    c_ = 2,
    d_ = 3,
    e_ = 4,
    f_ = 5,
    g_ = 6,
    h_ = 7,
}

impl BoardFile {
    pub const VARIANTS: &'static [&'static str] = &["a", "b", "c", "d", "e", "f", "g", "h"];

    /// Use this file as a column index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }
}

/// Representation of color of a player or chessman.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[repr(u8)]
pub enum ChessColor {
    WHITE = 0,
    BLACK = 1,
}

impl ChessColor {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::WHITE => Self::BLACK,
            Self::BLACK => Self::WHITE,
        }
    }

    /// Row direction in which this color's pawns advance.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => -1,
        }
    }

    /// Row of this color's back rank.
    #[inline]
    pub fn back_row(self) -> u8 {
        match self {
            Self::WHITE => 0,
            Self::BLACK => 7,
        }
    }

    /// Row this color's pawns start on.
    #[inline]
    pub fn pawn_row(self) -> u8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => 6,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Representation of the piece types of chessmen.
///
/// The discriminant values of this enum are the absolute
/// values of the [`ChessMan`] enum, or equivalently, the white chessmen.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum PieceKind {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl PieceKind {
    /// Use as an array index: equal to one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    /// Upper case letter used by both FEN and algebraic notation.
    pub fn letter(self) -> char {
        ['P', 'N', 'B', 'R', 'Q', 'K'][self.ix()]
    }
}

/// Representation of a chessman: a piece kind together with its owner.
///
/// The discriminants carry the color in their sign, and the twelve
/// variants are exactly the piece signatures the board indexes by.
///
/// The name chessman is of British-English origin, and though archaic
/// is used because it allows a distinction between pawns and pieces.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
#[repr(i8)]
pub enum ChessMan {
    BLACK_KING = -6,
    BLACK_QUEEN = -5,
    BLACK_ROOK = -4,
    BLACK_BISHOP = -3,
    BLACK_KNIGHT = -2,
    BLACK_PAWN = -1,
    WHITE_PAWN = 1,
    WHITE_KNIGHT = 2,
    WHITE_BISHOP = 3,
    WHITE_ROOK = 4,
    WHITE_QUEEN = 5,
    WHITE_KING = 6,
}

impl ChessMan {
    /// Combine an owner and a piece kind.
    #[inline]
    pub fn new(color: ChessColor, kind: PieceKind) -> Self {
        let v = kind as i8 * if color.is_white() { 1 } else { -1 };
        unsafe { std::mem::transmute::<i8, Self>(v) }
    }

    /// Owner of this chessman, read from the sign.
    #[inline]
    pub fn color(self) -> ChessColor {
        if (self as i8) < 0 {
            ChessColor::BLACK
        } else {
            ChessColor::WHITE
        }
    }

    /// Kind of this chessman.
    #[inline]
    pub fn kind(self) -> PieceKind {
        unsafe { std::mem::transmute::<u8, PieceKind>((self as i8).unsigned_abs()) }
    }

    /// Index into per-signature tables, `0..12`, white first.
    #[inline]
    pub fn ix(self) -> usize {
        self.color().ix() * 6 + self.kind().ix()
    }

    /// The six chessmen of one color, pawn to king.
    pub fn of_color(color: ChessColor) -> impl Iterator<Item = ChessMan> {
        PieceKind::VARIANTS.iter().map(move |&k| ChessMan::new(color, k))
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        match self.color() {
            ChessColor::WHITE => self.kind().letter(),
            ChessColor::BLACK => self.kind().letter().to_ascii_lowercase(),
        }
    }

    /// Inverse of [`ChessMan::fen_char`].
    pub fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            ChessColor::WHITE
        } else {
            ChessColor::BLACK
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::PAWN,
            'N' => PieceKind::KNIGHT,
            'B' => PieceKind::BISHOP,
            'R' => PieceKind::ROOK,
            'Q' => PieceKind::QUEEN,
            'K' => PieceKind::KING,
            _ => return None,
        };
        Some(Self::new(color, kind))
    }
}

/// Representation of the chess promotion echelons, that is, not pawns or kings.
///
/// The exclusion of pawns and kings at a type-level means a promotion
/// can never produce a second king.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum PawnPromotion {
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
}

/// Subset inclusion.
impl From<PawnPromotion> for PieceKind {
    #[inline]
    fn from(value: PawnPromotion) -> Self {
        unsafe { std::mem::transmute(value) }
    }
}

#[test]
fn chessman_signatures() {
    for &man in ChessMan::VARIANTS {
        assert_eq!(ChessMan::new(man.color(), man.kind()), man);
        assert_eq!(ChessMan::from_fen_char(man.fen_char()), Some(man));
    }
    let mut ixs: Vec<usize> = ChessMan::VARIANTS.iter().map(|m| m.ix()).collect();
    ixs.sort();
    assert_eq!(ixs, (0..12).collect::<Vec<_>>());
    assert_eq!(ChessMan::from_fen_char('x'), None);
}

#[test]
fn square_geometry() {
    assert_eq!(Square::new(0, 0), Square::a1);
    assert_eq!(Square::new(3, 4), Square::e4);
    assert_eq!(Square::named("h8"), Square::h8);
    assert_eq!(Square::e4.row(), 3);
    assert_eq!(Square::e4.col(), 4);
    assert_eq!(Square::a1.offset(Vector(-1, 0)), None);
    assert_eq!(Square::g1.offset(Vector(2, -1)), Some(Square::f3));
}

#[test]
#[should_panic]
fn square_off_the_board() {
    Square::new(8, 0);
}
