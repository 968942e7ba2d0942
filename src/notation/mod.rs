//! Reading and writing chess notation.
//!
//! Parsers are built with `chumsky` and hang off the [`Parsable`] trait;
//! printers are plain [`Display`] impls.

pub mod coord_notation;
pub mod fen;
pub mod square;
pub mod stdalg;

use std::fmt::Display;

use chumsky::prelude::*;
use strum::VariantNames;

use crate::model::{
    BoardFile, BoardRank, PawnPromotion, PieceKind, Square, castling::CastlingSide,
    moving::MoveDescription,
};

pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self>;

    /// Parse the whole of `text`, or nothing.
    fn parse_str(text: &str) -> Option<Self> {
        Self::parser().then_ignore(end()).parse(text).into_output()
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Square::VARIANTS[self.ix()])
    }
}

impl Display for BoardFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(BoardFile::VARIANTS[self.ix()])
    }
}

impl Display for BoardRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(BoardRank::VARIANTS[self.ix()])
    }
}

impl Display for MoveDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Coordinate notation as used by UCI: `e2e4`, `e7e8q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordNotation {
    pub from: Square,
    pub to: Square,
    pub prom: Option<PawnPromotion>,
}

impl CoordNotation {
    pub fn new(from: Square, to: Square, prom: Option<PawnPromotion>) -> Self {
        Self { from, to, prom }
    }

    pub fn description(&self) -> MoveDescription {
        MoveDescription::new(self.from, self.to)
    }
}

impl Display for CoordNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.from,
            self.to,
            ["", "", "n", "b", "r", "q"][self.prom.map(|x| x as usize).unwrap_or(0)]
        )
    }
}

/// Standard algebraic notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdAlgNotation {
    Castling(CastlingSide, Option<InCheck>),
    Pawn(StdAlgPawn),
    Officer(StdAlgOfficer),
}

impl StdAlgNotation {
    pub fn promotion(&self) -> Option<PawnPromotion> {
        match self {
            StdAlgNotation::Pawn(p) => p.promotion,
            _ => None,
        }
    }
}

/// A pawn move: `e4`, `exd5`, `h8=Q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdAlgPawn {
    /// File the pawn captures from.
    pub capture_from: Option<BoardFile>,
    pub to: Square,
    pub promotion: Option<PawnPromotion>,
    pub check: Option<InCheck>,
}

/// A move by anything but a pawn: `Nf3`, `Rdxe1`, `Qe4c6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdAlgOfficer {
    pub kind: PieceKind,
    pub file: Option<BoardFile>,
    pub rank: Option<BoardRank>,
    pub capture: bool,
    pub to: Square,
    pub check: Option<InCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InCheck {
    Check,
    Mate,
}

impl Display for InCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InCheck::Check => "+",
            InCheck::Mate => "#",
        })
    }
}

fn check_mark(check: Option<InCheck>) -> String {
    check.map(|c| c.to_string()).unwrap_or_default()
}

impl Display for StdAlgNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StdAlgNotation::Castling(CastlingSide::KINGSIDE, chk) => {
                write!(f, "O-O{}", check_mark(*chk))
            }
            StdAlgNotation::Castling(CastlingSide::QUEENSIDE, chk) => {
                write!(f, "O-O-O{}", check_mark(*chk))
            }
            StdAlgNotation::Pawn(p) => {
                if let Some(file) = p.capture_from {
                    write!(f, "{file}x")?;
                }
                write!(f, "{}", p.to)?;
                if let Some(prom) = p.promotion {
                    write!(f, "={}", PieceKind::from(prom).letter())?;
                }
                f.write_str(&check_mark(p.check))
            }
            StdAlgNotation::Officer(o) => {
                write!(f, "{}", o.kind.letter())?;
                if let Some(file) = o.file {
                    write!(f, "{file}")?;
                }
                if let Some(rank) = o.rank {
                    write!(f, "{rank}")?;
                }
                if o.capture {
                    f.write_str("x")?;
                }
                write!(f, "{}{}", o.to, check_mark(o.check))
            }
        }
    }
}

#[test]
fn printing() {
    let officer = StdAlgNotation::Officer(StdAlgOfficer {
        kind: PieceKind::KNIGHT,
        file: Some(BoardFile::f_),
        rank: None,
        capture: true,
        to: Square::g5,
        check: Some(InCheck::Check),
    });
    assert_eq!(officer.to_string(), "Nfxg5+");

    let pawn = StdAlgNotation::Pawn(StdAlgPawn {
        capture_from: Some(BoardFile::g_),
        to: Square::h8,
        promotion: Some(PawnPromotion::QUEEN),
        check: None,
    });
    assert_eq!(pawn.to_string(), "gxh8=Q");

    let castle = StdAlgNotation::Castling(CastlingSide::QUEENSIDE, Some(InCheck::Mate));
    assert_eq!(castle.to_string(), "O-O-O#");

    let coords = CoordNotation::new(Square::e7, Square::e8, Some(PawnPromotion::KNIGHT));
    assert_eq!(coords.to_string(), "e7e8n");
}
