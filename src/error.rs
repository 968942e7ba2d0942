//! Everything that can go wrong, short of a bug.

use thiserror::Error;

use crate::model::{Square, castling::CastlingRight, moving::MoveDescription};

/// A move was refused. The game it was played on is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("unreadable move {0:?}")]
    Unreadable(String),
    #[error("there is no piece on {0}")]
    EmptyOrigin(Square),
    #[error("the piece on {0} belongs to the other player")]
    WrongPlayer(Square),
    #[error("the piece cannot move {0}")]
    Shape(MoveDescription),
    #[error("the way for {0} is blocked")]
    Blocked(MoveDescription),
    #[error("no piece can play {0}")]
    NoCandidate(String),
    #[error("{text} could be played by {count} different pieces")]
    Ambiguous { text: String, count: usize },
    #[error("castling {0:?} is not available")]
    CastleUnavailable(CastlingRight),
    #[error("{0} would leave the king in check")]
    KingInCheck(String),
    #[error("{0} does not promote a pawn")]
    UnexpectedPromotion(String),
    #[error("a promotion piece must be chosen first")]
    PromotionPending,
    #[error("there is no pawn waiting for promotion")]
    NoPromotionPending,
    #[error("{0} is not a legal move in this position")]
    NotLegal(MoveDescription),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPositionIdentifier {
    #[error("expected 3, 4 or 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {files} files")]
    RankLength { rank: u8, files: u8 },
    #[error("unknown piece letter {0:?}")]
    UnknownPiece(char),
    #[error("impossible board {0:?}")]
    Board(String),
    #[error("invalid side to move {0:?}")]
    Turn(String),
    #[error("invalid castling rights {0:?}")]
    Castling(String),
    #[error("invalid en passant square {0:?}")]
    EnPassant(String),
    #[error("invalid {field} {value:?}")]
    Counter { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid start position: {0}")]
    Position(#[from] InvalidPositionIdentifier),
}
