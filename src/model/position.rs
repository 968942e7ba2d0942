//! Positions and their identifiers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{
    error::InvalidPositionIdentifier,
    model::{
        BoardFile, ChessColor, ChessMan, PieceKind, Square,
        board::{Board, TileView},
        castling::CastlingRight,
    },
    notation::fen,
};

/// Everything about the state of play that decides which moves are legal,
/// apart from the move counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: ChessColor,
    /// Indexed by [`CastlingRight::ix`].
    pub castling: [bool; 4],
    /// Column of a pawn that just made a double step.
    pub en_passant: Option<BoardFile>,
}

impl Position {
    /// White to move on the given board, with every castling right whose
    /// king and rook stand on their original squares.
    pub fn new(board: Board) -> Self {
        let castling =
            std::array::from_fn(|ix| CastlingRight::VARIANTS[ix].is_position_correct(&board));
        Self {
            board,
            turn: ChessColor::WHITE,
            castling,
            en_passant: None,
        }
    }

    pub fn startpos() -> Self {
        Self::new(Board::startpos())
    }

    /// Parse a position identifier or FEN string, ignoring any counters.
    pub fn from_identifier(text: &str) -> Result<Self, InvalidPositionIdentifier> {
        fen::parse(text).map(|record| record.position)
    }

    /// Revoke every castling right whose king or rook has left home.
    ///
    /// Rights are never granted back.
    pub fn update_castling(&mut self) {
        for right in CastlingRight::VARIANTS {
            self.castling[right.ix()] &= right.is_position_correct(&self.board);
        }
    }

    /// Square a pawn capturing en passant would land on.
    pub fn en_passant_square(&self) -> Option<Square> {
        let row = match self.turn {
            ChessColor::WHITE => 5,
            ChessColor::BLACK => 2,
        };
        self.en_passant
            .map(|file| Square::new(row, file.ix() as u8))
    }

    /// Is there a pawn of the player to move beside the pawn that just
    /// made a double step?
    pub fn is_en_passant_capturable(&self) -> bool {
        let Some(file) = self.en_passant else {
            return false;
        };
        let row = match self.turn {
            ChessColor::WHITE => 4,
            ChessColor::BLACK => 3,
        };
        let own = ChessMan::new(self.turn, PieceKind::PAWN);
        let col = file.ix() as i8;
        [col - 1, col + 1]
            .into_iter()
            .filter(|c| (0..8).contains(c))
            .any(|c| self.board.tile(Square::new(row, c as u8)) == Some(own))
    }

    pub fn identifier(&self) -> PositionIdentifier {
        PositionIdentifier(fen::write_identifier(self))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Canonical text key of a position: board, turn, castling rights, and the
/// en passant square only when a capture is actually available.
///
/// Transpositions produce byte-identical identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionIdentifier(String);

impl PositionIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rebuild the position this identifier names.
    pub fn position(&self) -> Result<Position, InvalidPositionIdentifier> {
        Position::from_identifier(&self.0)
    }
}

impl Display for PositionIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PositionIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PositionIdentifier {
    type Error = InvalidPositionIdentifier;

    /// Canonicalises the text on the way in.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Position::from_identifier(&value).map(|p| p.identifier())
    }
}

#[test]
fn rights_follow_the_pieces() {
    let mut board = Board::empty();
    board.place_piece(Square::e1, ChessMan::WHITE_KING);
    board.place_piece(Square::a1, ChessMan::WHITE_ROOK);
    board.place_piece(Square::e8, ChessMan::BLACK_KING);
    let mut position = Position::new(board);
    assert_eq!(position.castling, [false, true, false, false]);

    position.board.clear(Square::a1);
    position.update_castling();
    position.board.place_piece(Square::a1, ChessMan::WHITE_ROOK);
    position.update_castling();
    assert_eq!(position.castling, [false; 4]);
}

#[test]
fn en_passant_only_when_a_pawn_is_beside() {
    let mut position = Position::startpos();
    position.board.play_move(&crate::model::moving::Move::Classic {
        from: Square::e2,
        to: Square::e4,
    });
    position.turn = ChessColor::BLACK;
    position.en_passant = Some(BoardFile::e_);
    assert!(!position.is_en_passant_capturable());
    assert_eq!(position.en_passant_square(), Some(Square::e3));

    position.board.place_piece(Square::d4, ChessMan::BLACK_PAWN);
    assert!(position.is_en_passant_capturable());
    assert_eq!(position.board.tile(Square::d4), Some(ChessMan::BLACK_PAWN));
}

#[test]
fn identifiers_canonicalise() {
    let id = PositionIdentifier::try_from(
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".to_string(),
    );
    assert_eq!(
        id.map(|id| id.to_string()),
        Ok("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq".to_string())
    );
}
