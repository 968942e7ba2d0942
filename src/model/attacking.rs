//! # King safety.
//!
//! Deciding whether a move leaves the mover's own king in check, without
//! ever playing it on a real board. The move's change set is laid over the
//! board as a [`DeltaView`], and every enemy piece that could still be on
//! the board afterwards is asked whether the [`MoveFactory`] can build a
//! capture of the king through that view.
//!
//! Legality is a strategy: anything that can judge a move against a
//! position is a [`LegalityOracle`], so drills and tests can switch the
//! check rules off with [`NoCheckChecker`].

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::model::{
    ChessColor, ChessMan, PieceKind, Square,
    board::{Board, TileView},
    movegen::MoveFactory,
    moving::{Changes, Move, MoveDescription},
    pieces::attack_shape,
    position::Position,
};

pub trait LegalityOracle {
    /// May the move be played in this position?
    ///
    /// The move is assumed to have come out of a [`MoveFactory`] for the
    /// same position.
    fn is_legal(&self, position: &Position, mv: &Move) -> bool;
}

/// Every constructible move is legal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckChecker;

impl LegalityOracle for NoCheckChecker {
    #[inline]
    fn is_legal(&self, _: &Position, _: &Move) -> bool {
        true
    }
}

/// Moves may not leave the own king attacked, and castling may
/// neither start from check nor cross an attacked square.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckChecker;

impl LegalityOracle for CheckChecker {
    fn is_legal(&self, position: &Position, mv: &Move) -> bool {
        let board = &position.board;
        let color = board
            .tile(mv.origin())
            .map(ChessMan::color)
            .unwrap_or(position.turn);
        let enemy = color.opp();
        let own_king = ChessMan::new(color, PieceKind::KING);

        let view = DeltaView::new(board, mv.changes());

        let king = view
            .changes
            .iter()
            .find(|(_, src)| src.is_some_and(|s| board.tile(s) == Some(own_king)))
            .map(|(target, _)| *target)
            .or_else(|| board.king(color));
        let Some(king) = king else {
            warn!("{color:?} has no king on the board, allowing {mv:?}");
            return true;
        };

        if let Move::Castle(right) = mv {
            let rules = right.rules();
            if is_attacked(position, board, rules.king_start, enemy)
                || is_attacked(position, board, rules.rook_end, enemy)
            {
                trace!("{mv:?} castles out of or through check");
                return false;
            }
        }

        let res = !is_attacked(position, &view, king, enemy);
        trace!("{mv:?} leaves king on {king:?} safe: {res}");
        res
    }
}

/// Selectable legality, for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Legality {
    #[default]
    Checked,
    Unchecked,
}

impl LegalityOracle for Legality {
    fn is_legal(&self, position: &Position, mv: &Move) -> bool {
        match self {
            Legality::Checked => CheckChecker.is_legal(position, mv),
            Legality::Unchecked => NoCheckChecker.is_legal(position, mv),
        }
    }
}

/// A board as it would be after a change set, without applying it.
///
/// Squares named as targets read their source from the underlying
/// board; every other square reads through.
pub struct DeltaView<'a> {
    pub board: &'a Board,
    pub changes: Changes,
}

impl<'a> DeltaView<'a> {
    pub fn new(board: &'a Board, changes: Changes) -> Self {
        Self { board, changes }
    }
}

impl<'a> TileView for DeltaView<'a> {
    #[inline]
    fn tile(&self, sq: Square) -> Option<ChessMan> {
        match self.changes.get(&sq) {
            Some(src) => src.and_then(|s| self.board.tile(s)),
            None => self.board.tile(sq),
        }
    }
}

/// Can any piece of color `by` capture on `target`, as seen through `view`?
///
/// Attackers are found through the position's reverse index; pieces the
/// view no longer shows on their square have been captured and are
/// skipped. Pawns attack their diagonals whether or not anything stands
/// there.
pub fn is_attacked(
    position: &Position,
    view: &impl TileView,
    target: Square,
    by: ChessColor,
) -> bool {
    let factory = MoveFactory::new(view, position);
    ChessMan::of_color(by).any(|man| {
        position.board.positions_of(man).iter().any(|&from| {
            let desc = MoveDescription::new(from, target);
            view.tile(from) == Some(man)
                && attack_shape(man, desc)
                && (man.kind() == PieceKind::PAWN || factory.create_move_from(desc).is_some())
        })
    })
}

#[cfg(test)]
fn pos(fen: &str) -> Position {
    match Position::from_identifier(fen) {
        Ok(p) => p,
        Err(e) => panic!("{fen}: {e}"),
    }
}

#[cfg(test)]
fn classic(from: &str, to: &str) -> Move {
    Move::Classic {
        from: Square::named(from),
        to: Square::named(to),
    }
}

#[test]
fn pinned_piece_may_not_leave_the_line() {
    let position = pos("4k3/4r3/8/8/8/8/4B3/4K3 w - -");
    assert!(!CheckChecker.is_legal(&position, &classic("e2", "d3")));
    assert!(NoCheckChecker.is_legal(&position, &classic("e2", "d3")));
    assert!(CheckChecker.is_legal(&position, &classic("e1", "d1")));
}

#[test]
fn capturing_the_checker_is_legal() {
    let position = pos("4k3/8/8/8/8/8/3q4/4K3 w - -");
    assert!(CheckChecker.is_legal(&position, &classic("e1", "d2")));
    assert!(!CheckChecker.is_legal(&position, &classic("e1", "e2")));
    assert!(!CheckChecker.is_legal(&position, &classic("e1", "d1")));
    assert!(!CheckChecker.is_legal(&position, &classic("e1", "f2")));
    assert!(CheckChecker.is_legal(&position, &classic("e1", "f1")));
}

#[test]
fn blocking_through_the_delta() {
    let position = pos("4k3/8/8/8/7b/8/8/3NK3 w - -");
    assert!(is_attacked(&position, &position.board, Square::e1, ChessColor::BLACK));
    assert!(!CheckChecker.is_legal(&position, &classic("d1", "c3")));
    assert!(CheckChecker.is_legal(&position, &classic("d1", "f2")));
}

#[test]
fn castling_through_check() {
    let position = pos("4k3/8/8/8/8/8/5r2/4K2R w K -");
    assert!(!CheckChecker.is_legal(
        &position,
        &Move::Castle(crate::model::castling::CastlingRight::WHITE_KINGSIDE)
    ));
    let position = pos("4k3/8/8/8/8/8/6p1/4K2R w K -");
    assert!(is_attacked(&position, &position.board, Square::f1, ChessColor::BLACK));
    assert!(!CheckChecker.is_legal(
        &position,
        &Move::Castle(crate::model::castling::CastlingRight::WHITE_KINGSIDE)
    ));
    let position = pos("4k3/8/8/8/8/8/8/4K2R w K -");
    assert!(CheckChecker.is_legal(
        &position,
        &Move::Castle(crate::model::castling::CastlingRight::WHITE_KINGSIDE)
    ));
}

#[test]
fn en_passant_can_expose_the_king() {
    let position = pos("8/8/8/K2pP2r/8/8/8/7k w - d6");
    let mv = Move::EnPassant {
        from: Square::e5,
        to: Square::d6,
        captured: Square::d5,
    };
    assert!(!CheckChecker.is_legal(&position, &mv));
}

#[test]
fn verdicts_are_repeatable() {
    let position = Position::startpos();
    let mv = classic("e2", "e4");
    let first = CheckChecker.is_legal(&position, &mv);
    assert_eq!(first, CheckChecker.is_legal(&position, &mv));
    assert!(first);
}
