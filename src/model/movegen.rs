//! # The move factory.
//!
//! Turns geometry into concrete [`Move`]s against a board, and translates
//! between moves and standard algebraic notation.
//!
//! The factory reads squares through a [`TileView`], so the same code
//! serves both the real board and the check checker's view of a board
//! with a move overlaid on it.

use log::trace;

use crate::{
    error::IllegalMove,
    model::{
        ChessMan, PawnPromotion, PieceKind, Square,
        attacking::LegalityOracle,
        board::{Board, TileView},
        castling::CastlingRight,
        moving::{Move, MoveDescription},
        pieces::{self, castle_shape, is_move_possible},
        position::Position,
        vectors::Vector,
    },
    notation::{StdAlgNotation, StdAlgOfficer, StdAlgPawn},
};

pub struct MoveFactory<'a, V: TileView> {
    view: &'a V,
    position: &'a Position,
}

impl<'a> MoveFactory<'a, Board> {
    /// Factory reading the position's own board.
    pub fn real(position: &'a Position) -> Self {
        Self {
            view: &position.board,
            position,
        }
    }
}

impl<'a, V: TileView> MoveFactory<'a, V> {
    pub fn new(view: &'a V, position: &'a Position) -> Self {
        Self { view, position }
    }

    /// Build the concrete move for a from/to pair, if the chessman on
    /// `from` can make it on this board.
    ///
    /// Turn order, castling through check and king safety are not
    /// considered; castling rights and paths are.
    pub fn create_move_from(&self, desc: MoveDescription) -> Option<Move> {
        let man = self.view.tile(desc.from)?;
        if !is_move_possible(man, desc) {
            return None;
        }

        match man.kind() {
            PieceKind::PAWN => self.pawn_move(man, desc),
            PieceKind::KING if desc.vector().1.abs() > 1 => {
                castle_shape(man.color(), desc).and_then(|right| self.castle(right))
            }
            _ => {
                let step = desc.sub_vector();
                let mut at = desc.from.offset(step)?;
                while at != desc.to {
                    if self.view.tile(at).is_some() {
                        return None;
                    }
                    at = at.offset(step)?;
                }
                self.landing(man, desc.to)
                    .then_some(Move::Classic { from: desc.from, to: desc.to })
            }
        }
    }

    /// Empty, or holding something to capture.
    fn landing(&self, man: ChessMan, to: Square) -> bool {
        self.view
            .tile(to)
            .is_none_or(|other| other.color() != man.color())
    }

    fn pawn_move(&self, man: ChessMan, desc: MoveDescription) -> Option<Move> {
        let Vector(dr, dc) = desc.vector();
        let classic = Move::Classic { from: desc.from, to: desc.to };

        if dc == 0 {
            if self.view.tile(desc.to).is_some() {
                return None;
            }
            if dr.abs() == 2 {
                let over = desc.from.offset(Vector(dr / 2, 0))?;
                if self.view.tile(over).is_some() {
                    return None;
                }
            }
            return Some(classic);
        }

        match self.view.tile(desc.to) {
            Some(other) if other.color() != man.color() => Some(classic),
            Some(_) => None,
            None => {
                let captured = Square::new(desc.from.row(), desc.to.col());
                let enemy_pawn = ChessMan::new(man.color().opp(), PieceKind::PAWN);
                let ep_row = man.color().opp().pawn_row() as i8 + 2 * man.color().opp().forward();
                (self.position.en_passant == Some(desc.to.file())
                    && desc.from.row() as i8 == ep_row
                    && self.view.tile(captured) == Some(enemy_pawn))
                .then_some(Move::EnPassant {
                    from: desc.from,
                    to: desc.to,
                    captured,
                })
            }
        }
    }

    /// The castle, if the right is still held and king and rook are
    /// in place with nothing between them.
    pub fn castle(&self, right: CastlingRight) -> Option<Move> {
        (self.position.castling[right.ix()] && right.is_possible(self.view))
            .then_some(Move::Castle(right))
    }

    /// Every move the chessman on `from` can make, walking each candidate
    /// ray up to and including the first occupied square.
    pub fn extract_moves(&self, from: Square) -> Vec<Move> {
        let Some(man) = self.view.tile(from) else {
            return vec![];
        };

        let mut res = vec![];
        for ray in pieces::candidate_rays(man, from) {
            for desc in ray {
                let Some(mv) = self.create_move_from(desc) else {
                    break;
                };
                res.push(mv);
                if self.view.tile(desc.to).is_some() {
                    break;
                }
            }
        }

        if man.kind() == PieceKind::KING {
            for right in CastlingRight::of_color(man.color()) {
                if right.rules().king_start == from {
                    res.extend(self.castle(right));
                }
            }
        }
        res
    }

    /// Resolve a parsed algebraic move to the one legal move it names.
    pub fn parse_move(
        &self,
        san: &StdAlgNotation,
        oracle: &impl LegalityOracle,
    ) -> Result<Move, IllegalMove> {
        let turn = self.position.turn;
        let text = san.to_string();

        let candidates = match san {
            StdAlgNotation::Castling(side, _) => {
                let right = CastlingRight::new(turn, *side);
                let mv = self
                    .castle(right)
                    .ok_or(IllegalMove::CastleUnavailable(right))?;
                vec![mv]
            }
            StdAlgNotation::Pawn(pawn) => self.pawn_candidates(pawn, &text)?,
            StdAlgNotation::Officer(officer) => self.officer_candidates(officer),
        };

        if candidates.is_empty() {
            return Err(IllegalMove::NoCandidate(text));
        }

        let legal: Vec<Move> = candidates
            .iter()
            .copied()
            .filter(|mv| oracle.is_legal(self.position, mv))
            .collect();
        trace!(
            "{text}: {} candidates, {} legal",
            candidates.len(),
            legal.len()
        );

        match legal[..] {
            [] => Err(IllegalMove::KingInCheck(text)),
            [mv] => Ok(mv),
            _ => Err(IllegalMove::Ambiguous {
                text,
                count: legal.len(),
            }),
        }
    }

    fn pawn_candidates(&self, pawn: &StdAlgPawn, text: &str) -> Result<Vec<Move>, IllegalMove> {
        let turn = self.position.turn;
        let own = ChessMan::new(turn, PieceKind::PAWN);
        let back = Vector(-turn.forward(), 0);

        let from = match pawn.capture_from {
            Some(file) => {
                let row = pawn.to.row() as i8 - turn.forward();
                if !(0..8).contains(&row) {
                    return Err(IllegalMove::NoCandidate(text.to_string()));
                }
                Some(Square::new(row as u8, file.ix() as u8))
            }
            None => {
                let one = pawn.to.offset(back);
                let two = one.and_then(|sq| sq.offset(back));
                match (one, two) {
                    (Some(one), _) if self.view.tile(one) == Some(own) => Some(one),
                    (Some(one), Some(two))
                        if self.view.tile(one).is_none() && self.view.tile(two) == Some(own) =>
                    {
                        Some(two)
                    }
                    _ => None,
                }
            }
        };

        Ok(from
            .filter(|&sq| self.view.tile(sq) == Some(own))
            .and_then(|sq| self.create_move_from(MoveDescription::new(sq, pawn.to)))
            .into_iter()
            .collect())
    }

    fn officer_candidates(&self, officer: &StdAlgOfficer) -> Vec<Move> {
        let man = ChessMan::new(self.position.turn, officer.kind);
        self.position
            .board
            .positions_of(man)
            .iter()
            .filter(|sq| officer.file.is_none_or(|f| sq.file() == f))
            .filter(|sq| officer.rank.is_none_or(|r| sq.rank() == r))
            .filter_map(|&sq| self.create_move_from(MoveDescription::new(sq, officer.to)))
            .filter(|mv| !matches!(mv, Move::Castle(_)))
            .collect()
    }

    /// Shortest unambiguous algebraic name of a move about to be played.
    ///
    /// File disambiguation is preferred over rank, and both are used only
    /// when neither alone singles out the piece. Check marks are not
    /// written.
    pub fn stringify_move(
        &self,
        mv: &Move,
        promotion: Option<PawnPromotion>,
        oracle: &impl LegalityOracle,
    ) -> StdAlgNotation {
        let (from, to) = match *mv {
            Move::Castle(right) => return StdAlgNotation::Castling(right.side(), None),
            Move::EnPassant { from, to, .. } => {
                return StdAlgNotation::Pawn(StdAlgPawn {
                    capture_from: Some(from.file()),
                    to,
                    promotion: None,
                    check: None,
                });
            }
            Move::Classic { from, to } => (from, to),
        };

        let Some(man) = self.view.tile(from) else {
            return StdAlgNotation::Pawn(StdAlgPawn {
                capture_from: None,
                to,
                promotion,
                check: None,
            });
        };

        if man.kind() == PieceKind::PAWN {
            return StdAlgNotation::Pawn(StdAlgPawn {
                capture_from: (from.col() != to.col()).then_some(from.file()),
                to,
                promotion,
                check: None,
            });
        }

        let rivals: Vec<Square> = self
            .position
            .board
            .positions_of(man)
            .iter()
            .copied()
            .filter(|&sq| sq != from)
            .filter(|&sq| {
                self.create_move_from(MoveDescription::new(sq, to))
                    .is_some_and(|other| oracle.is_legal(self.position, &other))
            })
            .collect();

        let (file, rank) = if rivals.is_empty() {
            (None, None)
        } else if rivals.iter().all(|sq| sq.col() != from.col()) {
            (Some(from.file()), None)
        } else if rivals.iter().all(|sq| sq.row() != from.row()) {
            (None, Some(from.rank()))
        } else {
            (Some(from.file()), Some(from.rank()))
        };

        StdAlgNotation::Officer(StdAlgOfficer {
            kind: man.kind(),
            file,
            rank,
            capture: self.view.tile(to).is_some(),
            to,
            check: None,
        })
    }
}

#[cfg(test)]
fn pos(fen: &str) -> Position {
    match Position::from_identifier(fen) {
        Ok(p) => p,
        Err(e) => panic!("{fen}: {e}"),
    }
}

#[test]
fn blocked_rays_stop_at_first_piece() {
    let position = Position::startpos();
    let factory = MoveFactory::real(&position);
    assert!(factory.extract_moves(Square::a1).is_empty());
    assert!(factory.extract_moves(Square::c1).is_empty());
    assert_eq!(factory.extract_moves(Square::b1).len(), 2);
    assert_eq!(factory.extract_moves(Square::e2).len(), 2);
    assert!(factory.extract_moves(Square::e4).is_empty());
}

#[test]
fn captures_end_the_ray() {
    let position = pos("4k3/8/8/3p4/8/8/8/3RK3 w - -");
    let factory = MoveFactory::real(&position);
    let tos: Vec<_> = factory
        .extract_moves(Square::d1)
        .iter()
        .map(Move::destination)
        .collect();
    assert!(tos.contains(&Square::d5));
    assert!(!tos.contains(&Square::d6));
    assert!(!tos.contains(&Square::e1));
    assert!(tos.contains(&Square::a1));
}

#[test]
fn en_passant_needs_the_column() {
    let d = MoveDescription::new(Square::e5, Square::d6);
    let with = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6");
    assert_eq!(
        MoveFactory::real(&with).create_move_from(d),
        Some(Move::EnPassant {
            from: Square::e5,
            to: Square::d6,
            captured: Square::d5
        })
    );
    let without = pos("4k3/8/8/3pP3/8/8/8/4K3 w - -");
    assert_eq!(MoveFactory::real(&without).create_move_from(d), None);
}

#[test]
fn castles_need_rights_and_an_empty_path() {
    let position = pos("r3k2r/8/8/8/8/8/8/R3K1NR w KQkq -");
    let factory = MoveFactory::real(&position);
    assert_eq!(
        factory.create_move_from(MoveDescription::new(Square::e1, Square::c1)),
        Some(Move::Castle(CastlingRight::WHITE_QUEENSIDE))
    );
    assert_eq!(
        factory.create_move_from(MoveDescription::new(Square::e1, Square::a1)),
        Some(Move::Castle(CastlingRight::WHITE_QUEENSIDE))
    );
    assert_eq!(factory.castle(CastlingRight::WHITE_KINGSIDE), None);

    let position = pos("r3k2r/8/8/8/8/8/8/R3K2R w Kk -");
    let factory = MoveFactory::real(&position);
    assert_eq!(factory.castle(CastlingRight::WHITE_QUEENSIDE), None);
    assert!(factory.castle(CastlingRight::WHITE_KINGSIDE).is_some());
}
