//! # A game in progress.
//!
//! [`Game`] owns a [`Position`] plus the move counters, and is the only
//! place moves get committed. Every check happens before the board is
//! touched, so a refused move leaves the game exactly as it was.
//!
//! Promotion is a two-step affair. A pawn reaching the last rank without
//! a promotion piece named leaves the game waiting in
//! [`Game::needs_promotion`]; nothing but [`Game::apply_promotion`] is
//! accepted until the piece is chosen, and only then does the turn pass.

use std::fmt::Display;

use log::debug;

use crate::{
    error::{IllegalMove, InvalidPositionIdentifier},
    model::{
        BoardFile, ChessColor, ChessMan, PawnPromotion, PieceKind, Square,
        attacking::{CheckChecker, LegalityOracle, is_attacked},
        board::{Board, TileView},
        movegen::MoveFactory,
        moving::{Move, MoveDescription},
        pieces::is_move_possible,
        position::{Position, PositionIdentifier},
    },
    notation::{CoordNotation, Parsable, StdAlgNotation, fen},
};

/// A move known to be legal in the position it was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove(Move);

impl LegalMove {
    #[inline]
    pub fn get(self) -> Move {
        self.0
    }

    pub fn description(&self) -> MoveDescription {
        self.0.description()
    }
}

#[derive(Debug, Clone)]
pub struct Game<L: LegalityOracle = CheckChecker> {
    position: Position,
    halfmove_clock: u16,
    fullmove_count: u16,
    pending_promotion: Option<Square>,
    oracle: L,
}

impl Game<CheckChecker> {
    /// The standard starting position, with full check rules.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        Self::with_oracle(position, CheckChecker)
    }

    /// Three or four field identifiers, or full FEN.
    pub fn from_fen(text: &str) -> Result<Self, InvalidPositionIdentifier> {
        Self::from_fen_with(text, CheckChecker)
    }
}

impl Default for Game<CheckChecker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LegalityOracle> Game<L> {
    pub fn with_oracle(position: Position, oracle: L) -> Self {
        Self {
            position,
            halfmove_clock: 0,
            fullmove_count: 1,
            pending_promotion: None,
            oracle,
        }
    }

    pub fn from_fen_with(text: &str, oracle: L) -> Result<Self, InvalidPositionIdentifier> {
        let record = fen::parse(text)?;
        let mut res = Self::with_oracle(record.position, oracle);
        res.halfmove_clock = record.halfmove_clock;
        res.fullmove_count = record.fullmove_count;
        Ok(res)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn turn(&self) -> ChessColor {
        self.position.turn
    }

    /// Rights in `KQkq` order.
    pub fn castling(&self) -> [bool; 4] {
        self.position.castling
    }

    pub fn en_passant(&self) -> Option<BoardFile> {
        self.position.en_passant
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_count(&self) -> u16 {
        self.fullmove_count
    }

    pub fn oracle(&self) -> &L {
        &self.oracle
    }

    /// A pawn is waiting on the last rank for its promotion piece.
    pub fn needs_promotion(&self) -> bool {
        self.pending_promotion.is_some()
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub fn identifier(&self) -> PositionIdentifier {
        self.position.identifier()
    }

    pub fn to_fen(&self) -> String {
        fen::write_fen(&self.position, self.halfmove_clock, self.fullmove_count)
    }

    fn ready(&self) -> Result<(), IllegalMove> {
        match self.pending_promotion {
            Some(_) => Err(IllegalMove::PromotionPending),
            None => Ok(()),
        }
    }

    /// Play a move in standard algebraic notation, e.g. `"Nf3"`, `"exd6"`,
    /// `"O-O"` or `"h8=Q+"`, and return its canonical name.
    pub fn play_move(&mut self, text: &str) -> Result<String, IllegalMove> {
        self.ready()?;
        let san = StdAlgNotation::parse_str(text.trim())
            .ok_or_else(|| IllegalMove::Unreadable(text.to_string()))?;

        let factory = MoveFactory::real(&self.position);
        let mv = factory.parse_move(&san, &self.oracle)?;
        let promotion = san.promotion();
        if promotion.is_some() && !self.promotes(&mv) {
            return Err(IllegalMove::UnexpectedPromotion(text.to_string()));
        }
        let name = factory
            .stringify_move(&mv, promotion, &self.oracle)
            .to_string();

        self.commit(mv, promotion, &name);
        Ok(name)
    }

    /// Play the piece on `desc.from` to `desc.to` and return the move's
    /// name. A king moving two squares, or onto its own rook, castles.
    pub fn play_description(&mut self, desc: MoveDescription) -> Result<String, IllegalMove> {
        self.play_from(desc, None)
    }

    /// Play a move in coordinate notation, e.g. `"g1f3"` or `"e7e8q"`.
    pub fn play_coordinates(&mut self, text: &str) -> Result<String, IllegalMove> {
        let coords = CoordNotation::parse_str(text.trim())
            .ok_or_else(|| IllegalMove::Unreadable(text.to_string()))?;
        self.play_from(coords.description(), coords.prom)
    }

    fn play_from(
        &mut self,
        desc: MoveDescription,
        promotion: Option<PawnPromotion>,
    ) -> Result<String, IllegalMove> {
        self.ready()?;
        let man = self
            .position
            .board
            .tile(desc.from)
            .ok_or(IllegalMove::EmptyOrigin(desc.from))?;
        if man.color() != self.position.turn {
            return Err(IllegalMove::WrongPlayer(desc.from));
        }
        if !is_move_possible(man, desc) {
            return Err(IllegalMove::Shape(desc));
        }

        let factory = MoveFactory::real(&self.position);
        let mv = factory
            .create_move_from(desc)
            .ok_or(IllegalMove::Blocked(desc))?;
        let name = factory
            .stringify_move(&mv, promotion, &self.oracle)
            .to_string();
        if !self.oracle.is_legal(&self.position, &mv) {
            return Err(IllegalMove::KingInCheck(name));
        }
        if promotion.is_some() && !self.promotes(&mv) {
            return Err(IllegalMove::UnexpectedPromotion(name));
        }

        self.commit(mv, promotion, &name);
        Ok(name)
    }

    /// Play a move from [`Game::legal_moves`]. Moves generated for some
    /// other position are refused with [`IllegalMove::NotLegal`].
    pub fn play_legal(
        &mut self,
        mv: LegalMove,
        promotion: Option<PawnPromotion>,
    ) -> Result<String, IllegalMove> {
        self.ready()?;
        if !self.legal_moves_from(mv.0.origin()).contains(&mv) {
            return Err(IllegalMove::NotLegal(mv.description()));
        }
        self.play_generated(mv, promotion)
    }

    /// [`Game::play_legal`] for a move just generated from this position.
    pub(crate) fn play_generated(
        &mut self,
        mv: LegalMove,
        promotion: Option<PawnPromotion>,
    ) -> Result<String, IllegalMove> {
        self.ready()?;
        let name = self.name_of(&mv, promotion);
        if promotion.is_some() && !self.promotes(&mv.0) {
            return Err(IllegalMove::UnexpectedPromotion(name));
        }
        self.commit(mv.0, promotion, &name);
        Ok(name)
    }

    /// Resolve a pending promotion and pass the turn.
    pub fn apply_promotion(&mut self, promotion: PawnPromotion) -> Result<(), IllegalMove> {
        let sq = self
            .pending_promotion
            .take()
            .ok_or(IllegalMove::NoPromotionPending)?;
        self.promote(sq, promotion);
        self.advance();
        Ok(())
    }

    /// Is this a pawn move onto the last rank?
    pub fn is_promotion(&self, mv: &LegalMove) -> bool {
        self.promotes(&mv.0)
    }

    fn promotes(&self, mv: &Move) -> bool {
        let Move::Classic { from, to } = *mv else {
            return false;
        };
        self.position
            .board
            .tile(from)
            .is_some_and(|man| man.kind() == PieceKind::PAWN)
            && to.row() == self.position.turn.opp().back_row()
    }

    /// Canonical algebraic name of a legal move, in this position.
    pub fn name_of(&self, mv: &LegalMove, promotion: Option<PawnPromotion>) -> String {
        MoveFactory::real(&self.position)
            .stringify_move(&mv.0, promotion, &self.oracle)
            .to_string()
    }

    fn commit(&mut self, mv: Move, promotion: Option<PawnPromotion>, name: &str) {
        let board = &self.position.board;
        let pawn = board
            .tile(mv.origin())
            .is_some_and(|man| man.kind() == PieceKind::PAWN);
        let capture = match mv {
            Move::Classic { to, .. } => board.tile(to).is_some(),
            Move::EnPassant { .. } => true,
            Move::Castle(_) => false,
        };
        let promotes = self.promotes(&mv);

        self.position.board.play_move(&mv);
        debug!("{:?} plays {name}", self.position.turn);

        self.halfmove_clock = if pawn || capture {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        self.position.en_passant = match mv {
            Move::Classic { from, to } if pawn && from.row().abs_diff(to.row()) == 2 => {
                Some(to.file())
            }
            _ => None,
        };
        self.position.update_castling();

        match (promotes, promotion) {
            (true, Some(promotion)) => {
                self.promote(mv.destination(), promotion);
                self.advance();
            }
            (true, None) => {
                debug!("{} waits for a promotion piece", mv.destination());
                self.pending_promotion = Some(mv.destination());
            }
            (false, _) => self.advance(),
        }
    }

    fn promote(&mut self, sq: Square, promotion: PawnPromotion) {
        let man = ChessMan::new(self.position.turn, promotion.into());
        self.position.board.place_piece(sq, man);
        debug!("{sq} promoted to {man:?}");
    }

    fn advance(&mut self) {
        if self.position.turn == ChessColor::BLACK {
            self.fullmove_count = self.fullmove_count.saturating_add(1);
        }
        self.position.turn = self.position.turn.opp();
    }

    /// Legal moves of the piece on `sq`, castles included. Empty when the
    /// square is empty, holds an enemy piece, or a promotion is pending.
    pub fn legal_moves_from(&self, sq: Square) -> Vec<LegalMove> {
        if self.needs_promotion()
            || self
                .position
                .board
                .tile(sq)
                .is_none_or(|man| man.color() != self.position.turn)
        {
            return vec![];
        }
        MoveFactory::real(&self.position)
            .extract_moves(sq)
            .into_iter()
            .filter(|mv| self.oracle.is_legal(&self.position, mv))
            .map(LegalMove)
            .collect()
    }

    /// Every legal move for the player to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let own: Vec<Square> = self
            .position
            .board
            .occupied()
            .filter(|(_, man)| man.color() == self.position.turn)
            .map(|(sq, _)| sq)
            .collect();
        own.into_iter()
            .flat_map(|sq| self.legal_moves_from(sq))
            .collect()
    }

    /// Is the king of the player to move attacked right now?
    pub fn is_in_check(&self) -> bool {
        let turn = self.position.turn;
        self.position.board.king(turn).is_some_and(|king| {
            is_attacked(&self.position, &self.position.board, king, turn.opp())
        })
    }
}

impl<L: LegalityOracle> Display for Game<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(test)]
fn game(moves: &[&str]) -> Game {
    let mut res = Game::new();
    for mv in moves {
        if let Err(e) = res.play_move(mv) {
            panic!("{mv}: {e}");
        }
    }
    res
}

#[test]
fn counters() {
    let g = game(&["e4", "e5", "Nf3"]);
    assert_eq!(g.halfmove_clock(), 1);
    assert_eq!(g.fullmove_count(), 2);
    assert_eq!(g.turn(), ChessColor::BLACK);
    let g = game(&["e4", "e5", "Nf3", "Nc6", "Nxe5"]);
    assert_eq!(g.halfmove_clock(), 0);
    assert_eq!(g.fullmove_count(), 3);
}

#[test]
fn en_passant_column_only_after_double_step() {
    let g = game(&["e4"]);
    assert_eq!(g.en_passant(), Some(BoardFile::e_));
    let g = game(&["e4", "e6"]);
    assert_eq!(g.en_passant(), None);
    let g = game(&["e3", "e5", "e4"]);
    assert_eq!(g.en_passant(), None);
}

#[test]
fn refused_moves_change_nothing() {
    let mut g = game(&["e4", "e5"]);
    let before = g.to_fen();
    assert!(matches!(g.play_move("Ke3"), Err(IllegalMove::NoCandidate(_))));
    assert!(matches!(g.play_move("e5"), Err(IllegalMove::NoCandidate(_))));
    assert!(matches!(g.play_move("Nf9"), Err(IllegalMove::Unreadable(_))));
    assert_eq!(
        g.play_description(MoveDescription::new(Square::e5, Square::e4)),
        Err(IllegalMove::WrongPlayer(Square::e5))
    );
    assert_eq!(
        g.play_description(MoveDescription::new(Square::e3, Square::e4)),
        Err(IllegalMove::EmptyOrigin(Square::e3))
    );
    assert_eq!(
        g.play_description(MoveDescription::new(Square::g1, Square::g3)),
        Err(IllegalMove::Shape(MoveDescription::new(Square::g1, Square::g3)))
    );
    assert_eq!(
        g.play_description(MoveDescription::new(Square::f1, Square::a6)),
        Ok("Ba6".to_string())
    );
    assert_ne!(g.to_fen(), before);
}

#[test]
fn pending_promotion_blocks_everything_else() {
    let mut g = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(g.apply_promotion(PawnPromotion::QUEEN), Err(IllegalMove::NoPromotionPending));
    assert_eq!(g.play_move("a8"), Ok("a8".to_string()));
    assert!(g.needs_promotion());
    assert_eq!(g.turn(), ChessColor::WHITE);
    assert_eq!(g.play_move("Ke2"), Err(IllegalMove::PromotionPending));
    assert!(g.legal_moves().is_empty());
    assert_eq!(g.apply_promotion(PawnPromotion::KNIGHT), Ok(()));
    assert_eq!(g.board().tile(Square::a8), Some(ChessMan::WHITE_KNIGHT));
    assert_eq!(g.turn(), ChessColor::BLACK);
    assert!(!g.needs_promotion());
    assert!(g.board().positions_of(ChessMan::WHITE_PAWN).is_empty());
}

#[test]
fn promotion_only_on_the_last_rank() {
    let mut g = Game::new();
    assert_eq!(
        g.play_move("e4=Q"),
        Err(IllegalMove::UnexpectedPromotion("e4=Q".to_string()))
    );
    assert_eq!(
        g.play_coordinates("e2e4q"),
        Err(IllegalMove::UnexpectedPromotion("e4=Q".to_string()))
    );
    assert_eq!(g.play_coordinates("e2e4"), Ok("e4".to_string()));
}

#[test]
fn stale_legal_moves_are_refused() {
    let mut g = Game::new();
    let push = g
        .legal_moves_from(Square::e2)
        .into_iter()
        .find(|mv| mv.description().to == Square::e4);
    let Some(push) = push else {
        panic!("e4 should be available");
    };
    assert_eq!(g.play_legal(push, None), Ok("e4".to_string()));

    let before = g.to_fen();
    assert_eq!(
        g.play_legal(push, None),
        Err(IllegalMove::NotLegal(push.description()))
    );
    assert_eq!(g.to_fen(), before);
    assert_eq!(g.board().tile(Square::e4), Some(ChessMan::WHITE_PAWN));

    // a move from another game
    let mut other = game(&["a4", "h5"]);
    let rook = other
        .legal_moves_from(Square::a1)
        .into_iter()
        .find(|mv| mv.description().to == Square::a3);
    let Some(rook) = rook else {
        panic!("Ra3 should be available");
    };
    assert_eq!(other.play_legal(rook, None), Ok("Ra3".to_string()));
    assert_eq!(
        g.play_legal(rook, None),
        Err(IllegalMove::NotLegal(rook.description()))
    );
    assert_eq!(g.to_fen(), before);
}

#[test]
fn legal_moves_per_square() {
    let g = Game::new();
    assert_eq!(g.legal_moves().len(), 20);
    assert_eq!(g.legal_moves_from(Square::g1).len(), 2);
    assert!(g.legal_moves_from(Square::e7).is_empty());
    assert!(g.legal_moves_from(Square::e4).is_empty());

    let g = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    let king: Vec<_> = g
        .legal_moves_from(Square::e1)
        .into_iter()
        .map(LegalMove::get)
        .collect();
    assert!(king.contains(&Move::Castle(crate::model::castling::CastlingRight::WHITE_KINGSIDE)));
    assert!(king.contains(&Move::Castle(crate::model::castling::CastlingRight::WHITE_QUEENSIDE)));
    assert_eq!(king.len(), 7);
}

#[test]
fn check_detection() {
    let g = game(&["f3", "e5", "g4", "Qh4"]);
    assert!(g.is_in_check());
    assert!(g.legal_moves().is_empty());
    assert!(!Game::new().is_in_check());
}
