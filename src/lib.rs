//! # Memorchess
//!
//! The chess rules engine behind a spaced-repetition opening trainer.
//!
//! A [`Game`] is fed moves, as algebraic notation or as from/to squares,
//! keeps the position correct, and hands out a canonical
//! [`PositionIdentifier`] after every move for the trainer to key its
//! move graph on. There is no search and no evaluation: the engine only
//! knows what is legal.
//!
//! ```
//! use memorchess::Game;
//!
//! let mut game = Game::new();
//! game.play_move("e4").unwrap();
//! assert_eq!(
//!     game.identifier().as_str(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"
//! );
//! ```

pub mod config;
pub mod error;
/// Modeling the game of chess.
pub mod model;
/// Chess notation.
pub mod notation;

pub use config::EngineConfig;
pub use error::{ConfigError, IllegalMove, InvalidPositionIdentifier};
pub use model::{
    ChessColor, ChessMan, PawnPromotion, PieceKind, Square,
    attacking::{CheckChecker, Legality, LegalityOracle, NoCheckChecker},
    board::{Board, TileView},
    game::{Game, LegalMove},
    moving::{Move, MoveDescription},
    perft::perft,
    position::{Position, PositionIdentifier},
};
