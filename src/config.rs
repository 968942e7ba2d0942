//! Engine configuration, read from TOML.
//!
//! ```toml
//! legality = "unchecked"
//! start = "4k3/8/8/8/8/8/4P3/4K3 w -"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    model::{attacking::Legality, game::Game, position::Position},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Whether moves that leave the own king in check are refused.
    pub legality: Legality,
    /// Position identifier or FEN to start from, instead of the
    /// standard array.
    pub start: Option<String>,
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn new_game(&self) -> Result<Game<Legality>, ConfigError> {
        Ok(match &self.start {
            Some(fen) => Game::from_fen_with(fen, self.legality)?,
            None => Game::with_oracle(Position::startpos(), self.legality),
        })
    }
}

#[test]
fn defaults() {
    let config = EngineConfig::from_toml("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.legality, Legality::Checked);
    let game = config.new_game().unwrap();
    assert_eq!(game.legal_moves().len(), 20);
}

#[test]
fn unchecked_start_position() {
    let config = EngineConfig::from_toml(
        r#"
        legality = "unchecked"
        start = "4k3/8/8/8/8/8/4r3/4K3 w - - 3 40"
        "#,
    )
    .unwrap();
    assert_eq!(config.legality, Legality::Unchecked);
    let mut game = config.new_game().unwrap();
    assert_eq!(game.fullmove_count(), 40);
    assert_eq!(game.play_move("Kd2"), Ok("Kd2".to_string()));
}

#[test]
fn rejects_bad_input() {
    assert!(matches!(
        EngineConfig::from_toml("legality = \"sometimes\""),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        EngineConfig::from_toml("colour = \"white\""),
        Err(ConfigError::Toml(_))
    ));
    let config = EngineConfig {
        start: Some("not a position".to_string()),
        ..Default::default()
    };
    assert!(matches!(config.new_game(), Err(ConfigError::Position(_))));
    assert!(matches!(
        EngineConfig::load("/nonexistent/memorchess.toml"),
        Err(ConfigError::Io(_))
    ));
}
