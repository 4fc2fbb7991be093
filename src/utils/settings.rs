//! Host preferences persisted in ~/.arcade/settings.json.
//!
//! The engine never reads these; the host loads them once and passes the
//! values in through `EngineOptions` and the game configs.

use super::persistence::{load_json_or_default, save_json};
use crate::core::engine::EngineOptions;
use crate::games::{RaceConfig, RaceDifficulty, Rgb, SnakeConfig, SnakeDifficulty};
use serde::{Deserialize, Serialize};
use std::io;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub accent: Rgb,
    #[serde(default = "default_race_difficulty")]
    pub race_difficulty: RaceDifficulty,
    #[serde(default = "default_snake_difficulty")]
    pub snake_difficulty: SnakeDifficulty,
}

fn default_race_difficulty() -> RaceDifficulty {
    RaceDifficulty::Novice
}

fn default_snake_difficulty() -> SnakeDifficulty {
    SnakeDifficulty::Novice
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accent: Rgb::default(),
            race_difficulty: default_race_difficulty(),
            snake_difficulty: default_snake_difficulty(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SETTINGS_FILE, self)
    }

    pub fn race_config(&self) -> RaceConfig {
        RaceConfig::for_difficulty(self.race_difficulty)
    }

    pub fn snake_config(&self) -> SnakeConfig {
        SnakeConfig::for_difficulty(self.snake_difficulty)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            seed: None,
            accent: self.accent,
        }
    }
}
