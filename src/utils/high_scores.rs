//! Best scores per game, persisted in ~/.arcade/high_scores.json.

use super::persistence::{load_json_or_default, save_json};
use crate::core::constants::HIGH_SCORES_PER_GAME;
use crate::games::GameKind;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io;

pub const HIGH_SCORES_FILE: &str = "high_scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub level: u32,
    /// Lowercase difficulty identifier, e.g. "journeyman".
    pub difficulty: String,
    /// Unix timestamp (seconds).
    pub recorded_at: i64,
}

impl ScoreRecord {
    pub fn now(score: u32, level: u32, difficulty: &str) -> Self {
        Self {
            score,
            level,
            difficulty: difficulty.to_string(),
            recorded_at: Utc::now().timestamp(),
        }
    }
}

/// Top scores for each game, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub race: Vec<ScoreRecord>,
    #[serde(default)]
    pub snake: Vec<ScoreRecord>,
}

impl HighScores {
    pub fn load() -> Self {
        load_json_or_default(HIGH_SCORES_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(HIGH_SCORES_FILE, self)
    }

    pub fn table(&self, game: GameKind) -> &[ScoreRecord] {
        match game {
            GameKind::Race => &self.race,
            GameKind::Snake => &self.snake,
        }
    }

    fn table_mut(&mut self, game: GameKind) -> &mut Vec<ScoreRecord> {
        match game {
            GameKind::Race => &mut self.race,
            GameKind::Snake => &mut self.snake,
        }
    }

    pub fn best(&self, game: GameKind) -> Option<u32> {
        self.table(game).first().map(|r| r.score)
    }

    /// True if `score` would make the table.
    pub fn qualifies(&self, game: GameKind, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let table = self.table(game);
        table.len() < HIGH_SCORES_PER_GAME || table.iter().any(|r| score > r.score)
    }

    /// Insert `record` if it qualifies. Returns its 0-based rank.
    ///
    /// Ties keep the older record ahead.
    pub fn submit(&mut self, game: GameKind, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(game, record.score) {
            return None;
        }
        let table = self.table_mut(game);
        let rank = table
            .iter()
            .position(|r| record.score > r.score)
            .unwrap_or(table.len());
        table.insert(rank, record);
        table.truncate(HIGH_SCORES_PER_GAME);
        Some(rank)
    }
}
