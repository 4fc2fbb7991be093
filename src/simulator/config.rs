//! Simulation configuration.

use crate::games::{GameKind, RaceConfig, RaceDifficulty, SnakeConfig, SnakeDifficulty};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub game: GameKind,

    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Index into the difficulty presets (0 = Novice .. 3 = Master)
    pub difficulty: usize,

    /// Runs still alive after this many ticks count as timed out
    pub max_ticks_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run, 3 = per event)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: GameKind::Race,
            num_runs: 100,
            seed: None,
            difficulty: 0,
            max_ticks_per_run: 20_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    pub fn race_config(&self) -> RaceConfig {
        RaceConfig::for_difficulty(RaceDifficulty::from_index(self.difficulty))
    }

    pub fn snake_config(&self) -> SnakeConfig {
        SnakeConfig::for_difficulty(SnakeDifficulty::from_index(self.difficulty))
    }

    pub fn difficulty_name(&self) -> &'static str {
        match self.game {
            GameKind::Race => RaceDifficulty::from_index(self.difficulty).name(),
            GameKind::Snake => SnakeDifficulty::from_index(self.difficulty).name(),
        }
    }
}
