//! Host-side storage: JSON helpers, settings and best scores.

pub mod high_scores;
pub mod persistence;
pub mod settings;

pub use high_scores::{HighScores, ScoreRecord};
pub use settings::Settings;
