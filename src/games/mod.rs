//! Real-time mini-games built on the shared tick engine: Race and Snake.

/// Generate the standard `ALL`, `from_index()`, `name()` and
/// `difficulty_str()` methods shared by the four-variant difficulty enums
/// (Novice / Apprentice / Journeyman / Master).
macro_rules! difficulty_enum_impl {
    ($name:ident) => {
        impl $name {
            pub const ALL: [$name; 4] = [
                $name::Novice,
                $name::Apprentice,
                $name::Journeyman,
                $name::Master,
            ];

            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or($name::Novice)
            }

            pub fn index(&self) -> usize {
                Self::ALL.iter().position(|d| d == self).unwrap_or(0)
            }

            pub fn name(&self) -> &'static str {
                match self {
                    Self::Novice => "Novice",
                    Self::Apprentice => "Apprentice",
                    Self::Journeyman => "Journeyman",
                    Self::Master => "Master",
                }
            }

            /// Lowercase identifier used in saved records.
            pub fn difficulty_str(&self) -> &'static str {
                match self {
                    Self::Novice => "novice",
                    Self::Apprentice => "apprentice",
                    Self::Journeyman => "journeyman",
                    Self::Master => "master",
                }
            }
        }
    };
}

pub mod race;
pub mod snake;

pub use race::{LaneMove, Race, RaceConfig, RaceDifficulty, RaceWorld};
pub use snake::{Direction, Snake, SnakeConfig, SnakeDifficulty, SnakeWorld};

use serde::{Deserialize, Serialize};

/// Cosmetic colour. Carried through the engine but never read by game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        // warm orange
        Self::new(255, 165, 0)
    }
}

/// Which mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Race,
    Snake,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Race, GameKind::Snake];

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Race => "Car Race",
            GameKind::Snake => "Snake",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameKind::Race => "race",
            GameKind::Snake => "snake",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "race" | "car" | "car-race" => Some(GameKind::Race),
            "snake" => Some(GameKind::Snake),
            _ => None,
        }
    }
}
