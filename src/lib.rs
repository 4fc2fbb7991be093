//! Arcade - real-time terminal mini-games
//!
//! A fixed-step tick engine with two games plugged into it: a lane-dodging
//! Car Race and a wraparound Snake. Exposed as a library for the host binary,
//! the simulator and tests.

pub mod build_info;
pub mod core;
pub mod event_log;
pub mod games;
pub mod simulator;
pub mod utils;

pub use crate::core::{Engine, EngineOptions, GameEvent, RunState};
pub use games::{GameKind, Race, RaceConfig, Rgb, Snake, SnakeConfig};
