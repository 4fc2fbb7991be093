//! Headless balance simulator.
//!
//! Plays many seeded runs of a game with a simple autopilot, driving the
//! same pure `step` function the interactive engine uses, and aggregates
//! how long runs last and how far the pace escalates.

pub mod autopilot;
mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_race_run, simulate_snake_run};
