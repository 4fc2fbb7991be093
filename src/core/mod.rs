//! Game-agnostic engine pieces: run state, scheduling, pace and the tick loop.

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod pace;
pub mod run_state;
pub mod scheduler;

pub use engine::{new_session, step, Engine, EngineOptions, GameRules, Session, Snapshot, Stepped};
pub use error::ConfigError;
pub use events::GameEvent;
pub use pace::{Pace, PaceConfig, Progress};
pub use run_state::{EndReason, RunState, Transition};
pub use scheduler::Scheduler;
