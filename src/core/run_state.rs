//! The run lifecycle: `NotStarted -> Running -> Ended -> (reset) -> Running`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    NotStarted,
    Running,
    Ended,
}

/// What asks the state machine to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Explicit start or the first movement command.
    Start,
    /// The collision detector fired.
    Collision,
    /// Explicit restart after the run ended.
    Reset,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Race car reached an obstacle in its lane.
    Crash,
    /// Snake head ran into its own body.
    SelfCollision,
}

impl RunState {
    /// Returns the next state, or `None` if `transition` is illegal here.
    pub fn next(self, transition: Transition) -> Option<RunState> {
        match (self, transition) {
            (RunState::NotStarted, Transition::Start) => Some(RunState::Running),
            (RunState::Running, Transition::Collision) => Some(RunState::Ended),
            (RunState::Ended, Transition::Reset) => Some(RunState::Running),
            _ => None,
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn label(self) -> &'static str {
        match self {
            RunState::NotStarted => "Ready",
            RunState::Running => "Running",
            RunState::Ended => "Game Over",
        }
    }
}
