//! Events produced by engine ticks and commands.
//!
//! The presentation layer maps these to log lines and effects; the engine
//! never touches presentation types.

use crate::core::run_state::EndReason;
use crate::games::race::types::ObstacleKind;
use crate::games::snake::types::{Cell, Direction};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Lifecycle ───────────────────────────────────────────────
    RunStarted,
    RunEnded { reason: EndReason, score: u32 },
    RunReset,

    // ── Movement ────────────────────────────────────────────────
    LaneChanged { from: u8, to: u8 },
    DirectionChanged { from: Direction, to: Direction },

    // ── Race ────────────────────────────────────────────────────
    ObstacleSpawned { id: u32, lane: u8, kind: ObstacleKind },
    ObstacleAvoided { id: u32 },
    /// Obstacle left the far end of the track.
    ObstacleCleared { id: u32 },

    // ── Snake ───────────────────────────────────────────────────
    ItemSpawned { cell: Cell },
    ItemConsumed { cell: Cell, length: usize },

    // ── Score & difficulty ──────────────────────────────────────
    ScoreChanged { score: u32 },
    LevelUp { level: u32, tick_interval_ms: u64, speed: f64 },
}
