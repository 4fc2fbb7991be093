//! Maps [`GameEvent`]s to human-readable log lines.
//!
//! Engine events are typed; the host keeps a short rolling log of the ones
//! worth showing to the player. High-frequency events (movement, spawns,
//! score ticks) are dropped.

use crate::core::constants::EVENT_LOG_CAPACITY;
use crate::core::events::GameEvent;
use crate::core::run_state::EndReason;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    /// Good news for the player (rendered in the accent colour).
    pub positive: bool,
}

/// The log line for `event`, if it gets one.
pub fn describe(event: &GameEvent) -> Option<LogEntry> {
    let (message, positive) = match event {
        GameEvent::RunStarted => ("Go!".to_string(), true),
        GameEvent::RunEnded { reason, score } => {
            let what = match reason {
                EndReason::Crash => "Crashed",
                EndReason::SelfCollision => "Bit your own tail",
            };
            (format!("{}! Final score: {}", what, score), false)
        }
        GameEvent::RunReset => ("New run".to_string(), true),
        GameEvent::ObstacleAvoided { id } => (format!("Dodged obstacle #{}", id), true),
        GameEvent::ItemConsumed { length, .. } => {
            (format!("Yum! Length is now {}", length), true)
        }
        GameEvent::LevelUp { level, .. } => (format!("Level {}! Speeding up", level), true),
        GameEvent::LaneChanged { .. }
        | GameEvent::DirectionChanged { .. }
        | GameEvent::ObstacleSpawned { .. }
        | GameEvent::ObstacleCleared { .. }
        | GameEvent::ItemSpawned { .. }
        | GameEvent::ScoreChanged { .. } => return None,
    };
    Some(LogEntry { message, positive })
}

/// Bounded rolling log, oldest entry dropped first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Append the log lines for `events`. Returns how many were added.
    pub fn apply_events(&mut self, events: &[GameEvent]) -> usize {
        let mut added = 0;
        for entry in events.iter().filter_map(describe) {
            self.push(entry);
            added += 1;
        }
        added
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The newest `n` entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
