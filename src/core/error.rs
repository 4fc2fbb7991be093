//! Configuration errors, reported before a run can start.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveInterval { field: &'static str },
    IntervalBelowFloor { field: &'static str, interval_ms: u64, floor_ms: u64 },
    IntervalOrder { base_ms: u64, min_ms: u64 },
    ZeroMilestone,
    ZeroPoints,
    InvalidSpeed { field: &'static str, value: f64 },
    InvalidProbability { field: &'static str, value: f64 },
    LaneCount { lanes: u8, max: u8 },
    TrackGeometry { reason: &'static str },
    ObstacleTooFast { per_tick: f64, track_length: f64 },
    GridTooSmall { width: i16, height: i16, min: i16 },
    SnakeLength { length: usize, width: i16 },
    /// A supplied world doesn't match its config.
    InvalidWorld { reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveInterval { field } => {
                write!(f, "{field} must be a positive number of milliseconds")
            }
            Self::IntervalBelowFloor {
                field,
                interval_ms,
                floor_ms,
            } => write!(
                f,
                "{field} of {interval_ms}ms is below the engine floor of {floor_ms}ms"
            ),
            Self::IntervalOrder { base_ms, min_ms } => write!(
                f,
                "base tick interval {base_ms}ms is faster than the minimum interval {min_ms}ms"
            ),
            Self::ZeroMilestone => write!(f, "milestone_every must be at least 1"),
            Self::ZeroPoints => write!(f, "points_per_event must be at least 1"),
            Self::InvalidSpeed { field, value } => {
                write!(f, "{field} has invalid speed value {value}")
            }
            Self::InvalidProbability { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::LaneCount { lanes, max } => {
                write!(f, "lane count {lanes} out of range (allowed 1..={max})")
            }
            Self::TrackGeometry { reason } => write!(f, "invalid track geometry: {reason}"),
            Self::ObstacleTooFast {
                per_tick,
                track_length,
            } => write!(
                f,
                "fastest obstacle moves {per_tick:.2} per tick, which skips a {track_length:.2} track"
            ),
            Self::GridTooSmall { width, height, min } => write!(
                f,
                "grid {width}x{height} is too small (each side needs at least {min} cells)"
            ),
            Self::SnakeLength { length, width } => write!(
                f,
                "initial snake length {length} must be at least 1 and shorter than grid width {width}"
            ),
            Self::InvalidWorld { reason } => write!(f, "invalid world: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
