//! Difficulty & score controller.
//!
//! Every scoring event (an obstacle avoided or an item eaten) is worth the
//! same number of points. Each `milestone_every` events the level goes up,
//! which shortens the tick interval and raises the obstacle speed factor,
//! both clamped.

use super::constants::{DEFAULT_MILESTONE_EVERY, DEFAULT_POINTS_PER_EVENT, MIN_TICK_INTERVAL_MS};
use super::error::ConfigError;
use super::events::GameEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceConfig {
    /// Tick interval at level 0.
    pub base_interval_ms: u64,
    /// Interval reduction per level.
    pub interval_step_ms: u64,
    /// Fastest allowed interval; at least [`MIN_TICK_INTERVAL_MS`].
    pub min_interval_ms: u64,
    /// Speed factor gained per level (level 0 runs at 1.0).
    pub speed_step: f64,
    /// Upper clamp for the speed factor.
    pub max_speed: f64,
    /// Scoring events per level.
    pub milestone_every: u32,
    pub points_per_event: u32,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 100,
            interval_step_ms: 5,
            min_interval_ms: 50,
            speed_step: 0.1,
            max_speed: 2.0,
            milestone_every: DEFAULT_MILESTONE_EVERY,
            points_per_event: DEFAULT_POINTS_PER_EVENT,
        }
    }
}

impl PaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_interval_ms == 0 {
            return Err(ConfigError::NonPositiveInterval {
                field: "base_interval_ms",
            });
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::NonPositiveInterval {
                field: "min_interval_ms",
            });
        }
        if self.min_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::IntervalBelowFloor {
                field: "min_interval_ms",
                interval_ms: self.min_interval_ms,
                floor_ms: MIN_TICK_INTERVAL_MS,
            });
        }
        if self.base_interval_ms < self.min_interval_ms {
            return Err(ConfigError::IntervalOrder {
                base_ms: self.base_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            return Err(ConfigError::InvalidSpeed {
                field: "speed_step",
                value: self.speed_step,
            });
        }
        if !self.max_speed.is_finite() || self.max_speed < 1.0 {
            return Err(ConfigError::InvalidSpeed {
                field: "max_speed",
                value: self.max_speed,
            });
        }
        if self.milestone_every == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        if self.points_per_event == 0 {
            return Err(ConfigError::ZeroPoints);
        }
        Ok(())
    }

    /// Pace values for `level`, clamped.
    pub fn pace_at(&self, level: u32) -> Pace {
        let reduction = self.interval_step_ms.saturating_mul(level as u64);
        let tick_interval_ms = self
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms)
            .max(MIN_TICK_INTERVAL_MS);
        let speed = (1.0 + self.speed_step * level as f64).min(self.max_speed);
        Pace {
            level,
            tick_interval_ms,
            speed,
        }
    }
}

/// Current difficulty step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    pub level: u32,
    pub tick_interval_ms: u64,
    /// Multiplier applied to obstacle movement.
    pub speed: f64,
}

/// Score plus the pace it has earned. Only the engine writes this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub scoring_events: u32,
    pub pace: Pace,
}

impl Progress {
    pub fn new(config: &PaceConfig) -> Self {
        Self {
            score: 0,
            scoring_events: 0,
            pace: config.pace_at(0),
        }
    }

    /// Credit `count` scoring events. Returns true if the score changed.
    pub fn record(&mut self, config: &PaceConfig, count: u32, events: &mut Vec<GameEvent>) -> bool {
        if count == 0 {
            return false;
        }

        for _ in 0..count {
            self.scoring_events += 1;
            self.score = self.score.saturating_add(config.points_per_event);

            if self.scoring_events % config.milestone_every == 0 {
                self.pace = config.pace_at(self.pace.level + 1);
                events.push(GameEvent::LevelUp {
                    level: self.pace.level,
                    tick_interval_ms: self.pace.tick_interval_ms,
                    speed: self.pace.speed,
                });
            }
        }

        events.push(GameEvent::ScoreChanged { score: self.score });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PaceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_interval_below_floor() {
        let config = PaceConfig {
            min_interval_ms: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IntervalBelowFloor { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = PaceConfig {
            base_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveInterval {
                field: "base_interval_ms"
            })
        );
    }

    #[test]
    fn test_rejects_base_faster_than_min() {
        let config = PaceConfig {
            base_interval_ms: 40,
            min_interval_ms: 60,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IntervalOrder { .. })
        ));
    }

    #[test]
    fn test_pace_clamps_interval_and_speed() {
        let config = PaceConfig::default();
        let pace = config.pace_at(1_000);
        assert_eq!(pace.tick_interval_ms, config.min_interval_ms);
        assert!((pace.speed - config.max_speed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_scores_and_levels_up_on_milestone() {
        let config = PaceConfig::default();
        let mut progress = Progress::new(&config);
        let mut events = Vec::new();

        for _ in 0..4 {
            progress.record(&config, 1, &mut events);
        }
        assert_eq!(progress.score, 40);
        assert_eq!(progress.pace.level, 0);

        progress.record(&config, 1, &mut events);
        assert_eq!(progress.score, 50);
        assert_eq!(progress.pace.level, 1);
        assert_eq!(progress.pace.tick_interval_ms, 95);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelUp { level: 1, .. })));
    }

    #[test]
    fn test_record_zero_is_silent() {
        let config = PaceConfig::default();
        let mut progress = Progress::new(&config);
        let mut events = Vec::new();
        assert!(!progress.record(&config, 0, &mut events));
        assert!(events.is_empty());
        assert_eq!(progress.score, 0);
    }

    #[test]
    fn test_score_never_decreases() {
        let config = PaceConfig::default();
        let mut progress = Progress::new(&config);
        let mut events = Vec::new();
        let mut last = 0;
        for count in [0, 1, 3, 0, 2, 7] {
            progress.record(&config, count, &mut events);
            assert!(progress.score >= last);
            last = progress.score;
        }
    }
}
