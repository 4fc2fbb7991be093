//! Car Race data structures.
//!
//! Positions are abstract track units. `y` grows from the spawn row at the
//! top of the track toward the car near the bottom; anything past
//! `track_length` has left the screen.

use crate::core::constants::{
    RACE_AGENT_ROW, RACE_CRASH_DISTANCE, RACE_DEFAULT_LANES, RACE_HEAVY_KIND, RACE_LIGHT_KIND,
    RACE_MAX_LANES, RACE_MIN_SPAWN_GAP, RACE_SPAWN_ROW, RACE_STATIC_KIND, RACE_TRACK_LENGTH,
};
use crate::core::error::ConfigError;
use crate::core::pace::PaceConfig;
use crate::games::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Difficulty levels for the Car Race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(RaceDifficulty);

impl RaceDifficulty {
    /// Obstacle travel per tick before kind multiplier and jitter.
    pub fn lane_base_speed(&self) -> f64 {
        match self {
            Self::Novice => 1.0,
            Self::Apprentice => 1.2,
            Self::Journeyman => 1.4,
            Self::Master => 1.6,
        }
    }

    /// Per-tick spawn chance before the ramp bonus.
    pub fn base_spawn_chance(&self) -> f64 {
        match self {
            Self::Novice => 0.03,
            Self::Apprentice => 0.04,
            Self::Journeyman => 0.05,
            Self::Master => 0.06,
        }
    }

    pub fn pace(&self) -> PaceConfig {
        let (base_interval_ms, min_interval_ms, speed_step, max_speed) = match self {
            Self::Novice => (50, 30, 0.05, 1.6),
            Self::Apprentice => (45, 25, 0.06, 1.8),
            Self::Journeyman => (40, 20, 0.07, 2.0),
            Self::Master => (35, 16, 0.08, 2.2),
        };
        PaceConfig {
            base_interval_ms,
            interval_step_ms: 2,
            min_interval_ms,
            speed_step,
            max_speed,
            ..PaceConfig::default()
        }
    }
}

/// A lane command. `Left`/`Right` step one lane and stop at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneMove {
    Left,
    Right,
    /// Jump straight to a lane; out-of-range lanes are ignored.
    To(u8),
}

/// Obstacle varieties. Only the spawn weight and speed multiplier differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Light,
    Heavy,
    Static,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Light,
        ObstacleKind::Heavy,
        ObstacleKind::Static,
    ];

    /// Relative spawn weight.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Light => RACE_LIGHT_KIND.0,
            Self::Heavy => RACE_HEAVY_KIND.0,
            Self::Static => RACE_STATIC_KIND.0,
        }
    }

    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::Light => RACE_LIGHT_KIND.1,
            Self::Heavy => RACE_HEAVY_KIND.1,
            Self::Static => RACE_STATIC_KIND.1,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Light => Rgb::new(80, 160, 255),
            Self::Heavy => Rgb::new(230, 60, 60),
            Self::Static => Rgb::new(150, 150, 150),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "car",
            Self::Heavy => "truck",
            Self::Static => "roadblock",
        }
    }

    /// Weighted pick: light is most common, static rarest.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let total: u32 = Self::ALL.iter().map(|k| k.weight()).sum();
        let mut roll = rng.gen_range(0..total);
        for kind in Self::ALL {
            if roll < kind.weight() {
                return kind;
            }
            roll -= kind.weight();
        }
        ObstacleKind::Light
    }

    fn max_speed_multiplier() -> f64 {
        Self::ALL
            .iter()
            .map(|k| k.speed_multiplier())
            .fold(0.0, f64::max)
    }
}

/// A single obstacle on the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    /// Current position along the track.
    pub y: f64,
    /// Position at the end of the previous tick.
    pub prev_y: f64,
    pub kind: ObstacleKind,
    /// Travel per tick at pace speed 1.0.
    pub speed: f64,
    pub color: Rgb,
    /// Set once the obstacle has been credited as avoided.
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    pub lanes: u8,
    pub track_length: f64,
    /// Where the car sits on the track.
    pub agent_row: f64,
    /// Obstacle and car closer than this (same lane) crash.
    pub crash_distance: f64,
    pub lane_base_speed: f64,
    /// Relative speed jitter; each obstacle gets `1 ± U(0, jitter)`.
    pub speed_jitter: f64,
    pub base_spawn_chance: f64,
    /// Obstacles passed per +1.0 of spawn chance.
    pub spawn_ramp: f64,
    /// Upper bound of the ramp bonus.
    pub spawn_bonus_cap: f64,
    /// Newest obstacle must be at least this far down before the next spawn.
    pub min_spawn_gap: f64,
    pub pace: PaceConfig,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self::for_difficulty(RaceDifficulty::Novice)
    }
}

impl RaceConfig {
    pub fn for_difficulty(difficulty: RaceDifficulty) -> Self {
        Self {
            lanes: RACE_DEFAULT_LANES,
            track_length: RACE_TRACK_LENGTH,
            agent_row: RACE_AGENT_ROW,
            crash_distance: RACE_CRASH_DISTANCE,
            lane_base_speed: difficulty.lane_base_speed(),
            speed_jitter: 0.15,
            base_spawn_chance: difficulty.base_spawn_chance(),
            spawn_ramp: 500.0,
            spawn_bonus_cap: 0.10,
            min_spawn_gap: RACE_MIN_SPAWN_GAP,
            pace: difficulty.pace(),
        }
    }

    /// Furthest any obstacle can travel in one tick at top pace.
    pub fn max_obstacle_step(&self) -> f64 {
        self.lane_base_speed
            * ObstacleKind::max_speed_multiplier()
            * (1.0 + self.speed_jitter)
            * self.pace.max_speed
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 || self.lanes > RACE_MAX_LANES {
            return Err(ConfigError::LaneCount {
                lanes: self.lanes,
                max: RACE_MAX_LANES,
            });
        }
        if !self.track_length.is_finite() || self.track_length <= RACE_SPAWN_ROW {
            return Err(ConfigError::TrackGeometry {
                reason: "track_length must be positive",
            });
        }
        if !(self.agent_row > RACE_SPAWN_ROW && self.agent_row < self.track_length) {
            return Err(ConfigError::TrackGeometry {
                reason: "agent_row must lie strictly inside the track",
            });
        }
        if !(self.crash_distance > 0.0 && self.crash_distance < self.track_length) {
            return Err(ConfigError::TrackGeometry {
                reason: "crash_distance must be positive and shorter than the track",
            });
        }
        if !(self.min_spawn_gap >= 0.0 && self.min_spawn_gap < self.track_length) {
            return Err(ConfigError::TrackGeometry {
                reason: "min_spawn_gap must be within the track",
            });
        }
        if !self.lane_base_speed.is_finite() || self.lane_base_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                field: "lane_base_speed",
                value: self.lane_base_speed,
            });
        }
        if !(0.0..1.0).contains(&self.speed_jitter) {
            return Err(ConfigError::InvalidSpeed {
                field: "speed_jitter",
                value: self.speed_jitter,
            });
        }
        for (field, value) in [
            ("base_spawn_chance", self.base_spawn_chance),
            ("spawn_bonus_cap", self.spawn_bonus_cap),
            (
                "base_spawn_chance + spawn_bonus_cap",
                self.base_spawn_chance + self.spawn_bonus_cap,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        if !self.spawn_ramp.is_finite() || self.spawn_ramp <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                field: "spawn_ramp",
                value: self.spawn_ramp,
            });
        }
        self.pace.validate()?;

        let per_tick = self.max_obstacle_step();
        if per_tick >= self.track_length - RACE_SPAWN_ROW {
            return Err(ConfigError::ObstacleTooFast {
                per_tick,
                track_length: self.track_length,
            });
        }
        Ok(())
    }
}

/// Everything on the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceWorld {
    pub lanes: u8,
    /// The car's lane, always `< lanes`.
    pub lane: u8,
    /// Live obstacles keyed by id.
    pub obstacles: BTreeMap<u32, Obstacle>,
    pub next_id: u32,
    /// Most recently spawned obstacle, for spacing the next spawn.
    pub last_spawned: Option<u32>,
    /// Obstacles credited as avoided this run.
    pub obstacles_passed: u32,
}

impl RaceWorld {
    /// Empty track, car in the leftmost lane.
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            lanes: config.lanes,
            lane: 0,
            obstacles: BTreeMap::new(),
            next_id: 1,
            last_spawned: None,
            obstacles_passed: 0,
        }
    }

    /// Per-tick spawn probability: grows with obstacles passed, capped.
    pub fn spawn_chance(&self, config: &RaceConfig) -> f64 {
        let bonus = (self.obstacles_passed as f64 / config.spawn_ramp).min(config.spawn_bonus_cap);
        (config.base_spawn_chance + bonus).clamp(0.0, 1.0)
    }

    /// False while the newest obstacle is still too close to the spawn row.
    pub fn spawn_gap_clear(&self, config: &RaceConfig) -> bool {
        self.last_spawned
            .and_then(|id| self.obstacles.get(&id))
            .map_or(true, |newest| newest.y - RACE_SPAWN_ROW >= config.min_spawn_gap)
    }

    /// Place a new obstacle at the spawn row in a random lane and return its id.
    pub fn spawn_obstacle<R: Rng>(&mut self, config: &RaceConfig, rng: &mut R) -> u32 {
        let lane = rng.gen_range(0..self.lanes);
        let kind = ObstacleKind::roll(rng);
        let jitter = if config.speed_jitter > 0.0 {
            rng.gen_range(-config.speed_jitter..=config.speed_jitter)
        } else {
            0.0
        };
        let speed = config.lane_base_speed * kind.speed_multiplier() * (1.0 + jitter);

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.insert(
            id,
            Obstacle {
                id,
                lane,
                y: RACE_SPAWN_ROW,
                prev_y: RACE_SPAWN_ROW,
                kind,
                speed,
                color: kind.color(),
                passed: false,
            },
        );
        self.last_spawned = Some(id);
        id
    }

    /// Insert a hand-placed obstacle (scripted scenarios, tests).
    pub fn place_obstacle(&mut self, lane: u8, y: f64, kind: ObstacleKind, speed: f64) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.insert(
            id,
            Obstacle {
                id,
                lane,
                y,
                prev_y: y,
                kind,
                speed,
                color: kind.color(),
                passed: false,
            },
        );
        id
    }

    pub fn obstacles_in_lane(&self, lane: u8) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values().filter(move |o| o.lane == lane)
    }

    /// Reject a world that doesn't fit `config`: lane count must match and
    /// the car and every obstacle must sit in a real lane.
    pub fn validate(&self, config: &RaceConfig) -> Result<(), ConfigError> {
        if self.lanes != config.lanes {
            return Err(ConfigError::InvalidWorld {
                reason: "lane count differs from config",
            });
        }
        if self.lane >= self.lanes {
            return Err(ConfigError::InvalidWorld {
                reason: "car lane out of range",
            });
        }
        for obstacle in self.obstacles.values() {
            if obstacle.lane >= self.lanes {
                return Err(ConfigError::InvalidWorld {
                    reason: "obstacle lane out of range",
                });
            }
            let finite = [obstacle.y, obstacle.prev_y, obstacle.speed]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(ConfigError::InvalidWorld {
                    reason: "obstacle position or speed is not finite",
                });
            }
        }
        if self.next_id <= self.obstacles.keys().next_back().copied().unwrap_or(0) {
            return Err(ConfigError::InvalidWorld {
                reason: "next obstacle id already in use",
            });
        }
        Ok(())
    }
}
