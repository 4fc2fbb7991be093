//! Car Race logic: lane changes, obstacle movement, swept collision, spawning.

use super::types::*;
use crate::core::engine::{Engine, GameRules};
use crate::core::error::ConfigError;
use crate::core::events::GameEvent;
use crate::core::pace::{Pace, PaceConfig};
use crate::core::run_state::EndReason;
use rand::Rng;

/// Race rules for the generic engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Race;

/// Shortest distance between `row` and the segment an obstacle swept this
/// tick. Checking the whole segment instead of the end point keeps fast
/// obstacles from jumping over the car between ticks.
pub fn swept_distance(from: f64, to: f64, row: f64) -> f64 {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    if row < lo {
        lo - row
    } else if row > hi {
        row - hi
    } else {
        0.0
    }
}

/// Lane the car ends up in for `mv`, or `None` if the command is ignored.
pub fn target_lane(world: &RaceWorld, mv: LaneMove) -> Option<u8> {
    let target = match mv {
        LaneMove::Left => world.lane.saturating_sub(1),
        LaneMove::Right => (world.lane + 1).min(world.lanes - 1),
        LaneMove::To(lane) if lane < world.lanes => lane,
        LaneMove::To(_) => return None,
    };
    (target != world.lane).then_some(target)
}

impl GameRules for Race {
    type Config = RaceConfig;
    type World = RaceWorld;
    type Input = LaneMove;
    type Motion = ();

    const END_REASON: EndReason = EndReason::Crash;

    fn validate(config: &RaceConfig) -> Result<(), ConfigError> {
        config.validate()
    }

    fn validate_world(world: &RaceWorld, config: &RaceConfig) -> Result<(), ConfigError> {
        world.validate(config)
    }

    fn pace_config(config: &RaceConfig) -> &PaceConfig {
        &config.pace
    }

    fn new_world<R: Rng>(config: &RaceConfig, _rng: &mut R) -> RaceWorld {
        RaceWorld::new(config)
    }

    fn steer(
        world: &mut RaceWorld,
        _config: &RaceConfig,
        mv: LaneMove,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(lane) = target_lane(world, mv) else {
            return;
        };
        events.push(GameEvent::LaneChanged {
            from: world.lane,
            to: lane,
        });
        world.lane = lane;
    }

    fn advance(world: &mut RaceWorld, _config: &RaceConfig, pace: &Pace) {
        for obstacle in world.obstacles.values_mut() {
            obstacle.prev_y = obstacle.y;
            obstacle.y += obstacle.speed * pace.speed;
        }
    }

    fn collides(world: &RaceWorld, config: &RaceConfig, _motion: &()) -> bool {
        world.obstacles_in_lane(world.lane).any(|o| {
            swept_distance(o.prev_y, o.y, config.agent_row) < config.crash_distance
        })
    }

    fn settle(
        world: &mut RaceWorld,
        config: &RaceConfig,
        _motion: (),
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        // An obstacle counts as avoided on the one tick its position crosses
        // the far edge of the crash zone.
        let edge = config.agent_row + config.crash_distance;
        let mut avoided = 0;
        for obstacle in world.obstacles.values_mut() {
            if !obstacle.passed && obstacle.prev_y < edge && obstacle.y >= edge {
                obstacle.passed = true;
                avoided += 1;
                events.push(GameEvent::ObstacleAvoided { id: obstacle.id });
            }
        }
        world.obstacles_passed += avoided;

        let track_length = config.track_length;
        world.obstacles.retain(|&id, o| {
            let on_track = o.y <= track_length;
            if !on_track {
                events.push(GameEvent::ObstacleCleared { id });
            }
            on_track
        });

        avoided
    }

    fn spawn<R: Rng>(
        world: &mut RaceWorld,
        config: &RaceConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if !world.spawn_gap_clear(config) {
            return;
        }
        if !rng.gen_bool(world.spawn_chance(config)) {
            return;
        }
        let id = world.spawn_obstacle(config, rng);
        let obstacle = &world.obstacles[&id];
        events.push(GameEvent::ObstacleSpawned {
            id,
            lane: obstacle.lane,
            kind: obstacle.kind,
        });
    }
}

impl Engine<Race> {
    /// Host control: move the car. Moving into the current lane does nothing.
    pub fn move_player(&mut self, mv: LaneMove) {
        self.send(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{new_session, step, EngineOptions, Session};
    use crate::core::run_state::RunState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Config with spawning switched off so tests control every obstacle.
    fn quiet_config() -> RaceConfig {
        RaceConfig {
            base_spawn_chance: 0.0,
            spawn_bonus_cap: 0.0,
            ..Default::default()
        }
    }

    fn running_session(config: &RaceConfig) -> Session<RaceWorld> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut session = new_session::<Race, _>(config, &mut rng);
        session.run_state = RunState::Running;
        session
    }

    #[test]
    fn test_swept_distance() {
        assert_eq!(swept_distance(10.0, 20.0, 15.0), 0.0);
        assert_eq!(swept_distance(10.0, 20.0, 25.0), 5.0);
        assert_eq!(swept_distance(10.0, 20.0, 4.0), 6.0);
        assert_eq!(swept_distance(20.0, 10.0, 4.0), 6.0);
    }

    #[test]
    fn test_target_lane() {
        let mut world = RaceWorld::new(&RaceConfig::default());
        assert_eq!(target_lane(&world, LaneMove::Left), None);
        assert_eq!(target_lane(&world, LaneMove::Right), Some(1));
        assert_eq!(target_lane(&world, LaneMove::To(0)), None);
        assert_eq!(target_lane(&world, LaneMove::To(7)), None);
        world.lane = 1;
        assert_eq!(target_lane(&world, LaneMove::Right), None);
        assert_eq!(target_lane(&world, LaneMove::To(0)), Some(0));
    }

    #[test]
    fn test_obstacle_in_lane_within_threshold_crashes() {
        let config = quiet_config();
        let mut session = running_session(&config);
        session
            .world
            .place_obstacle(0, config.agent_row - 3.0, ObstacleKind::Light, 0.5);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let stepped = step::<Race, _>(&config, &session, None, &mut rng);
        assert_eq!(stepped.session.run_state, RunState::Ended);
        assert!(stepped.events.contains(&GameEvent::RunEnded {
            reason: EndReason::Crash,
            score: 0
        }));
    }

    #[test]
    fn test_obstacle_in_other_lane_is_harmless() {
        let config = quiet_config();
        let mut session = running_session(&config);
        session
            .world
            .place_obstacle(1, config.agent_row, ObstacleKind::Heavy, 0.5);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let next = step::<Race, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.run_state, RunState::Running);
    }

    #[test]
    fn test_lane_change_into_obstacle_crashes() {
        let config = quiet_config();
        let mut session = running_session(&config);
        session
            .world
            .place_obstacle(1, config.agent_row, ObstacleKind::Static, 0.1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let next = step::<Race, _>(&config, &session, Some(LaneMove::Right), &mut rng).session;
        assert_eq!(next.world.lane, 1);
        assert_eq!(next.run_state, RunState::Ended);
    }

    #[test]
    fn test_lane_change_away_dodges() {
        let config = quiet_config();
        let mut session = running_session(&config);
        session
            .world
            .place_obstacle(0, config.agent_row - 2.0, ObstacleKind::Light, 1.0);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let next = step::<Race, _>(&config, &session, Some(LaneMove::Right), &mut rng).session;
        assert_eq!(next.world.lane, 1);
        assert_eq!(next.run_state, RunState::Running);
    }

    #[test]
    fn test_fast_obstacle_cannot_tunnel() {
        let config = quiet_config();
        let mut session = running_session(&config);
        // Starts above the crash zone and would land below it in one tick.
        session.world.place_obstacle(
            0,
            config.agent_row - config.crash_distance - 1.0,
            ObstacleKind::Light,
            config.crash_distance * 3.0,
        );

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let next = step::<Race, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.run_state, RunState::Ended);
    }

    #[test]
    fn test_avoided_obstacle_scores_once() {
        let config = quiet_config();
        let mut session = running_session(&config);
        let edge = config.agent_row + config.crash_distance;
        let id = session
            .world
            .place_obstacle(1, edge - 1.5, ObstacleKind::Light, 2.0);

        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let first = step::<Race, _>(&config, &session, None, &mut rng);
        assert_eq!(first.session.progress.score, 10);
        assert!(first.events.contains(&GameEvent::ObstacleAvoided { id }));
        assert_eq!(first.session.world.obstacles_passed, 1);

        let mut current = first.session;
        for _ in 0..5 {
            current = step::<Race, _>(&config, &current, None, &mut rng).session;
        }
        assert_eq!(current.progress.score, 10);
        assert_eq!(current.world.obstacles_passed, 1);
    }

    #[test]
    fn test_obstacle_removed_past_track_end() {
        let config = quiet_config();
        let mut session = running_session(&config);
        let id = session.world.place_obstacle(
            1,
            config.track_length - 0.5,
            ObstacleKind::Light,
            1.0,
        );

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let stepped = step::<Race, _>(&config, &session, None, &mut rng);
        assert!(stepped.session.world.obstacles.is_empty());
        assert!(stepped.events.contains(&GameEvent::ObstacleCleared { id }));
    }

    #[test]
    fn test_pace_speed_scales_movement() {
        let config = quiet_config();
        let mut session = running_session(&config);
        let id = session.world.place_obstacle(1, 10.0, ObstacleKind::Light, 1.0);
        session.progress.pace.speed = 1.5;

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let next = step::<Race, _>(&config, &session, None, &mut rng).session;
        let o = &next.world.obstacles[&id];
        assert!((o.y - 11.5).abs() < 1e-9);
        assert!((o.prev_y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_spawner_respects_gap() {
        let config = RaceConfig {
            base_spawn_chance: 1.0,
            spawn_bonus_cap: 0.0,
            ..Default::default()
        };
        let mut world = RaceWorld::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut events = Vec::new();

        Race::spawn(&mut world, &config, &mut rng, &mut events);
        Race::spawn(&mut world, &config, &mut rng, &mut events);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_move_player_starts_engine() {
        let mut engine = Engine::<Race>::new(
            quiet_config(),
            EngineOptions {
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        engine.move_player(LaneMove::Right);
        assert_eq!(engine.run_state(), RunState::Running);
        engine.tick();
        assert_eq!(engine.snapshot().world.lane, 1);
    }
}
