//! Integration test: Car Race through the host-facing engine surface.
//!
//! Scenarios are built by placing obstacles directly into a session and
//! handing it to the engine, then driving it with the same calls the
//! terminal host makes.

use arcade::core::{new_session, ConfigError, Engine, EngineOptions, GameEvent, RunState, Session};
use arcade::core::run_state::EndReason;
use arcade::games::race::{LaneMove, ObstacleKind, Race, RaceConfig, RaceDifficulty, RaceWorld};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

fn options(seed: u64) -> EngineOptions {
    EngineOptions {
        seed: Some(seed),
        ..Default::default()
    }
}

/// Default race with spawning switched off.
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

// =============================================================================
// Crash Scenario
// =============================================================================

#[test]
fn test_crash_in_lane_zero_ends_run() {
    let config = quiet_config();
    let mut session = running_session(&config);
    session
        .world
        .place_obstacle(0, config.agent_row - 2.0, ObstacleKind::Light, 1.0);

    let mut engine = Engine::<Race>::from_session(config, options(1), session).unwrap();
    let scores = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&scores);
    engine.on_score_change(move |s| sink.borrow_mut().push(s));

    assert!(engine.tick());

    assert_eq!(engine.run_state(), RunState::Ended);
    assert!(!engine.scheduler().is_running());
    assert!(scores.borrow().is_empty());
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::RunEnded {
        reason: EndReason::Crash,
        score: 0
    }));

    // Further time does nothing.
    assert!(!engine.update(10_000));
    assert_eq!(engine.session().tick, 1);
}

#[test]
fn test_move_after_crash_resets_to_fresh_run() {
    let config = quiet_config();
    let mut session = running_session(&config);
    session.progress.score = 40;
    session
        .world
        .place_obstacle(0, config.agent_row, ObstacleKind::Static, 0.5);

    let mut engine = Engine::<Race>::from_session(config, options(2), session).unwrap();
    engine.tick();
    assert_eq!(engine.run_state(), RunState::Ended);

    engine.move_player(LaneMove::Right);

    let snap = engine.snapshot();
    assert_eq!(snap.run_state, RunState::Running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.world.lane, 0, "reset consumes the move");
    assert!(snap.world.obstacles.is_empty());
    assert_eq!(snap.pace.level, 0);
    assert!(engine.scheduler().is_running());
    assert!(engine.drain_events().contains(&GameEvent::RunReset));
}

#[test]
fn test_dodging_scores_and_notifies() {
    let config = quiet_config();
    let mut session = running_session(&config);
    // In lane 0, about to arrive; the car moves out of the way first.
    session
        .world
        .place_obstacle(0, config.agent_row - config.crash_distance - 3.0, ObstacleKind::Light, 2.0);

    let mut engine = Engine::<Race>::from_session(config, options(3), session).unwrap();
    let scores = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&scores);
    engine.on_score_change(move |s| sink.borrow_mut().push(s));

    engine.move_player(LaneMove::Right);
    for _ in 0..20 {
        engine.tick();
    }

    assert_eq!(engine.run_state(), RunState::Running);
    assert_eq!(engine.score(), 10);
    assert_eq!(*scores.borrow(), vec![10]);
    assert_eq!(engine.snapshot().world.obstacles_passed, 1);
}

// =============================================================================
// Lane Movement
// =============================================================================

#[test]
fn test_lane_stays_in_range() {
    let config = RaceConfig {
        lanes: 3,
        ..quiet_config()
    };
    let mut engine = Engine::<Race>::new(config, options(4)).unwrap();
    engine.start();

    for mv in [
        LaneMove::Left,
        LaneMove::Left,
        LaneMove::Right,
        LaneMove::Right,
        LaneMove::Right,
        LaneMove::Right,
        LaneMove::To(9),
        LaneMove::To(1),
    ] {
        engine.move_player(mv);
        engine.tick();
        let world = engine.snapshot().world;
        assert!(world.lane < world.lanes);
    }
    assert_eq!(engine.snapshot().world.lane, 1);
}

#[test]
fn test_same_lane_move_is_silent() {
    let mut engine = Engine::<Race>::new(quiet_config(), options(5)).unwrap();
    engine.start();
    engine.drain_events();

    engine.move_player(LaneMove::To(0));
    engine.tick();

    let events = engine.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::LaneChanged { .. })));
}

#[test]
fn test_first_move_starts_and_is_applied_next_tick() {
    let mut engine = Engine::<Race>::new(quiet_config(), options(6)).unwrap();
    engine.move_player(LaneMove::Right);
    assert_eq!(engine.run_state(), RunState::Running);
    assert_eq!(engine.snapshot().world.lane, 0);

    engine.tick();
    assert_eq!(engine.snapshot().world.lane, 1);
}

// =============================================================================
// Scheduling
// =============================================================================

#[test]
fn test_update_runs_ticks_at_pace_interval() {
    let config = RaceConfig::for_difficulty(RaceDifficulty::Novice);
    let interval = config.pace.base_interval_ms;
    let mut engine = Engine::<Race>::new(config, options(7)).unwrap();
    engine.start();

    engine.update(interval * 3 + interval / 2);
    assert_eq!(engine.session().tick, 3);
}

#[test]
fn test_stop_halts_ticks_immediately() {
    let mut engine = Engine::<Race>::new(quiet_config(), options(8)).unwrap();
    engine.start();
    engine.stop();
    assert!(!engine.update(5_000));
    assert_eq!(engine.session().tick, 0);
    assert_eq!(engine.run_state(), RunState::Running);
}

#[test]
fn test_invalid_config_rejected() {
    let config = RaceConfig {
        lanes: 0,
        ..Default::default()
    };
    assert!(Engine::<Race>::new(config, options(9)).is_err());
}

#[test]
fn test_session_with_wrong_lane_count_rejected() {
    let config = RaceConfig::default();
    let mut session = running_session(&config);
    session.world.lanes = config.lanes + 2;
    session.world.lane = config.lanes + 1;

    let opened = Engine::<Race>::from_session(config, options(10), session);
    assert!(matches!(opened, Err(ConfigError::InvalidWorld { .. })));
}
