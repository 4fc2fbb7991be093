//! Main simulation runner.
//!
//! Drives the pure `step` function directly instead of the wall-clock
//! engine, so a run is just a loop of ticks. Statistics are collected from
//! the emitted events.

use super::autopilot::{race_move, snake_turn};
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::engine::{new_session, step, GameRules, Session};
use crate::core::events::GameEvent;
use crate::core::run_state::RunState;
use crate::event_log::describe;
use crate::games::{GameKind, Race, RaceConfig, Snake, SnakeConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let race_config = config.race_config();
    let snake_config = config.snake_config();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = config.seed.map(|seed| seed.wrapping_add(run_idx as u64));
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let verbose = config.verbosity >= 3;
        let stats = match config.game {
            GameKind::Race => {
                simulate_race_run(&race_config, config.max_ticks_per_run, &mut rng, verbose)
            }
            GameKind::Snake => {
                simulate_snake_run(&snake_config, config.max_ticks_per_run, &mut rng, verbose)
            }
        };

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Score {}, Level {}, Ticks {}{}",
                run_idx + 1,
                config.num_runs,
                stats.score,
                stats.level,
                stats.ticks,
                if stats.timed_out { " (timed out)" } else { "" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config.game, config.difficulty_name(), all_runs)
}

/// Play one race run with the autopilot.
pub fn simulate_race_run(
    config: &RaceConfig,
    max_ticks: u64,
    rng: &mut ChaCha8Rng,
    verbose: bool,
) -> RunStats {
    simulate_run::<Race, _>(config, max_ticks, rng, verbose, |session| {
        race_move(&session.world, config, &session.progress.pace)
    })
}

/// Play one snake run with the autopilot.
pub fn simulate_snake_run(
    config: &SnakeConfig,
    max_ticks: u64,
    rng: &mut ChaCha8Rng,
    verbose: bool,
) -> RunStats {
    simulate_run::<Snake, _>(config, max_ticks, rng, verbose, |session| {
        snake_turn(&session.world)
    })
}

fn simulate_run<G, F>(
    config: &G::Config,
    max_ticks: u64,
    rng: &mut ChaCha8Rng,
    verbose: bool,
    mut pilot: F,
) -> RunStats
where
    G: GameRules,
    F: FnMut(&Session<G::World>) -> Option<G::Input>,
{
    let mut session = new_session::<G, _>(config, rng);
    session.run_state = RunState::Running;
    let mut stats = RunStats::default();

    while session.run_state.is_running() && session.tick < max_ticks {
        let input = pilot(&session);
        let stepped = step::<G, _>(config, &session, input, rng);
        session = stepped.session;

        for event in &stepped.events {
            if let GameEvent::LevelUp { .. } = event {
                stats.level_up_ticks.push(session.tick);
            }
            if verbose {
                if let Some(entry) = describe(event) {
                    println!("  [{:>6}] {}", session.tick, entry.message);
                }
            }
        }
    }

    stats.ticks = session.tick;
    stats.score = session.progress.score;
    stats.scoring_events = session.progress.scoring_events;
    stats.level = session.progress.pace.level;
    stats.final_interval_ms = session.progress.pace.tick_interval_ms;
    stats.final_speed = session.progress.pace.speed;
    stats.timed_out = session.run_state.is_running();
    stats
}
