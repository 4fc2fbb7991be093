//! Scripted players for headless runs.
//!
//! Deliberately simple: they see the same world the renderer sees and pick
//! a command for the next tick. Good enough to make runs last a while so
//! the pace controller gets exercised.

use crate::core::pace::Pace;
use crate::games::race::{LaneMove, RaceConfig, RaceWorld};
use crate::games::snake::{hits_body, Cell, Direction, SnakeWorld};

/// Ticks of warning the race autopilot wants before an obstacle arrives.
const RACE_LOOKAHEAD_TICKS: f64 = 4.0;

/// True if an obstacle in `lane` could reach the car within the lookahead.
fn lane_threatened(world: &RaceWorld, config: &RaceConfig, pace: &Pace, lane: u8) -> bool {
    world.obstacles_in_lane(lane).any(|o| {
        let reach = o.speed * pace.speed * RACE_LOOKAHEAD_TICKS;
        o.y < config.agent_row + config.crash_distance
            && o.y + reach > config.agent_row - config.crash_distance
    })
}

/// Stay put while the lane is clear, otherwise jump to the nearest clear lane.
pub fn race_move(world: &RaceWorld, config: &RaceConfig, pace: &Pace) -> Option<LaneMove> {
    if !lane_threatened(world, config, pace, world.lane) {
        return None;
    }
    (0..world.lanes)
        .filter(|&lane| lane != world.lane && !lane_threatened(world, config, pace, lane))
        .min_by_key(|&lane| (lane as i16 - world.lane as i16).abs())
        .map(LaneMove::To)
}

/// Distance on a wrapping axis.
fn wrapped_gap(a: i16, b: i16, size: i16) -> i16 {
    let d = (a - b).rem_euclid(size);
    d.min(size - d)
}

fn wrapped_distance(a: Cell, b: Cell, width: i16, height: i16) -> i16 {
    wrapped_gap(a.x, b.x, width) + wrapped_gap(a.y, b.y, height)
}

/// Greedy: head for the item along the wrapped grid, never into the body.
/// Returns `None` to keep going straight.
pub fn snake_turn(world: &SnakeWorld) -> Option<Direction> {
    let target = world.item.map(|item| item.cell);
    let (w, h) = (world.grid_width, world.grid_height);

    let mut best: Option<(i16, Direction)> = None;
    for direction in Direction::ALL {
        if world.direction.is_opposite(direction) {
            continue;
        }
        let head = world.head().stepped(direction, w, h);
        let grows = target == Some(head);
        if hits_body(world, head, grows) {
            continue;
        }
        let score = target.map_or(0, |t| wrapped_distance(head, t, w, h));
        // Ties keep the current heading.
        let better = match best {
            None => true,
            Some((s, d)) => {
                score < s || (score == s && direction == world.direction && d != world.direction)
            }
        };
        if better {
            best = Some((score, direction));
        }
    }

    match best {
        Some((_, direction)) if direction != world.direction => Some(direction),
        _ => None,
    }
}
