//! Snake game logic: wraparound movement, self collision, item respawn.

use super::types::*;
use crate::core::engine::{Engine, GameRules};
use crate::core::error::ConfigError;
use crate::core::events::GameEvent;
use crate::core::pace::{Pace, PaceConfig};
use crate::core::run_state::EndReason;
use rand::Rng;

/// Snake rules for the generic engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snake;

/// Where the head goes this tick and whether that eats the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeMotion {
    pub head: Cell,
    pub grows: bool,
}

/// The head's next cell in the current direction, wrapped.
pub fn next_head(world: &SnakeWorld) -> Cell {
    world
        .head()
        .stepped(world.direction, world.grid_width, world.grid_height)
}

/// True if `head` lands on the body.
///
/// When the move doesn't grow, the tail moves out of the way this same tick,
/// so its cell is free and chasing your own tail is allowed.
pub fn hits_body(world: &SnakeWorld, head: Cell, grows: bool) -> bool {
    let checked = if grows {
        world.body.len()
    } else {
        world.body.len().saturating_sub(1)
    };
    world.body.iter().take(checked).any(|&seg| seg == head)
}

impl GameRules for Snake {
    type Config = SnakeConfig;
    type World = SnakeWorld;
    type Input = Direction;
    type Motion = SnakeMotion;

    const END_REASON: EndReason = EndReason::SelfCollision;

    fn validate(config: &SnakeConfig) -> Result<(), ConfigError> {
        config.validate()
    }

    fn validate_world(world: &SnakeWorld, config: &SnakeConfig) -> Result<(), ConfigError> {
        world.validate(config)
    }

    fn pace_config(config: &SnakeConfig) -> &PaceConfig {
        &config.pace
    }

    fn new_world<R: Rng>(config: &SnakeConfig, rng: &mut R) -> SnakeWorld {
        let mut world = SnakeWorld::new(config);
        world.item = Some(spawn_item(&world, rng));
        world
    }

    fn steer(
        world: &mut SnakeWorld,
        _config: &SnakeConfig,
        direction: Direction,
        events: &mut Vec<GameEvent>,
    ) {
        // Reversing would fold the head straight into the neck.
        if direction == world.direction || world.direction.is_opposite(direction) {
            return;
        }
        events.push(GameEvent::DirectionChanged {
            from: world.direction,
            to: direction,
        });
        world.direction = direction;
    }

    fn advance(world: &mut SnakeWorld, _config: &SnakeConfig, _pace: &Pace) -> SnakeMotion {
        let head = next_head(world);
        let grows = world.item.is_some_and(|item| item.cell == head);
        SnakeMotion { head, grows }
    }

    fn collides(world: &SnakeWorld, _config: &SnakeConfig, motion: &SnakeMotion) -> bool {
        hits_body(world, motion.head, motion.grows)
    }

    fn settle(
        world: &mut SnakeWorld,
        _config: &SnakeConfig,
        motion: SnakeMotion,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        world.body.push_front(motion.head);

        if !motion.grows {
            world.body.pop_back();
            return 0;
        }

        world.item = None;
        events.push(GameEvent::ItemConsumed {
            cell: motion.head,
            length: world.body.len(),
        });
        1
    }

    fn spawn<R: Rng>(
        world: &mut SnakeWorld,
        _config: &SnakeConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if world.item.is_some() {
            return;
        }
        let item = spawn_item(world, rng);
        events.push(GameEvent::ItemSpawned { cell: item.cell });
        world.item = Some(item);
    }
}

impl Engine<Snake> {
    /// Host control: request a new heading. Reversals are ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        self.send(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{new_session, step, EngineOptions, Session};
    use crate::core::run_state::RunState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn running_session(config: &SnakeConfig, rng: &mut ChaCha8Rng) -> Session<SnakeWorld> {
        let mut session = new_session::<Snake, _>(config, rng);
        session.run_state = RunState::Running;
        session
    }

    fn place_item(session: &mut Session<SnakeWorld>, cell: Cell) {
        session.world.item = Some(Item {
            cell,
            color: ITEM_COLORS[0],
        });
    }

    /// Item somewhere the next few moves will not reach.
    fn park_item(session: &mut Session<SnakeWorld>) {
        place_item(session, Cell::new(0, 0));
    }

    #[test]
    fn test_new_world_has_item_off_body() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let world = Snake::new_world(&SnakeConfig::default(), &mut rng);
        let item = world.item.expect("item spawned");
        assert!(!world.occupies(item.cell));
    }

    #[test]
    fn test_normal_move_keeps_length() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);

        let next = step::<Snake, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.world.len(), 3);
        assert_eq!(next.world.head(), Cell::new(11, 10));
        assert_eq!(next.world.body[2], Cell::new(9, 10));
        assert_eq!(next.progress.score, 0);
    }

    #[test]
    fn test_eating_item_directly_ahead() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = running_session(&config, &mut rng);
        let ahead = Cell::new(11, 10);
        place_item(&mut session, ahead);

        let stepped = step::<Snake, _>(&config, &session, None, &mut rng);
        let world = &stepped.session.world;

        assert_eq!(world.head(), ahead);
        assert_eq!(world.len(), 4);
        let item = world.item.expect("new item");
        assert_ne!(item.cell, ahead);
        assert!(!world.occupies(item.cell));
        assert_eq!(stepped.session.progress.score, 10);
        assert!(stepped.events.contains(&GameEvent::ItemConsumed {
            cell: ahead,
            length: 4
        }));
    }

    #[test]
    fn test_reverse_request_ignored() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);
        session.world.direction = Direction::Down;

        let next = step::<Snake, _>(&config, &session, Some(Direction::Up), &mut rng).session;
        assert_eq!(next.world.direction, Direction::Down);
        assert_eq!(next.run_state, RunState::Running);
    }

    #[test]
    fn test_turn_applies_before_move() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);

        let stepped = step::<Snake, _>(&config, &session, Some(Direction::Up), &mut rng);
        assert_eq!(stepped.session.world.direction, Direction::Up);
        assert_eq!(stepped.session.world.head(), Cell::new(10, 9));
        assert!(stepped.events.contains(&GameEvent::DirectionChanged {
            from: Direction::Right,
            to: Direction::Up
        }));
    }

    #[test]
    fn test_wraparound_moves_to_opposite_edge() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);
        session.world.body = [Cell::new(19, 4), Cell::new(18, 4), Cell::new(17, 4)].into();

        let next = step::<Snake, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.world.head(), Cell::new(0, 4));
        assert_eq!(next.run_state, RunState::Running);
    }

    #[test]
    fn test_self_collision_ends_run() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);
        // Head at (5,5) moving down into its own body at (5,6).
        session.world.body = [
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
            Cell::new(4, 6),
        ]
        .into();
        session.world.direction = Direction::Down;

        let stepped = step::<Snake, _>(&config, &session, None, &mut rng);
        assert_eq!(stepped.session.run_state, RunState::Ended);
        assert!(stepped.events.contains(&GameEvent::RunEnded {
            reason: EndReason::SelfCollision,
            score: 0
        }));
    }

    #[test]
    fn test_collision_through_wrapped_edge() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);
        // Head on the right edge; body occupies the wrapped-to cell on the left edge.
        session.world.body = [
            Cell::new(19, 8),
            Cell::new(19, 9),
            Cell::new(0, 9),
            Cell::new(0, 8),
            Cell::new(0, 7),
        ]
        .into();
        session.world.direction = Direction::Right;

        let next = step::<Snake, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.run_state, RunState::Ended);
    }

    #[test]
    fn test_chasing_tail_is_allowed() {
        let config = SnakeConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut session = running_session(&config, &mut rng);
        park_item(&mut session);
        // A 2x2 loop: head moves into the cell the tail is leaving.
        session.world.body = [
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
        ]
        .into();
        session.world.direction = Direction::Right;

        let next = step::<Snake, _>(&config, &session, None, &mut rng).session;
        assert_eq!(next.run_state, RunState::Running);
        assert_eq!(next.world.head(), Cell::new(6, 5));
        assert_eq!(next.world.len(), 4);
    }

    #[test]
    fn test_growing_into_tail_collides() {
        let mut world = SnakeWorld::new(&SnakeConfig::default());
        world.body = [
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
        ]
        .into();
        assert!(!hits_body(&world, Cell::new(6, 5), false));
        assert!(hits_body(&world, Cell::new(6, 5), true));
    }

    #[test]
    fn test_engine_change_direction_starts_run() {
        let mut engine = Engine::<Snake>::new(
            SnakeConfig::default(),
            EngineOptions {
                seed: Some(11),
                ..Default::default()
            },
        )
        .unwrap();
        engine.change_direction(Direction::Down);
        assert_eq!(engine.run_state(), RunState::Running);
        engine.tick();
        assert_eq!(engine.snapshot().world.direction, Direction::Down);
    }
}
