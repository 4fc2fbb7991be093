//! Snake game data structures.

use crate::core::constants::{
    SNAKE_DEFAULT_GRID, SNAKE_INITIAL_LENGTH, SNAKE_MIN_GRID, SNAKE_SPAWN_PROBES_PER_CELL,
};
use crate::core::error::ConfigError;
use crate::core::pace::PaceConfig;
use crate::games::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Difficulty levels for Snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(SnakeDifficulty);

impl SnakeDifficulty {
    /// Step interval in milliseconds at level 0 (lower = faster).
    pub fn move_interval_ms(&self) -> u64 {
        match self {
            Self::Novice => 200,
            Self::Apprentice => 150,
            Self::Journeyman => 120,
            Self::Master => 90,
        }
    }

    /// Fastest step interval reachable by levelling up.
    pub fn min_interval_ms(&self) -> u64 {
        match self {
            Self::Novice => 100,
            Self::Apprentice => 80,
            Self::Journeyman => 60,
            Self::Master => 45,
        }
    }

    pub fn pace(&self) -> PaceConfig {
        PaceConfig {
            base_interval_ms: self.move_interval_ms(),
            interval_step_ms: match self {
                Self::Novice | Self::Apprentice => 10,
                Self::Journeyman => 8,
                Self::Master => 6,
            },
            min_interval_ms: self.min_interval_ms(),
            // The snake has no obstacles to speed up; only the tick shortens.
            speed_step: 0.0,
            max_speed: 1.0,
            ..PaceConfig::default()
        }
    }
}

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the (dx, dy) delta for this direction. Up is toward row 0.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, wrapping around the grid edges.
    pub fn stepped(&self, direction: Direction, width: i16, height: i16) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: (self.x + dx).rem_euclid(width),
            y: (self.y + dy).rem_euclid(height),
        }
    }
}

/// The thing the snake eats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub cell: Cell,
    pub color: Rgb,
}

/// Fruit colours; purely cosmetic.
pub const ITEM_COLORS: [Rgb; 5] = [
    Rgb::new(255, 80, 40),
    Rgb::new(255, 200, 40),
    Rgb::new(160, 90, 255),
    Rgb::new(255, 105, 180),
    Rgb::new(80, 200, 255),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub grid_width: i16,
    pub grid_height: i16,
    pub initial_length: usize,
    pub pace: PaceConfig,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self::for_difficulty(SnakeDifficulty::Novice)
    }
}

impl SnakeConfig {
    pub fn for_difficulty(difficulty: SnakeDifficulty) -> Self {
        Self {
            grid_width: SNAKE_DEFAULT_GRID,
            grid_height: SNAKE_DEFAULT_GRID,
            initial_length: SNAKE_INITIAL_LENGTH,
            pace: difficulty.pace(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < SNAKE_MIN_GRID || self.grid_height < SNAKE_MIN_GRID {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: SNAKE_MIN_GRID,
            });
        }
        // The starting body lies on one row, so it has to fit in it with
        // room to spare for the first item.
        if self.initial_length == 0 || self.initial_length >= self.grid_width as usize {
            return Err(ConfigError::SnakeLength {
                length: self.initial_length,
                width: self.grid_width,
            });
        }
        self.pace.validate()
    }
}

/// Everything on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeWorld {
    pub grid_width: i16,
    pub grid_height: i16,
    /// Body segments, head first.
    pub body: VecDeque<Cell>,
    pub direction: Direction,
    /// Always `Some` while a run is live; empty only between eating and respawning.
    pub item: Option<Item>,
}

impl SnakeWorld {
    /// Snake centred, facing right, body trailing to the left; no item yet.
    pub fn new(config: &SnakeConfig) -> Self {
        let center_x = config.grid_width / 2;
        let center_y = config.grid_height / 2;
        let body = (0..config.initial_length as i16)
            .map(|i| Cell::new((center_x - i).rem_euclid(config.grid_width), center_y))
            .collect();

        Self {
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            body,
            direction: Direction::Right,
            item: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Reject a world that doesn't fit `config`: same grid, a non-empty body
    /// of distinct on-grid cells, and an item (if any) on a free cell.
    pub fn validate(&self, config: &SnakeConfig) -> Result<(), ConfigError> {
        if self.grid_width != config.grid_width || self.grid_height != config.grid_height {
            return Err(ConfigError::InvalidWorld {
                reason: "grid size differs from config",
            });
        }
        if self.body.is_empty() {
            return Err(ConfigError::InvalidWorld {
                reason: "snake body is empty",
            });
        }
        if self.body.len() >= self.cell_count() {
            return Err(ConfigError::InvalidWorld {
                reason: "snake leaves no free cell",
            });
        }
        let mut seen = HashSet::with_capacity(self.body.len());
        for cell in &self.body {
            if !self.on_grid(*cell) {
                return Err(ConfigError::InvalidWorld {
                    reason: "snake segment off the grid",
                });
            }
            if !seen.insert(*cell) {
                return Err(ConfigError::InvalidWorld {
                    reason: "snake segments overlap",
                });
            }
        }
        if let Some(item) = self.item {
            if !self.on_grid(item.cell) || seen.contains(&item.cell) {
                return Err(ConfigError::InvalidWorld {
                    reason: "item not on a free cell",
                });
            }
        }
        Ok(())
    }

    fn on_grid(&self, cell: Cell) -> bool {
        (0..self.grid_width).contains(&cell.x) && (0..self.grid_height).contains(&cell.y)
    }
}

/// Pick a uniformly random cell not covered by the snake.
///
/// Rejection-samples first; on a crowded board falls back to choosing among
/// the enumerated free cells.
///
/// # Panics
///
/// If the snake covers every cell. Configuration validation keeps the
/// starting snake far smaller than the grid, so reaching this is a bug.
pub fn spawn_item<R: Rng>(world: &SnakeWorld, rng: &mut R) -> Item {
    let color = ITEM_COLORS[rng.gen_range(0..ITEM_COLORS.len())];
    let cells = world.cell_count();

    for _ in 0..cells * SNAKE_SPAWN_PROBES_PER_CELL {
        let cell = Cell::new(
            rng.gen_range(0..world.grid_width),
            rng.gen_range(0..world.grid_height),
        );
        if !world.occupies(cell) {
            return Item { cell, color };
        }
    }

    let free: Vec<Cell> = (0..world.grid_height)
        .flat_map(|y| (0..world.grid_width).map(move |x| Cell::new(x, y)))
        .filter(|cell| !world.occupies(*cell))
        .collect();
    assert!(
        !free.is_empty(),
        "snake covers all {cells} cells; no room for an item"
    );
    Item {
        cell: free[rng.gen_range(0..free.len())],
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_world_defaults() {
        let world = SnakeWorld::new(&SnakeConfig::default());
        assert_eq!(world.len(), 3);
        assert_eq!(world.direction, Direction::Right);
        assert_eq!(world.grid_width, 20);
        assert_eq!(world.grid_height, 20);
        assert!(world.item.is_none());
    }

    #[test]
    fn test_snake_initial_position() {
        let world = SnakeWorld::new(&SnakeConfig::default());
        assert_eq!(world.head(), Cell::new(10, 10));
        assert_eq!(world.body[1], Cell::new(9, 10));
        assert_eq!(world.body[2], Cell::new(8, 10));
    }

    #[test]
    fn test_long_initial_snake_wraps_without_overlap() {
        let config = SnakeConfig {
            grid_width: 6,
            grid_height: 6,
            initial_length: 5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let world = SnakeWorld::new(&config);
        for (i, a) in world.body.iter().enumerate() {
            assert!(a.x >= 0 && a.x < 6);
            assert!(world.body.iter().skip(i + 1).all(|b| b != a));
        }
    }

    #[test]
    fn test_difficulty_parameters() {
        assert_eq!(SnakeDifficulty::Novice.move_interval_ms(), 200);
        assert_eq!(SnakeDifficulty::Master.move_interval_ms(), 90);
        for d in SnakeDifficulty::ALL {
            assert!(d.pace().validate().is_ok(), "{} pace invalid", d.name());
            assert!(SnakeConfig::for_difficulty(d).validate().is_ok());
        }
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(!Direction::Up.is_opposite(Direction::Left));
    }

    #[test]
    fn test_cell_stepped_wraps_both_axes() {
        let (w, h) = (20, 20);
        assert_eq!(Cell::new(19, 5).stepped(Direction::Right, w, h), Cell::new(0, 5));
        assert_eq!(Cell::new(0, 5).stepped(Direction::Left, w, h), Cell::new(19, 5));
        assert_eq!(Cell::new(7, 19).stepped(Direction::Down, w, h), Cell::new(7, 0));
        assert_eq!(Cell::new(7, 0).stepped(Direction::Up, w, h), Cell::new(7, 19));
        assert_eq!(Cell::new(3, 3).stepped(Direction::Right, w, h), Cell::new(4, 3));
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        let config = SnakeConfig {
            grid_width: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_length() {
        for length in [0, 20, 50] {
            let config = SnakeConfig {
                initial_length: length,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::SnakeLength { .. })
            ));
        }
    }

    #[test]
    fn test_spawn_item_avoids_snake() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let world = SnakeWorld::new(&SnakeConfig::default());
        for _ in 0..200 {
            let item = spawn_item(&world, &mut rng);
            assert!(!world.occupies(item.cell));
            assert!(item.cell.x >= 0 && item.cell.x < world.grid_width);
            assert!(item.cell.y >= 0 && item.cell.y < world.grid_height);
        }
    }

    #[test]
    fn test_spawn_item_finds_last_free_cell() {
        let config = SnakeConfig {
            grid_width: 4,
            grid_height: 4,
            initial_length: 3,
            ..Default::default()
        };
        let mut world = SnakeWorld::new(&config);
        world.body = (0..4)
            .flat_map(|y| (0..4).map(move |x| Cell::new(x, y)))
            .filter(|c| *c != Cell::new(2, 3))
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(spawn_item(&world, &mut rng).cell, Cell::new(2, 3));
    }

    #[test]
    #[should_panic(expected = "no room for an item")]
    fn test_spawn_item_on_full_board_panics() {
        let config = SnakeConfig {
            grid_width: 4,
            grid_height: 4,
            initial_length: 3,
            ..Default::default()
        };
        let mut world = SnakeWorld::new(&config);
        world.body = (0..4)
            .flat_map(|y| (0..4).map(move |x| Cell::new(x, y)))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        spawn_item(&world, &mut rng);
    }

    #[test]
    fn test_world_validation() {
        let config = SnakeConfig::default();
        let mut world = SnakeWorld::new(&config);
        world.item = Some(Item {
            cell: Cell::new(0, 0),
            color: ITEM_COLORS[0],
        });
        assert!(world.validate(&config).is_ok());

        let mut empty = world.clone();
        empty.body.clear();
        assert!(matches!(
            empty.validate(&config),
            Err(ConfigError::InvalidWorld { reason: "snake body is empty" })
        ));

        let mut resized = world.clone();
        resized.grid_width = 10;
        assert!(resized.validate(&config).is_err());

        let mut outside = world.clone();
        outside.body[1] = Cell::new(20, 10);
        assert!(outside.validate(&config).is_err());

        let mut folded = world.clone();
        folded.body[2] = folded.body[0];
        assert!(folded.validate(&config).is_err());

        let mut buried = world;
        buried.item = Some(Item {
            cell: buried.head(),
            color: ITEM_COLORS[0],
        });
        assert!(buried.validate(&config).is_err());
    }
}
