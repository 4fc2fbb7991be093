// Tick and timing
/// Host frame cadence for real-time games (~60 FPS).
pub const REALTIME_FRAME_MS: u64 = 16;
/// No game may tick faster than this, whatever its pace config says.
pub const MIN_TICK_INTERVAL_MS: u64 = REALTIME_FRAME_MS;
/// Elapsed time fed to the scheduler in one call is clamped to this,
/// so a stall (terminal resize, debugger) doesn't replay a burst of ticks.
pub const MAX_FRAME_DT_MS: u64 = 500;

// Scoring
pub const DEFAULT_POINTS_PER_EVENT: u32 = 10;
pub const DEFAULT_MILESTONE_EVERY: u32 = 5;

// Race track geometry (abstract units, y grows toward the player)
pub const RACE_DEFAULT_LANES: u8 = 2;
pub const RACE_MAX_LANES: u8 = 5;
pub const RACE_TRACK_LENGTH: f64 = 100.0;
pub const RACE_AGENT_ROW: f64 = 85.0;
pub const RACE_CRASH_DISTANCE: f64 = 6.0;
pub const RACE_SPAWN_ROW: f64 = 0.0;
pub const RACE_MIN_SPAWN_GAP: f64 = 18.0;

// Race obstacle kinds: (spawn weight, speed multiplier)
pub const RACE_LIGHT_KIND: (u32, f64) = (70, 1.0);
pub const RACE_HEAVY_KIND: (u32, f64) = (22, 1.25);
pub const RACE_STATIC_KIND: (u32, f64) = (8, 0.7);

// Snake grid
pub const SNAKE_DEFAULT_GRID: i16 = 20;
pub const SNAKE_MIN_GRID: i16 = 4;
pub const SNAKE_INITIAL_LENGTH: usize = 3;
/// Random probes per free cell before the item spawner falls back to enumeration.
pub const SNAKE_SPAWN_PROBES_PER_CELL: usize = 4;

// Event log
pub const EVENT_LOG_CAPACITY: usize = 50;

// High scores kept per game
pub const HIGH_SCORES_PER_GAME: usize = 5;
