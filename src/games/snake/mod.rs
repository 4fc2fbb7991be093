//! Snake mini-game.
//!
//! The snake crawls one cell per tick on a grid whose edges wrap around.
//! Eating the single item grows it by one segment; running into its own
//! body ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
