//! Car Race mini-game.
//!
//! The car sits near the bottom of a track split into a few lanes and hops
//! between them. Obstacles spawn at the top, travel down at their own speed
//! and leave past the far end. Dodging one scores; touching one in the car's
//! lane ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
