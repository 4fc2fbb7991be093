//! Terminal rendering for the menu and the two game scenes.

pub mod game_common;
pub mod menu;
pub mod race_scene;
pub mod snake_scene;

use arcade::event_log::EventLog;

/// Host-side values shown next to the engine snapshot.
pub struct Hud<'a> {
    pub difficulty: &'static str,
    pub best: Option<u32>,
    pub log: &'a EventLog,
    pub paused: bool,
    /// The run that just ended topped the best-score table.
    pub new_best: bool,
}
