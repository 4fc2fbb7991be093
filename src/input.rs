//! Key translation for the terminal host.
//!
//! The engine only understands movement commands and lifecycle calls; this
//! module turns raw key events into those. Nothing here touches game state.

use arcade::games::{Direction, LaneMove};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Left,
    Right,
    Play,
    CycleAccent,
    Quit,
}

/// A command for a running game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand<I> {
    /// Movement; also starts a fresh run or resets an ended one.
    Move(I),
    Start,
    TogglePause,
    /// Leave to the menu.
    Back,
    Quit,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn menu_command(key: KeyEvent) -> Option<MenuCommand> {
    if is_ctrl_c(&key) {
        return Some(MenuCommand::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(MenuCommand::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(MenuCommand::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(MenuCommand::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(MenuCommand::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuCommand::Play),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(MenuCommand::CycleAccent),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuCommand::Quit),
        _ => None,
    }
}

/// Keys shared by both game screens.
fn common_command<I>(key: &KeyEvent) -> Option<GameCommand<I>> {
    if is_ctrl_c(key) {
        return Some(GameCommand::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameCommand::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::TogglePause),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameCommand::Back),
        _ => None,
    }
}

/// Arrows / A-D step one lane; digit keys jump straight to a lane.
pub fn race_command(key: KeyEvent) -> Option<GameCommand<LaneMove>> {
    let mv = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => LaneMove::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => LaneMove::Right,
        KeyCode::Char(c @ '1'..='9') => LaneMove::To(c as u8 - b'1'),
        _ => return common_command(&key),
    };
    Some(GameCommand::Move(mv))
}

/// Arrows or WASD.
pub fn snake_command(key: KeyEvent) -> Option<GameCommand<Direction>> {
    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,
        _ => return common_command(&key),
    };
    Some(GameCommand::Move(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_race_keys() {
        assert_eq!(
            race_command(key(KeyCode::Left)),
            Some(GameCommand::Move(LaneMove::Left))
        );
        assert_eq!(
            race_command(key(KeyCode::Char('2'))),
            Some(GameCommand::Move(LaneMove::To(1)))
        );
        assert_eq!(race_command(key(KeyCode::Up)), None);
        assert_eq!(race_command(key(KeyCode::Esc)), Some(GameCommand::Back));
    }

    #[test]
    fn test_snake_keys() {
        assert_eq!(
            snake_command(key(KeyCode::Char('w'))),
            Some(GameCommand::Move(Direction::Up))
        );
        assert_eq!(
            snake_command(key(KeyCode::Char('p'))),
            Some(GameCommand::TogglePause)
        );
        assert_eq!(snake_command(key(KeyCode::Char(' '))), Some(GameCommand::Start));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(menu_command(ctrl_c), Some(MenuCommand::Quit));
        assert_eq!(snake_command(ctrl_c), Some(GameCommand::Quit));
        assert_eq!(race_command(ctrl_c), Some(GameCommand::Quit));
    }
}
