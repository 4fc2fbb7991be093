//! Game select menu with per-game difficulty and best scores.

use super::game_common::{render_status_bar, to_color};
use arcade::build_info::version_line;
use arcade::games::{GameKind, RaceDifficulty, Rgb, SnakeDifficulty};
use arcade::utils::{HighScores, Settings};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Accent colours the player can cycle through.
pub const ACCENTS: [Rgb; 5] = [
    Rgb::new(255, 165, 0),
    Rgb::new(100, 255, 100),
    Rgb::new(80, 200, 255),
    Rgb::new(255, 105, 180),
    Rgb::new(200, 160, 255),
];

#[derive(Debug, Default)]
pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn selected_game(&self) -> GameKind {
        GameKind::ALL[self.selected.min(GameKind::ALL.len() - 1)]
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        if self.selected + 1 < GameKind::ALL.len() {
            self.selected += 1;
        }
    }
}

/// Step the selected game's difficulty by `delta`, wrapping.
pub fn cycle_difficulty(settings: &mut Settings, game: GameKind, delta: isize) {
    let step = |index: usize, len: usize| (index as isize + delta).rem_euclid(len as isize) as usize;
    match game {
        GameKind::Race => {
            let d = &mut settings.race_difficulty;
            *d = RaceDifficulty::from_index(step(d.index(), RaceDifficulty::ALL.len()));
        }
        GameKind::Snake => {
            let d = &mut settings.snake_difficulty;
            *d = SnakeDifficulty::from_index(step(d.index(), SnakeDifficulty::ALL.len()));
        }
    }
}

pub fn cycle_accent(settings: &mut Settings) {
    let current = ACCENTS.iter().position(|c| *c == settings.accent);
    settings.accent = ACCENTS[current.map_or(0, |i| (i + 1) % ACCENTS.len())];
}

fn difficulty_name(settings: &Settings, game: GameKind) -> &'static str {
    match game {
        GameKind::Race => settings.race_difficulty.name(),
        GameKind::Snake => settings.snake_difficulty.name(),
    }
}

pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    state: &MenuState,
    settings: &Settings,
    scores: &HighScores,
) {
    frame.render_widget(Clear, area);
    let accent = to_color(settings.accent);

    let block = Block::default()
        .title(" Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2 + GameKind::ALL.len() as u16 * 2),
            Constraint::Min(4),
            Constraint::Length(2),
        ])
        .split(inner);

    let mut game_lines = vec![Line::from("")];
    for (i, game) in GameKind::ALL.iter().enumerate() {
        let selected = i == state.selected;
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        game_lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(accent)),
            Span::styled(format!("{:<10}", game.name()), name_style),
            Span::styled(
                format!("  ◀ {} ▶", difficulty_name(settings, *game)),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        game_lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(game_lines).alignment(Alignment::Center),
        chunks[0],
    );

    let game = state.selected_game();
    let mut score_lines = vec![Line::from(Span::styled(
        format!("Best {} scores", game.name()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    let table = scores.table(game);
    if table.is_empty() {
        score_lines.push(Line::from(Span::styled(
            "No runs yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (rank, record) in table.iter().enumerate() {
        let when = chrono::DateTime::from_timestamp(record.recorded_at, 0)
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        score_lines.push(Line::from(vec![
            Span::styled(format!("{}. ", rank + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{:>6}", record.score), Style::default().fg(Color::White)),
            Span::styled(
                format!("  L{:<3} {:<11} {}", record.level, record.difficulty, when),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    score_lines.push(Line::from(""));
    score_lines.push(Line::from(Span::styled(
        version_line(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(
        Paragraph::new(score_lines).alignment(Alignment::Center),
        chunks[1],
    );

    render_status_bar(
        frame,
        chunks[2],
        "Pick a game",
        accent,
        &[
            ("[↑/↓]", "Game"),
            ("[←/→]", "Difficulty"),
            ("[C]", "Colour"),
            ("[Enter]", "Play"),
            ("[Q]", "Quit"),
        ],
    );
}
