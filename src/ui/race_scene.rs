//! Car Race game UI rendering.
//!
//! The track is drawn top to bottom: track position 0 is the first row of the
//! play field and `track_length` the last. Lanes are equal-width columns.

use super::game_common::{
    create_game_layout, event_log_lines, info_line, render_center_prompt,
    render_game_over_banner, render_info_panel_frame, render_status_bar, to_color,
};
use super::Hud;
use arcade::core::{RunState, Snapshot};
use arcade::games::race::{ObstacleKind, RaceConfig, RaceWorld};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LANE_DIVIDER: char = '\u{250A}'; // ┊
const TRACK_EDGE: char = '\u{2551}'; // ║
const CAR_GLYPH: &str = "▟█▙";
const TRACK_BG: Color = Color::Rgb(30, 30, 34);
const EDGE_COLOR: Color = Color::Rgb(200, 200, 200);
const LANE_WIDTH: u16 = 7;

fn obstacle_glyph(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Light => "▄█▄",
        ObstacleKind::Heavy => "███",
        ObstacleKind::Static => "▓▓▓",
    }
}

/// Render the Car Race game scene.
pub fn render_race_scene(
    frame: &mut Frame,
    area: Rect,
    snap: &Snapshot<'_, RaceWorld>,
    config: &RaceConfig,
    hud: &Hud,
) {
    let accent = to_color(snap.accent);
    let layout = create_game_layout(frame, area, " Car Race ", accent, 12, 26);

    render_track(frame, layout.content, snap, config);

    match snap.run_state {
        RunState::NotStarted => render_center_prompt(frame, layout.content, "[ ←/→ to start ]"),
        RunState::Ended => {
            let message = format!(
                "{} dodged, score {}",
                snap.world.obstacles_passed, snap.score
            );
            let detail = if hud.new_best { "New best score!" } else { "" };
            render_game_over_banner(frame, layout.content, "CRASH!", &message, detail);
        }
        RunState::Running if hud.paused => render_center_prompt(frame, layout.content, "[ Paused ]"),
        RunState::Running => {}
    }

    render_status_bar_content(frame, layout.status_bar, snap, hud);
    render_info_panel(frame, layout.info_panel, snap, hud);
}

/// Terminal row for a track position.
fn row_for(y: f64, track_length: f64, rows: u16) -> Option<u16> {
    if !(0.0..=track_length).contains(&y) || rows == 0 {
        return None;
    }
    let row = (y / track_length * (rows - 1) as f64).round() as u16;
    Some(row.min(rows - 1))
}

fn render_track(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, RaceWorld>, config: &RaceConfig) {
    let world = snap.world;
    let lanes = world.lanes as u16;
    // lanes, dividers between them, plus the two edges
    let track_w = lanes * LANE_WIDTH + lanes.saturating_sub(1) + 2;
    if area.height < 3 || area.width < track_w {
        return;
    }

    let x_off = area.x + (area.width - track_w) / 2;
    let rows = area.height;

    // Per row, per lane: what to draw there.
    let mut cells: Vec<Vec<Option<(&'static str, Color)>>> = vec![vec![None; lanes as usize]; rows as usize];

    for obstacle in world.obstacles.values() {
        if let Some(row) = row_for(obstacle.y, config.track_length, rows) {
            if let Some(slot) = cells[row as usize].get_mut(obstacle.lane as usize) {
                *slot = Some((obstacle_glyph(obstacle.kind), to_color(obstacle.color)));
            }
        }
    }

    if let Some(row) = row_for(config.agent_row, config.track_length, rows) {
        let car_color = if snap.run_state == RunState::Ended {
            Color::Red
        } else {
            to_color(snap.accent)
        };
        if let Some(slot) = cells[row as usize].get_mut(world.lane as usize) {
            *slot = Some((CAR_GLYPH, car_color));
        }
    }

    // Dashes scroll with the tick so the road looks like it moves.
    let dash_phase = (snap.tick % 2) as u16;
    for row in 0..rows {
        let mut spans: Vec<Span> = vec![Span::styled(
            TRACK_EDGE.to_string(),
            Style::default().fg(EDGE_COLOR).bg(TRACK_BG),
        )];
        for lane in 0..lanes as usize {
            let text = match cells[row as usize][lane] {
                Some((glyph, color)) => Span::styled(
                    format!("{:^width$}", glyph, width = LANE_WIDTH as usize),
                    Style::default().fg(color).bg(TRACK_BG).add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(
                    " ".repeat(LANE_WIDTH as usize),
                    Style::default().bg(TRACK_BG),
                ),
            };
            spans.push(text);
            if lane + 1 < lanes as usize {
                let divider = if (row + dash_phase) % 2 == 0 { LANE_DIVIDER } else { ' ' };
                spans.push(Span::styled(
                    divider.to_string(),
                    Style::default().fg(Color::Yellow).bg(TRACK_BG),
                ));
            }
        }
        spans.push(Span::styled(
            TRACK_EDGE.to_string(),
            Style::default().fg(EDGE_COLOR).bg(TRACK_BG),
        ));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, area.y + row, track_w, 1),
        );
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, RaceWorld>, hud: &Hud) {
    let (text, color) = match snap.run_state {
        RunState::NotStarted => ("Ready", Color::LightGreen),
        RunState::Ended => ("Crashed", Color::Red),
        RunState::Running if hud.paused => ("Paused", Color::Yellow),
        RunState::Running => ("Drive!", Color::Green),
    };
    render_status_bar(
        frame,
        area,
        text,
        color,
        &[("[←/→]", "Steer"), ("[1-5]", "Lane"), ("[P]", "Pause"), ("[Esc]", "Menu")],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, RaceWorld>, hud: &Hud) {
    let inner = render_info_panel_frame(frame, area);
    let world = snap.world;

    let mut lines: Vec<Line> = vec![
        info_line("Difficulty", hud.difficulty.to_string(), Color::Cyan),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                snap.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        info_line(
            "Best",
            hud.best.map_or_else(|| "-".to_string(), |b| b.to_string()),
            Color::White,
        ),
        Line::from(""),
        info_line("Dodged", world.obstacles_passed.to_string(), Color::White),
        info_line("Level", snap.pace.level.to_string(), Color::White),
        info_line("Speed", format!("{:.2}x", snap.pace.speed), Color::White),
        info_line("Lane", format!("{}/{}", world.lane + 1, world.lanes), Color::White),
        Line::from(""),
    ];
    for kind in ObstacleKind::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", obstacle_glyph(kind)),
                Style::default().fg(to_color(kind.color())),
            ),
            Span::styled(kind.name(), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(""));

    let log_rows = (inner.height as usize).saturating_sub(lines.len());
    lines.extend(event_log_lines(hud.log, to_color(snap.accent), log_rows));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mapping_covers_track() {
        assert_eq!(row_for(0.0, 100.0, 21), Some(0));
        assert_eq!(row_for(100.0, 100.0, 21), Some(20));
        assert_eq!(row_for(50.0, 100.0, 21), Some(10));
        assert_eq!(row_for(100.5, 100.0, 21), None);
        assert_eq!(row_for(-1.0, 100.0, 21), None);
    }
}
