//! Snake game UI rendering.
//!
//! Uses half-block pixel rendering. Each grid cell maps to a colored pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colors.

use super::game_common::{
    create_game_layout, event_log_lines, info_line, render_center_prompt,
    render_game_over_banner, render_info_panel_frame, render_status_bar, to_color,
};
use super::Hud;
use arcade::core::{RunState, Snapshot};
use arcade::games::SnakeWorld;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

/// Render the Snake game scene.
pub fn render_snake_scene(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, SnakeWorld>, hud: &Hud) {
    let accent = to_color(snap.accent);
    let layout = create_game_layout(frame, area, " Snake ", accent, 12, 26);

    render_play_field(frame, layout.content, snap);

    match snap.run_state {
        RunState::NotStarted => render_center_prompt(frame, layout.content, "[ Arrow key to start ]"),
        RunState::Ended => {
            let message = format!("Length {}, score {}", snap.world.len(), snap.score);
            let detail = if hud.new_best { "New best score!" } else { "" };
            render_game_over_banner(frame, layout.content, "SNAKE BITES ITSELF", &message, detail);
        }
        RunState::Running if hud.paused => render_center_prompt(frame, layout.content, "[ Paused ]"),
        RunState::Running => {}
    }

    render_status_bar_content(frame, layout.status_bar, snap, hud);
    render_info_panel(frame, layout.info_panel, snap, hud);
}

/// Head in the accent colour, body fading from it toward dark green.
fn segment_color(index: usize, snake_len: usize, accent: (f64, f64, f64)) -> Color {
    if index == 0 {
        return Color::Rgb(accent.0 as u8, accent.1 as u8, accent.2 as u8);
    }
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (accent.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (accent.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (accent.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

fn render_play_field(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, SnakeWorld>) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let world = snap.world;
    let grid_w = world.grid_width as usize;
    let grid_h = world.grid_height as usize;

    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid_w]; grid_h];

    if let Some(item) = world.item {
        let (ix, iy) = (item.cell.x as usize, item.cell.y as usize);
        if ix < grid_w && iy < grid_h {
            pixels[iy][ix] = Some(to_color(item.color));
        }
    }

    let accent = (snap.accent.r as f64, snap.accent.g as f64, snap.accent.b as f64);
    let snake_len = world.len();
    for (i, seg) in world.body.iter().enumerate() {
        let (sx, sy) = (seg.x as usize, seg.y as usize);
        if sx < grid_w && sy < grid_h {
            pixels[sy][sx] = Some(segment_color(i, snake_len, accent));
        }
    }

    let content_rows = grid_h.div_ceil(2);
    let render_w = ((grid_w + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(BORDER_COLOR);

    // Top border
    {
        let mut s = String::new();
        s.push(BORDER_TL);
        s.extend(std::iter::repeat(BORDER_H).take(inner_w));
        s.push(BORDER_TR);
        let line = Paragraph::new(Line::from(Span::styled(s, border)));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    let empty_row: Vec<Option<Color>> = vec![None; grid_w];
    for term_row in 0..content_rows {
        let top_gy = term_row * 2;
        let bot_gy = term_row * 2 + 1;
        let top_row = if top_gy < grid_h { &pixels[top_gy] } else { &empty_row };
        let bot_row = if bot_gy < grid_h { &pixels[bot_gy] } else { &empty_row };

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(BORDER_V.to_string(), border));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
        }
    }

    // Bottom border
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat(BORDER_H).take(inner_w));
        s.push(BORDER_BR);
        let line = Paragraph::new(Line::from(Span::styled(s, border)));
        frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, SnakeWorld>, hud: &Hud) {
    let (text, color) = match snap.run_state {
        RunState::NotStarted => ("Ready", Color::LightGreen),
        RunState::Ended => ("Game Over", Color::Red),
        RunState::Running if hud.paused => ("Paused", Color::Yellow),
        RunState::Running => ("Slither!", Color::Green),
    };
    render_status_bar(
        frame,
        area,
        text,
        color,
        &[("[Arrows]", "Move"), ("[P]", "Pause"), ("[Esc]", "Menu")],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot<'_, SnakeWorld>, hud: &Hud) {
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
        info_line("Length", world.len().to_string(), Color::White),
        info_line("Level", snap.pace.level.to_string(), Color::White),
        info_line(
            "Speed",
            format!("{}ms", snap.pace.tick_interval_ms),
            Color::White,
        ),
        info_line(
            "Grid",
            format!("{}x{}", world.grid_width, world.grid_height),
            Color::White,
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(to_color(snap.accent))),
            Span::styled("Snake", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    if let Some(item) = world.item {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(to_color(item.color))),
            Span::styled("Fruit", Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(""));

    let log_rows = (inner.height as usize).saturating_sub(lines.len());
    lines.extend(event_log_lines(hud.log, to_color(snap.accent), log_rows));

    frame.render_widget(Paragraph::new(lines), inner);
}
