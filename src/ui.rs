//! ==============================================================================
//! ui.rs - frame layout
//! ==============================================================================
//!
//! purpose:
//!     splits the terminal into chart, gauges, and table, and hands each
//!     region to its widget renderer. draws the status indicator and key
//!     hints along the bottom border.
//!
//! layout:
//!
//! ```text
//!     ┌ vitals-dash · source ─────────────────────────── 10:15:30 ┐
//!     │ ┌ HEART RATE & HRV ───────────────┐ ┌ STRESS ─────────┐   │
//!     │ │                                 │ │   ring + label  │   │
//!     │ │                                 │ ├ TEMPERATURE ────┤   │
//!     │ │                                 │ │   ring + label  │   │
//!     │ └─────────────────────────────────┘ └─────────────────┘   │
//!     │ ┌ READINGS ─────────────────────────────────────────────┐ │
//!     │ └───────────────────────────────────────────────────────┘ │
//!     └ LIVE #12 · 20 records ─────────── [q]uit [r]efresh ... ───┘
//! ```
//!
//! ==============================================================================

use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::dashboard::{chart, gauge, table, Dashboard};

pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 24;

pub fn draw(f: &mut Frame, dash: &Dashboard, now: Instant) {
    let size = f.area();

    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(f, size);
        return;
    }

    let title = Line::from(vec![
        Span::styled(
            " vitals-dash ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("· {} ", dash.source), Style::default().fg(Color::Gray)),
    ]);
    let clock = Line::from(Span::styled(
        format!(" {} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        Style::default().fg(Color::Cyan),
    ))
    .alignment(Alignment::Right);

    let mut hints = vec![Span::styled(
        " [q]uit [r]efresh [p]ause [h]elp ",
        Style::default().fg(Color::DarkGray),
    )];
    if dash.paused {
        hints.push(Span::styled(
            " PAUSED ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let outer = Block::default()
        .title(title)
        .title(clock)
        .title_bottom(dash.status.line())
        .title_bottom(Line::from(hints).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(size);
    f.render_widget(outer, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[0]);

    let gauges = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top[1]);

    chart::render(f, top[0], &dash.chart, now);
    gauge::render(f, gauges[0], &dash.stress, &dash.stress_label, now);
    gauge::render(f, gauges[1], &dash.temperature, &dash.temperature_label, now);
    table::render(f, rows[1], &dash.table);

    if dash.show_help {
        draw_help(f, size);
    }
}

fn draw_too_small(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(Span::styled(
            "terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "need {}x{}, have {}x{}",
            MIN_COLS, MIN_ROWS, area.width, area.height
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(msg, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 46, 11);
    let lines = vec![
        Line::from(""),
        Line::from("  q / Esc / Ctrl+C   quit"),
        Line::from("  r                  fetch now"),
        Line::from("  p                  pause / resume updates"),
        Line::from("  h / ?              toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "  readings refresh every 2 seconds",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" HELP ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Reading;
    use crate::poller::PollOutcome;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(dash: &Dashboard, cols: u16, rows: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        terminal.draw(|f| draw(f, dash, Instant::now())).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sample() -> Vec<Reading> {
        vec![
            Reading {
                timestamp: "2025-03-01 10:15:28".into(),
                heart_rate: 72.0,
                temperature: Some(36.9),
                hrv: 55.0,
                stress_score: Some(10.0),
                alert: None,
            },
            Reading {
                timestamp: "2025-03-01 10:15:30".into(),
                heart_rate: 115.0,
                temperature: Some(37.2),
                hrv: 30.0,
                stress_score: Some(25.0),
                alert: Some("High Heart Rate".into()),
            },
        ]
    }

    #[test]
    fn full_dashboard_renders_every_region() {
        let mut dash = Dashboard::new("http://127.0.0.1:5000/api/data");
        dash.apply(
            PollOutcome {
                seq: 1,
                result: Ok(sample()),
            },
            Instant::now(),
        );
        let text = screen(&dash, 120, 40);
        for needle in [
            "HEART RATE & HRV",
            "STRESS",
            "TEMPERATURE",
            "READINGS (2)",
            "Heart Rate",
            "10:15:30",
            "High Heart Rate",
            "50%",
            "37.2 °C",
            "LIVE",
        ] {
            assert!(text.contains(needle), "missing {:?}", needle);
        }
    }

    #[test]
    fn small_terminal_shows_guard() {
        let dash = Dashboard::new("test");
        let text = screen(&dash, 40, 10);
        assert!(text.contains("terminal too small"));
    }

    #[test]
    fn help_overlay_and_pause_marker() {
        let mut dash = Dashboard::new("test");
        dash.show_help = true;
        dash.paused = true;
        let text = screen(&dash, 100, 30);
        assert!(text.contains("HELP"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("waiting for first batch"));
    }
}
