//! status indicator: what the last applied tick did

use chrono::{DateTime, Local};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// nothing received yet
    Waiting,
    Live {
        seq: u64,
        records: usize,
        at: DateTime<Local>,
    },
    Failed {
        seq: u64,
        kind: &'static str,
        message: String,
        /// failures in a row, including this one
        streak: u32,
        at: DateTime<Local>,
    },
}

impl Status {
    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed { .. })
    }

    pub fn failure_streak(&self) -> u32 {
        match self {
            Status::Failed { streak, .. } => *streak,
            _ => 0,
        }
    }

    pub fn line(&self) -> Line<'static> {
        match self {
            Status::Waiting => Line::from(Span::styled(
                " waiting for first batch… ",
                Style::default().fg(Color::DarkGray),
            )),
            Status::Live { seq, records, at } => Line::from(vec![
                Span::styled(
                    " LIVE ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("#{} · {} records · {} ", seq, records, at.format("%H:%M:%S")),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Status::Failed {
                seq,
                kind,
                message,
                streak,
                at,
            } => Line::from(vec![
                Span::styled(
                    " FAILED ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "#{} {} error ({}x) at {}: {} ",
                        seq,
                        kind,
                        streak,
                        at.format("%H:%M:%S"),
                        message
                    ),
                    Style::default().fg(Color::LightRed),
                ),
            ]),
        }
    }
}
