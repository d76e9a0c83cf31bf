//! ==============================================================================
//! dashboard/table.rs - recent readings as rows
//! ==============================================================================
//!
//! rebuilt from scratch every tick: header first, then one row per reading
//! in the order received. no sorting, filtering, or paging.
//!
//! ==============================================================================

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};
use ratatui::Frame;

use crate::domain::Reading;

pub const HEADER: [&str; 5] = ["Time", "Heart Rate", "Temperature", "HRV", "Alert"];

const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: [String; 5],
    pub alert: bool,
}

impl TableRow {
    fn header() -> Self {
        Self {
            cells: HEADER.map(String::from),
            alert: false,
        }
    }

    fn from_reading(reading: &Reading) -> Self {
        Self {
            cells: [
                reading.time_of_day().to_string(),
                reading.heart_rate.to_string(),
                reading
                    .temperature
                    .map_or_else(|| MISSING.to_string(), |t| t.to_string()),
                reading.hrv.to_string(),
                reading.alert_label().to_string(),
            ],
            alert: reading.has_alert(),
        }
    }
}

/// header row plus one row per reading
#[derive(Debug, Clone)]
pub struct ReadingTable {
    rows: Vec<TableRow>,
}

impl Default for ReadingTable {
    fn default() -> Self {
        Self {
            rows: vec![TableRow::header()],
        }
    }
}

impl ReadingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, batch: &[Reading]) {
        self.rows.clear();
        self.rows.push(TableRow::header());
        self.rows.extend(batch.iter().map(TableRow::from_reading));
    }

    /// every row, header included
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn data_rows(&self) -> &[TableRow] {
        &self.rows[1..]
    }
}

pub fn render(f: &mut Frame, area: Rect, table: &ReadingTable) {
    let header = Row::new(table.rows()[0].cells.clone()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = table
        .data_rows()
        .iter()
        .map(|row| {
            let style = if row.alert {
                Style::default().fg(Color::LightRed)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(row.cells.clone()).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Min(12),
    ];

    let widget = Table::new(body, widths).header(header).block(
        Block::default()
            .title(format!(" READINGS ({}) ", table.data_rows().len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ts: &str, alert: Option<&str>) -> Reading {
        Reading {
            timestamp: ts.to_string(),
            heart_rate: 98.0,
            temperature: Some(37.2),
            hrv: 41.5,
            stress_score: Some(20.0),
            alert: alert.map(String::from),
        }
    }

    #[test]
    fn n_readings_make_n_plus_one_rows_in_order() {
        let batch: Vec<Reading> = (0..7)
            .map(|i| reading(&format!("2025-03-01 10:00:{:02}", i), None))
            .collect();
        let mut table = ReadingTable::new();
        table.rebuild(&batch);

        assert_eq!(table.row_count(), 8);
        assert_eq!(table.rows()[0].cells, HEADER.map(String::from));
        let times: Vec<&str> = table.data_rows().iter().map(|r| r.cells[0].as_str()).collect();
        assert_eq!(
            times,
            vec!["10:00:00", "10:00:01", "10:00:02", "10:00:03", "10:00:04", "10:00:05", "10:00:06"]
        );
    }

    #[test]
    fn rebuild_replaces_previous_rows() {
        let mut table = ReadingTable::new();
        table.rebuild(&[reading("2025-03-01 10:00:00", None), reading("2025-03-01 10:00:02", None)]);
        table.rebuild(&[reading("2025-03-01 10:00:04", None)]);
        assert_eq!(table.row_count(), 2);
        table.rebuild(&[]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn cells_project_fields_verbatim() {
        let mut table = ReadingTable::new();
        table.rebuild(&[reading("2025-03-01 10:15:30", Some("Fever"))]);
        let row = &table.data_rows()[0];
        assert_eq!(row.cells, ["10:15:30", "98", "37.2", "41.5", "Fever"].map(String::from));
        assert!(row.alert);
    }

    #[test]
    fn missing_temperature_renders_placeholder() {
        let mut r = reading("2025-03-01 10:15:30", None);
        r.temperature = None;
        let mut table = ReadingTable::new();
        table.rebuild(&[r]);
        assert_eq!(table.data_rows()[0].cells[2], "--");
        assert!(!table.data_rows()[0].alert);
    }
}
