//! ==============================================================================
//! dashboard/chart.rs - heart rate and hrv over time
//! ==============================================================================
//!
//! one persistent line chart with two series. every tick replaces the labels
//! and both series wholesale with the batch reversed, then eases from the
//! previously drawn values to the new ones.
//!
//! ==============================================================================

use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

use super::easing::{lerp, Transition, CHART_REDRAW};
use crate::domain::{time_of_day, Reading};

const Y_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Default)]
pub struct TrendChart {
    labels: Vec<String>,
    heart_rate: Vec<f64>,
    hrv: Vec<f64>,
    prev_heart_rate: Vec<f64>,
    prev_hrv: Vec<f64>,
    transition: Option<Transition>,
}

impl TrendChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// swap in a new batch and request an eased redraw
    pub fn replace(&mut self, batch: &[Reading], now: Instant) {
        self.prev_heart_rate = self.displayed_heart_rate(now);
        self.prev_hrv = self.displayed_hrv(now);

        self.labels = batch.iter().rev().map(|r| r.timestamp.clone()).collect();
        self.heart_rate = batch.iter().rev().map(|r| r.heart_rate).collect();
        self.hrv = batch.iter().rev().map(|r| r.hrv).collect();
        self.transition = Some(Transition::new(now, CHART_REDRAW));
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn heart_rate(&self) -> &[f64] {
        &self.heart_rate
    }

    pub fn hrv(&self) -> &[f64] {
        &self.hrv
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn displayed_heart_rate(&self, now: Instant) -> Vec<f64> {
        self.eased(&self.prev_heart_rate, &self.heart_rate, now)
    }

    pub fn displayed_hrv(&self, now: Instant) -> Vec<f64> {
        self.eased(&self.prev_hrv, &self.hrv, now)
    }

    /// points without a previous counterpart appear at their target
    fn eased(&self, from: &[f64], to: &[f64], now: Instant) -> Vec<f64> {
        let progress = match self.transition {
            Some(t) if !t.is_done(now) => t.progress(now),
            _ => return to.to_vec(),
        };
        to.iter()
            .enumerate()
            .map(|(i, &target)| match from.get(i) {
                Some(&start) => lerp(start, target, progress),
                None => target,
            })
            .collect()
    }

    /// y range over both series, padded, not anchored at zero
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self.heart_rate.iter().chain(self.hrv.iter());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
        if lo > hi {
            return [0.0, 1.0];
        }
        [lo - Y_PADDING, hi + Y_PADDING]
    }

    /// first, middle, and last time-of-day labels for the x axis
    pub fn axis_labels(&self) -> Vec<String> {
        match self.labels.len() {
            0 => Vec::new(),
            1 => vec![time_of_day(&self.labels[0]).to_string()],
            n => {
                let mut picks = vec![0, n / 2, n - 1];
                picks.dedup();
                picks
                    .into_iter()
                    .map(|i| time_of_day(&self.labels[i]).to_string())
                    .collect()
            }
        }
    }
}

fn as_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, chart: &TrendChart, now: Instant) {
    let block = Block::default()
        .title(Span::styled(
            " HEART RATE & HRV ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hr_points = as_points(&chart.displayed_heart_rate(now));
    let hrv_points = as_points(&chart.displayed_hrv(now));

    let datasets = vec![
        Dataset::default()
            .name("Heart Rate (BPM)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&hr_points),
        Dataset::default()
            .name("HRV")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&hrv_points),
    ];

    let x_max = chart.labels().len().saturating_sub(1).max(1) as f64;
    let [y_lo, y_hi] = chart.y_bounds();

    let x_labels: Vec<Span> = chart.axis_labels().into_iter().map(Span::raw).collect();
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_lo)),
        Span::raw(format!("{:.0}", (y_lo + y_hi) / 2.0)),
        Span::raw(format!("{:.0}", y_hi)),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::Top))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reading(ts: &str, hr: f64, hrv: f64) -> Reading {
        Reading {
            timestamp: ts.to_string(),
            heart_rate: hr,
            temperature: Some(36.8),
            hrv,
            stress_score: None,
            alert: None,
        }
    }

    fn batch() -> Vec<Reading> {
        vec![
            reading("2025-03-01 10:00:00", 70.0, 60.0),
            reading("2025-03-01 10:00:02", 75.0, 55.0),
            reading("2025-03-01 10:00:04", 90.0, 40.0),
        ]
    }

    #[test]
    fn series_are_exact_reverse_of_input() {
        let mut chart = TrendChart::new();
        chart.replace(&batch(), Instant::now());
        assert_eq!(
            chart.labels(),
            &[
                "2025-03-01 10:00:04".to_string(),
                "2025-03-01 10:00:02".to_string(),
                "2025-03-01 10:00:00".to_string(),
            ]
        );
        assert_eq!(chart.heart_rate(), &[90.0, 75.0, 70.0]);
        assert_eq!(chart.hrv(), &[40.0, 55.0, 60.0]);
    }

    #[test]
    fn replace_is_wholesale() {
        let now = Instant::now();
        let mut chart = TrendChart::new();
        chart.replace(&batch(), now);
        chart.replace(&batch()[..1], now);
        assert_eq!(chart.labels().len(), 1);
        assert_eq!(chart.heart_rate(), &[70.0]);

        chart.replace(&[], now);
        assert!(chart.is_empty());
        assert!(chart.hrv().is_empty());
    }

    #[test]
    fn redraw_eases_toward_new_values() {
        let start = Instant::now();
        let mut chart = TrendChart::new();
        chart.replace(&[reading("2025-03-01 10:00:00", 60.0, 50.0)], start);
        let settled = start + CHART_REDRAW;
        assert_eq!(chart.displayed_heart_rate(settled), vec![60.0]);

        chart.replace(&[reading("2025-03-01 10:00:02", 100.0, 50.0)], settled);
        let mid = chart.displayed_heart_rate(settled + Duration::from_millis(250))[0];
        assert!(mid > 60.0 && mid < 100.0);
        assert_eq!(chart.displayed_heart_rate(settled + CHART_REDRAW), vec![100.0]);
    }

    #[test]
    fn y_bounds_padded_and_not_from_zero() {
        let mut chart = TrendChart::new();
        assert_eq!(chart.y_bounds(), [0.0, 1.0]);
        chart.replace(&batch(), Instant::now());
        assert_eq!(chart.y_bounds(), [35.0, 95.0]);
    }

    #[test]
    fn axis_labels_use_time_of_day() {
        let mut chart = TrendChart::new();
        chart.replace(&batch(), Instant::now());
        assert_eq!(chart.axis_labels(), vec!["10:00:04", "10:00:02", "10:00:00"]);
    }
}
