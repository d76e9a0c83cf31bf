//! ==============================================================================
//! dashboard/gauge.rs - radial two-segment gauges (stress, temperature)
//! ==============================================================================
//!
//! a gauge is a ring split into a filled segment of min(value/max, 1) * 100
//! percent and a remainder segment. the ring starts at twelve o'clock and
//! fills clockwise, drawn with braille points on a ratatui canvas.
//!
//! the fill is also clamped at 0: a negative reading shows an empty ring.
//!
//! ==============================================================================

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::easing::{lerp, Transition, GAUGE_REDRAW};

pub const STRESS_MAX: f64 = 50.0;
pub const TEMPERATURE_MAX: f64 = 40.0;
/// gauge fill used when the latest reading has no temperature
pub const TEMPERATURE_FALLBACK: f64 = 36.0;

/// inner radius as a fraction of the outer one (an 80% cutout)
const RING_CUTOUT: f64 = 0.8;
const RING_LAYERS: usize = 4;
const RING_SAMPLES: usize = 160;

/// filled share of the ring in percent, clamped to [0, 100]
pub fn fill_percent(value: f64, max: f64) -> f64 {
    if !value.is_finite() || max <= 0.0 {
        return 0.0;
    }
    ((value / max) * 100.0).clamp(0.0, 100.0)
}

/// "50%": stress as a share of its range, no decimals. halves round up.
pub fn stress_label(stress_score: Option<f64>) -> String {
    let pct = fill_percent(stress_score.unwrap_or(0.0), STRESS_MAX);
    format!("{:.0}%", pct.round())
}

/// "37.2 °C", or "-- °C" when the reading carries no temperature
pub fn temperature_label(temperature: Option<f64>) -> String {
    match temperature {
        Some(t) => format!("{:.1} °C", (t * 10.0).round() / 10.0),
        None => "-- °C".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct RingGauge {
    title: &'static str,
    max: f64,
    color: Color,
    from: f64,
    target: f64,
    transition: Option<Transition>,
}

impl RingGauge {
    pub fn new(title: &'static str, max: f64, color: Color) -> Self {
        Self {
            title,
            max,
            color,
            from: 0.0,
            target: 0.0,
            transition: None,
        }
    }

    pub fn stress() -> Self {
        Self::new("STRESS", STRESS_MAX, Color::Red)
    }

    pub fn temperature() -> Self {
        Self::new("TEMPERATURE", TEMPERATURE_MAX, Color::Yellow)
    }

    /// point the gauge at a new value; the ring eases there from wherever
    /// it is currently drawn
    pub fn set_value(&mut self, value: f64, now: Instant) {
        self.from = self.displayed(now);
        self.target = fill_percent(value, self.max);
        self.transition = Some(Transition::new(now, GAUGE_REDRAW));
    }

    /// (filled, remainder) in percent, as of the last update
    pub fn segments(&self) -> (f64, f64) {
        (self.target, 100.0 - self.target)
    }

    pub fn filled(&self) -> f64 {
        self.target
    }

    /// filled percent as drawn at `now`, mid-transition
    pub fn displayed(&self, now: Instant) -> f64 {
        match self.transition {
            Some(t) if !t.is_done(now) => lerp(self.from, self.target, t.progress(now)),
            _ => self.target,
        }
    }
}

/// braille coordinates for the two ring segments
#[derive(Debug, Default)]
pub struct RingPoints {
    pub filled: Vec<(f64, f64)>,
    pub remainder: Vec<(f64, f64)>,
}

pub fn ring_points(fill: f64, samples: usize) -> RingPoints {
    let mut points = RingPoints::default();
    let fill = fill.clamp(0.0, 100.0) / 100.0;

    for i in 0..samples {
        let fraction = (i as f64 + 0.5) / samples as f64;
        // twelve o'clock, clockwise
        let theta = FRAC_PI_2 - fraction * TAU;
        let bucket = if fraction < fill {
            &mut points.filled
        } else {
            &mut points.remainder
        };
        for layer in 0..RING_LAYERS {
            let r = RING_CUTOUT + (1.0 - RING_CUTOUT) * layer as f64 / (RING_LAYERS - 1) as f64;
            bucket.push((r * theta.cos(), r * theta.sin()));
        }
    }
    points
}

pub fn render(f: &mut Frame, area: Rect, gauge: &RingGauge, label: &str, now: Instant) {
    let block = Block::default()
        .title(format!(" {} ", gauge.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let ring = ring_points(gauge.displayed(now), RING_SAMPLES);
    let color = gauge.color;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &ring.remainder,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &ring.filled,
                color,
            });
        });
    f.render_widget(canvas, chunks[0]);

    let text = Paragraph::new(Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(text, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stress_half_range() {
        assert_eq!(fill_percent(25.0, STRESS_MAX), 50.0);
        assert_eq!(stress_label(Some(25.0)), "50%");
    }

    #[test]
    fn missing_stress_is_zero() {
        assert_eq!(stress_label(None), "0%");
        let mut gauge = RingGauge::stress();
        gauge.set_value(0.0, Instant::now());
        assert_eq!(gauge.segments(), (0.0, 100.0));
    }

    #[test]
    fn temperature_fill_and_label() {
        let fill = fill_percent(37.2, TEMPERATURE_MAX);
        assert!((fill - 93.0).abs() < 1e-9, "fill {}", fill);
        assert_eq!(temperature_label(Some(37.2)), "37.2 °C");
        assert_eq!(temperature_label(None), "-- °C");
    }

    #[test]
    fn labels_round_halves_up() {
        assert_eq!(temperature_label(Some(37.25)), "37.3 °C");
        assert_eq!(temperature_label(Some(36.25)), "36.3 °C");
        assert_eq!(temperature_label(Some(36.24)), "36.2 °C");
        // 6.25 of 50 is 12.5%
        assert_eq!(stress_label(Some(6.25)), "13%");
        assert_eq!(stress_label(Some(0.2)), "0%");
    }

    #[test]
    fn settled_gauge_shows_target() {
        let start = Instant::now();
        let mut gauge = RingGauge::temperature();
        gauge.set_value(20.0, start);
        assert_eq!(gauge.displayed(start + Duration::from_secs(3)), 50.0);
    }

    #[test]
    fn fill_clamps_both_ends() {
        assert_eq!(fill_percent(80.0, STRESS_MAX), 100.0);
        assert_eq!(fill_percent(-5.0, STRESS_MAX), 0.0);
        assert_eq!(fill_percent(f64::NAN, STRESS_MAX), 0.0);
        assert_eq!(stress_label(Some(120.0)), "100%");
    }

    #[test]
    fn gauge_eases_from_current_to_target() {
        let start = Instant::now();
        let mut gauge = RingGauge::stress();
        gauge.set_value(50.0, start);
        assert_eq!(gauge.displayed(start), 0.0);
        let mid = gauge.displayed(start + Duration::from_millis(400));
        assert!(mid > 50.0 && mid < 100.0, "mid {}", mid);
        assert_eq!(gauge.displayed(start + GAUGE_REDRAW), 100.0);

        // retarget halfway through: starts from what is on screen
        let later = start + Duration::from_millis(400);
        gauge.set_value(0.0, later);
        assert!((gauge.displayed(later) - mid).abs() < 1e-9);
        assert_eq!(gauge.displayed(later + GAUGE_REDRAW), 0.0);
    }

    #[test]
    fn ring_splits_points_by_fill() {
        let half = ring_points(50.0, 100);
        assert_eq!(half.filled.len(), half.remainder.len());

        let empty = ring_points(0.0, 100);
        assert!(empty.filled.is_empty());
        assert_eq!(empty.remainder.len(), 100 * RING_LAYERS);

        let full = ring_points(100.0, 100);
        assert!(full.remainder.is_empty());
    }

    #[test]
    fn ring_starts_at_twelve_oclock_clockwise() {
        let ring = ring_points(10.0, 100);
        // first filled sample sits near the top, slightly right of centre
        let (x, y) = ring.filled[0];
        assert!(y > 0.7 && x > 0.0, "({}, {})", x, y);
    }
}
