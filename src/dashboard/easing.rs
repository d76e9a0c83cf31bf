//! redraw transitions: a start instant, a duration, and ease-out cubic

use std::time::{Duration, Instant};

/// line chart redraw
pub const CHART_REDRAW: Duration = Duration::from_millis(500);
/// ring gauge redraw
pub const GAUGE_REDRAW: Duration = Duration::from_millis(800);

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    started: Instant,
    duration: Duration,
}

impl Transition {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    /// eased progress in [0, 1] at `now`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        ease_out_cubic(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}
