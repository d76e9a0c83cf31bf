//! ==============================================================================
//! domain.rs - reading records served by the health endpoint
//! ==============================================================================
//!
//! purpose:
//!     the single entity the dashboard consumes. one poll response is a
//!     json array of these, oldest-first as the server returns it.
//!
//! relationships:
//!     - decoded by: source/http.rs
//!     - produced by: source/simulated.rs
//!     - consumed by: dashboard/ (table, chart, gauges), report.rs
//!
//! ==============================================================================

use serde::Deserialize;

/// one timestamped sensor sample
///
/// unknown payload fields (the server also sends accelerometer axes) are
/// ignored on decode.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Reading {
    /// "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    /// beats per minute
    pub heart_rate: f64,
    /// degrees celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    /// heart-rate variability
    pub hrv: f64,
    /// 0-50 scale, null when the server has not scored the sample
    #[serde(default)]
    pub stress_score: Option<f64>,
    /// alert label, empty or null when nothing fired
    #[serde(default)]
    pub alert: Option<String>,
}

impl Reading {
    /// time-of-day part of the timestamp ("HH:MM:SS")
    ///
    /// falls back to the whole timestamp when it has no date part.
    pub fn time_of_day(&self) -> &str {
        time_of_day(&self.timestamp)
    }

    /// alert label, or "" when absent
    pub fn alert_label(&self) -> &str {
        self.alert.as_deref().unwrap_or("")
    }

    pub fn has_alert(&self) -> bool {
        !self.alert_label().is_empty()
    }
}

/// splits "YYYY-MM-DD HH:MM:SS" and keeps the clock part
pub fn time_of_day(timestamp: &str) -> &str {
    match timestamp.split_once(' ') {
        Some((_, time)) => time,
        None => timestamp,
    }
}

/// the most recent reading of a batch (its last element)
pub fn latest(batch: &[Reading]) -> Option<&Reading> {
    batch.last()
}
