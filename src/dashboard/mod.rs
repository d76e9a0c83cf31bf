//! ==============================================================================
//! dashboard/mod.rs - the controller that owns every widget
//! ==============================================================================
//!
//! purpose:
//!     single owner of the table, the chart, both gauges, both gauge labels,
//!     and the status indicator. poll outcomes are applied here; the ui layer
//!     only reads.
//!
//! per outcome:
//!     - stale (seq not newer than the last applied) -> ignored
//!     - paused                                      -> ignored
//!     - error  -> status goes FAILED, every widget keeps its state
//!     - batch  -> table rebuilt, chart replaced, and if the batch is
//!                 non-empty its last reading drives gauges and labels
//!
//! relationships:
//!     - fed by: main.rs (drains poller outcomes each frame)
//!     - read by: ui.rs
//!
//! ==============================================================================

pub mod chart;
pub mod easing;
pub mod gauge;
pub mod status;
pub mod table;

use chrono::Local;
use std::time::Instant;

use crate::domain::{latest, Reading};
use crate::poller::PollOutcome;

use chart::TrendChart;
use gauge::{stress_label, temperature_label, RingGauge, TEMPERATURE_FALLBACK};
use status::Status;
use table::ReadingTable;

/// what `apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Rendered,
    Failed,
    Stale,
    Paused,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub table: ReadingTable,
    pub chart: TrendChart,
    pub stress: RingGauge,
    pub temperature: RingGauge,
    pub stress_label: String,
    pub temperature_label: String,
    pub status: Status,
    pub paused: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// where readings come from, for the title bar
    pub source: String,
    last_seq: Option<u64>,
}

impl Dashboard {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            table: ReadingTable::new(),
            chart: TrendChart::new(),
            stress: RingGauge::stress(),
            temperature: RingGauge::temperature(),
            stress_label: "--%".to_string(),
            temperature_label: "-- °C".to_string(),
            status: Status::Waiting,
            paused: false,
            show_help: false,
            should_quit: false,
            source: source.into(),
            last_seq: None,
        }
    }

    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    pub fn apply(&mut self, outcome: PollOutcome, now: Instant) -> Applied {
        if self.last_seq.is_some_and(|last| outcome.seq <= last) {
            tracing::debug!(seq = outcome.seq, "dropping stale outcome");
            return Applied::Stale;
        }
        if self.paused {
            return Applied::Paused;
        }
        self.last_seq = Some(outcome.seq);

        match outcome.result {
            Ok(batch) => {
                self.render_batch(&batch, now);
                self.status = Status::Live {
                    seq: outcome.seq,
                    records: batch.len(),
                    at: Local::now(),
                };
                Applied::Rendered
            }
            Err(e) => {
                self.status = Status::Failed {
                    seq: outcome.seq,
                    kind: e.kind(),
                    message: e.to_string(),
                    streak: self.status.failure_streak() + 1,
                    at: Local::now(),
                };
                Applied::Failed
            }
        }
    }

    /// table, then chart, then gauges from the latest reading
    pub fn render_batch(&mut self, batch: &[Reading], now: Instant) {
        self.table.rebuild(batch);
        self.chart.replace(batch, now);

        if let Some(last) = latest(batch) {
            let stress = last.stress_score.unwrap_or(0.0);
            self.stress.set_value(stress, now);
            self.stress_label = stress_label(last.stress_score);

            let temperature = last.temperature.unwrap_or(TEMPERATURE_FALLBACK);
            self.temperature.set_value(temperature, now);
            self.temperature_label = temperature_label(last.temperature);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "display pause toggled");
    }
}
