//! ==============================================================================
//! poller.rs - timer-driven fetch loop
//! ==============================================================================
//!
//! purpose:
//!     fetches a batch immediately, then every POLL_INTERVAL, and hands each
//!     result to the frame loop as a PollOutcome.
//!
//! ordering:
//!     one task awaits each fetch before waiting for the next tick, so two
//!     fetches are never in flight at once. every outcome still carries a
//!     strictly increasing seq; the dashboard drops anything not newer than
//!     what it already shows.
//!
//! relationships:
//!     - uses: source/ (ReadingSource)
//!     - feeds: dashboard/mod.rs via an mpsc channel (drained by main.rs)
//!     - listens: PollCommand from main.rs (refresh, shutdown)
//!
//! ==============================================================================

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::Reading;
use crate::error::FetchError;
use crate::source::ReadingSource;

/// fixed refresh period
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// result of one tick
#[derive(Debug)]
pub struct PollOutcome {
    pub seq: u64,
    pub result: Result<Vec<Reading>, FetchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    /// fetch now and restart the interval
    Refresh,
    /// stop polling
    Shutdown,
}

pub struct Poller {
    source: Box<dyn ReadingSource>,
    interval: Duration,
    outcomes: mpsc::Sender<PollOutcome>,
    commands: mpsc::Receiver<PollCommand>,
    seq: u64,
}

impl Poller {
    pub fn new(
        source: Box<dyn ReadingSource>,
        outcomes: mpsc::Sender<PollOutcome>,
        commands: mpsc::Receiver<PollCommand>,
    ) -> Self {
        Self::with_interval(source, POLL_INTERVAL, outcomes, commands)
    }

    /// same as `new` with a custom period (tests run faster than 2s)
    pub fn with_interval(
        source: Box<dyn ReadingSource>,
        interval: Duration,
        outcomes: mpsc::Sender<PollOutcome>,
        commands: mpsc::Receiver<PollCommand>,
    ) -> Self {
        Self {
            source,
            interval,
            outcomes,
            commands,
            seq: 0,
        }
    }

    /// run until shutdown, until the command sender is dropped, or until
    /// nobody listens for outcomes anymore
    pub async fn run(mut self) {
        tracing::info!(
            source = %self.source.describe(),
            interval_ms = self.interval.as_millis() as u64,
            "poller started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                command = self.commands.recv() => match command {
                    Some(PollCommand::Refresh) => {
                        tracing::debug!("manual refresh");
                        ticker.reset();
                    }
                    Some(PollCommand::Shutdown) | None => break,
                },
            }

            if !self.tick().await {
                break;
            }
        }

        tracing::info!(ticks = self.seq, "poller stopped");
    }

    /// one fetch, one outcome. returns false once the receiver is gone.
    pub async fn tick(&mut self) -> bool {
        self.seq += 1;
        let seq = self.seq;
        let result = self.source.fetch().await;

        match &result {
            Ok(batch) => tracing::debug!(seq, records = batch.len(), "tick ok"),
            Err(e) => tracing::warn!(seq, kind = e.kind(), error = %e, "tick failed"),
        }

        self.outcomes.send(PollOutcome { seq, result }).await.is_ok()
    }
}
