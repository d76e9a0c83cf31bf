//! vitals-dash: a terminal dashboard for a wearable health endpoint.
//!
//! the binary lives in main.rs; everything it wires together is exposed here
//! so the integration tests can drive it.

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod events;
pub mod poller;
pub mod report;
pub mod source;
pub mod telemetry;
pub mod ui;

pub use dashboard::{Applied, Dashboard};
pub use domain::Reading;
pub use error::FetchError;
pub use poller::{PollCommand, PollOutcome, Poller, POLL_INTERVAL};
pub use source::{HttpSource, ReadingSource, SimulatedSource};
