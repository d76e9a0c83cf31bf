//! ==============================================================================
//! source/mod.rs - where reading batches come from
//! ==============================================================================
//!
//! purpose:
//!     one interface for "give me the current batch of readings", so the
//!     poller does not care whether it talks to a real endpoint or to the
//!     built-in simulated wearable.
//!
//! relationships:
//!     - used by: poller.rs (every tick), main.rs (--once snapshot)
//!     - http.rs: GET {base_url}{path} via reqwest
//!     - simulated.rs: deterministic synthetic feed (--demo)
//!
//! ==============================================================================

pub mod http;
pub mod simulated;

use async_trait::async_trait;

use crate::domain::Reading;
use crate::error::FetchError;

pub use http::HttpSource;
pub use simulated::SimulatedSource;

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// fetch and decode one batch, in the order the feed returns it
    async fn fetch(&self) -> Result<Vec<Reading>, FetchError>;

    /// human readable origin, shown in the title bar
    fn describe(&self) -> String;
}
