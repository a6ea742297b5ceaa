//! upcheck - HTTP endpoint availability monitor
//!
//! A periodic health checker that probes a fixed set of HTTP endpoints,
//! classifies each probe as UP or DOWN, and reports cumulative availability
//! statistics after every check cycle.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Endpoint descriptors and YAML configuration loading
//! - [`probe`] - HTTP probe execution and UP/DOWN classification
//! - [`ledger`] - Per-endpoint availability statistics, shared across cycles
//! - [`monitor`] - Cycle scheduling, fan-out/fan-in and shutdown handling
//! - [`report`] - Per-cycle availability report rendering
//!
//! # Example
//!
//! ```no_run
//! use upcheck::config::{self, MonitorConfig};
//! use upcheck::monitor::Monitor;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let endpoints = config::load_endpoints("sample.yml".as_ref())?;
//!     let monitor = Monitor::new(endpoints, MonitorConfig::default())?;
//!     monitor.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod monitor;
pub mod probe;
pub mod report;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Endpoint, MonitorConfig};
    pub use crate::error::{Error, Result};
    pub use crate::ledger::{AvailabilityLedger, AvailabilityRecord};
    pub use crate::monitor::Monitor;
    pub use crate::probe::{ProbeOutcome, Prober};
    pub use crate::report::Reporter;
}

pub use ledger::{AvailabilityLedger, AvailabilityRecord};
pub use probe::ProbeOutcome;
