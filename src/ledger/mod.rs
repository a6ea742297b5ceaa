//! Per-endpoint availability statistics
//!
//! The ledger is shared by every concurrent probe of a cycle. Entries are
//! pre-allocated per distinct URL before the first cycle and never added
//! or removed afterwards, so the map itself is read-only at run time and
//! each record carries its own lock. Updating one record never contends
//! with updates to another.

use crate::config::Endpoint;
use crate::probe::ProbeOutcome;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Cumulative statistics for one distinct URL
#[derive(Debug, Clone, Default)]
pub struct AvailabilityRecord {
    /// Number of probes classified UP
    pub success_count: u64,

    /// Number of probes classified DOWN
    pub failure_count: u64,

    /// Sum of latencies over successful probes only
    pub total_latency: Duration,

    /// Fastest successful probe, unset until the first success
    pub min_latency: Option<Duration>,

    /// Slowest successful probe, unset until the first success
    pub max_latency: Option<Duration>,
}

impl AvailabilityRecord {
    /// Total probes completed for this URL
    #[must_use]
    pub fn total(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// Mean latency of successful probes, `None` with zero successes
    #[must_use]
    pub fn average_latency(&self) -> Option<Duration> {
        if self.success_count == 0 {
            return None;
        }
        Some(self.total_latency / self.success_count as u32)
    }

    /// Cumulative availability percentage, rounded half up
    ///
    /// Returns `None` before the first probe has completed.
    #[must_use]
    pub fn availability_percent(&self) -> Option<u32> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let percentage = 100.0 * self.success_count as f64 / total as f64;
        Some((percentage + 0.5) as u32)
    }

    fn apply(&mut self, outcome: &ProbeOutcome) {
        if outcome.success {
            self.success_count += 1;
            self.total_latency += outcome.latency;
            self.min_latency = Some(match self.min_latency {
                Some(min) => min.min(outcome.latency),
                None => outcome.latency,
            });
            self.max_latency = Some(match self.max_latency {
                Some(max) => max.max(outcome.latency),
                None => outcome.latency,
            });
        } else {
            self.failure_count += 1;
        }
    }
}

/// Shared map from URL to availability record
pub struct AvailabilityLedger {
    records: HashMap<String, Mutex<AvailabilityRecord>>,
}

impl AvailabilityLedger {
    /// Pre-allocate one record per distinct endpoint URL
    #[must_use]
    pub fn new(endpoints: &[Endpoint]) -> Self {
        let mut records = HashMap::new();
        for endpoint in endpoints {
            records
                .entry(endpoint.url.clone())
                .or_insert_with(|| Mutex::new(AvailabilityRecord::default()));
        }
        Self { records }
    }

    /// Fold one probe outcome into its URL's record
    ///
    /// The record is updated as a unit under its own lock, so concurrent
    /// completions for the same URL never lose updates. Outcomes for URLs
    /// that were not configured at startup are ignored.
    pub async fn record(&self, outcome: &ProbeOutcome) {
        if let Some(record) = self.records.get(&outcome.url) {
            record.lock().await.apply(outcome);
        }
    }

    /// Consistent snapshot of one URL's record, for reporting
    pub async fn snapshot(&self, url: &str) -> Option<AvailabilityRecord> {
        match self.records.get(url) {
            Some(record) => Some(record.lock().await.clone()),
            None => None,
        }
    }
}
