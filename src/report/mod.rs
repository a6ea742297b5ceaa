//! Per-cycle availability report rendering
//!
//! One report block per cycle, rendered after every probe of the cycle
//! has completed. Endpoints appear in configured order, even when several
//! of them share one ledger entry by URL.

use crate::config::Endpoint;
use crate::ledger::AvailabilityLedger;
use std::fmt::Write as _;

/// Renders cumulative availability statistics per endpoint
pub struct Reporter {
    endpoints: Vec<Endpoint>,
}

impl Reporter {
    #[must_use]
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Render the report block for the current ledger state
    ///
    /// Pure read: calling this twice without intervening outcomes yields
    /// identical text.
    pub async fn render(&self, ledger: &AvailabilityLedger) -> String {
        let mut out = String::new();

        for endpoint in &self.endpoints {
            let Some(record) = ledger.snapshot(&endpoint.url).await else {
                continue;
            };

            let Some(percent) = record.availability_percent() else {
                let _ = writeln!(
                    out,
                    "{} ({}) has no availability data yet.",
                    endpoint.name, endpoint.url
                );
                continue;
            };

            let _ = writeln!(
                out,
                "{} ({}) has {percent}% availability percentage",
                endpoint.name, endpoint.url
            );
            let _ = writeln!(out, "   Total Checks: {}", record.total());
            let _ = writeln!(out, "   Successful Checks: {}", record.success_count);
            let _ = writeln!(out, "   Failed Checks: {}", record.failure_count);
            match record.average_latency() {
                Some(avg) => {
                    let _ = writeln!(out, "   Average Latency: {avg:?}");
                }
                None => {
                    let _ = writeln!(out, "   Average Latency: N/A");
                }
            }
            if let Some(min) = record.min_latency {
                let _ = writeln!(out, "   Minimum Latency: {min:?}");
            }
            if let Some(max) = record.max_latency {
                let _ = writeln!(out, "   Maximum Latency: {max:?}");
            }
        }

        out
    }

    /// Render and emit the report to stdout and the log sink
    pub async fn report(&self, ledger: &AvailabilityLedger) {
        let block = self.render(ledger).await;
        println!("{block}");
        tracing::info!("availability report:\n{block}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeOutcome;
    use std::collections::HashMap;
    use std::time::Duration;

    fn endpoint(name: &str, url: &str) -> Endpoint {
        Endpoint {
            name: name.to_string(),
            url: url.to_string(),
            method: None,
            headers: HashMap::new(),
        }
    }

    fn outcome(url: &str, success: bool, latency_ms: u64) -> ProbeOutcome {
        ProbeOutcome {
            url: url.to_string(),
            name: "test".to_string(),
            success,
            latency: Duration::from_millis(latency_ms),
            status: success.then_some(200),
            error: None,
        }
    }

    #[tokio::test]
    async fn test_no_data_line_before_first_probe() {
        let endpoints = vec![endpoint("homepage", "http://a/")];
        let ledger = AvailabilityLedger::new(&endpoints);
        let reporter = Reporter::new(endpoints);

        let block = reporter.render(&ledger).await;
        assert_eq!(block, "homepage (http://a/) has no availability data yet.\n");
    }

    #[tokio::test]
    async fn test_report_block_contents() {
        let endpoints = vec![endpoint("homepage", "http://a/")];
        let ledger = AvailabilityLedger::new(&endpoints);
        ledger.record(&outcome("http://a/", true, 100)).await;
        ledger.record(&outcome("http://a/", true, 300)).await;
        ledger.record(&outcome("http://a/", false, 50)).await;

        let reporter = Reporter::new(endpoints);
        let block = reporter.render(&ledger).await;

        assert!(block.contains("homepage (http://a/) has 67% availability percentage"));
        assert!(block.contains("Total Checks: 3"));
        assert!(block.contains("Successful Checks: 2"));
        assert!(block.contains("Failed Checks: 1"));
        assert!(block.contains("Average Latency: 200ms"));
        assert!(block.contains("Minimum Latency: 100ms"));
        assert!(block.contains("Maximum Latency: 300ms"));
    }

    #[tokio::test]
    async fn test_all_failures_has_no_latency_lines() {
        let endpoints = vec![endpoint("homepage", "http://a/")];
        let ledger = AvailabilityLedger::new(&endpoints);
        ledger.record(&outcome("http://a/", false, 100)).await;

        let reporter = Reporter::new(endpoints);
        let block = reporter.render(&ledger).await;

        assert!(block.contains("has 0% availability percentage"));
        assert!(block.contains("Average Latency: N/A"));
        assert!(!block.contains("Minimum Latency"));
        assert!(!block.contains("Maximum Latency"));
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let endpoints = vec![endpoint("homepage", "http://a/")];
        let ledger = AvailabilityLedger::new(&endpoints);
        ledger.record(&outcome("http://a/", true, 150)).await;

        let reporter = Reporter::new(endpoints);
        let first = reporter.render(&ledger).await;
        let second = reporter.render(&ledger).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicate_urls_report_identical_statistics() {
        let endpoints = vec![
            endpoint("alpha", "http://shared/"),
            endpoint("beta", "http://shared/"),
        ];
        let ledger = AvailabilityLedger::new(&endpoints);
        ledger.record(&outcome("http://shared/", true, 100)).await;
        ledger.record(&outcome("http://shared/", false, 100)).await;

        let reporter = Reporter::new(endpoints);
        let block = reporter.render(&ledger).await;

        // Both names are rendered, each backed by the same shared record
        assert!(block.contains("alpha (http://shared/) has 50% availability percentage"));
        assert!(block.contains("beta (http://shared/) has 50% availability percentage"));
        assert_eq!(block.matches("Total Checks: 2").count(), 2);
    }
}
