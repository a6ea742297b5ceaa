//! HTTP probe execution and UP/DOWN classification
//!
//! A probe is exactly one HTTP request against one endpoint. The prober
//! never returns an error past its boundary: every failure mode — DNS,
//! connection refused, timeout, bad status, excessive latency — is
//! encoded in the returned [`ProbeOutcome`] and logged as a DOWN line.

use crate::config::Endpoint;
use crate::error::Result;
use reqwest::{Client, Method};
use std::time::{Duration, Instant};

/// Per-request transport timeout, independent of the latency threshold
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Result of a single probe, consumed by the ledger and dropped
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Ledger key: the endpoint URL
    pub url: String,

    /// Endpoint display name, for logging only
    pub name: String,

    /// Whether the probe classified as UP
    pub success: bool,

    /// Wall-clock elapsed time from dispatch to response or failure
    pub latency: Duration,

    /// HTTP status code, absent on transport failure
    pub status: Option<u16>,

    /// Transport error description, absent when a response was received
    pub error: Option<String>,
}

/// Executes probes against monitored endpoints
///
/// One shared HTTP client with a fixed 1-second transport timeout; the
/// configured latency threshold only affects classification, not how
/// long a request is allowed to run.
pub struct Prober {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Maximum latency still classified as UP
    latency_threshold: Duration,
}

impl Prober {
    /// Create a new prober with the given latency threshold
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created
    pub fn new(latency_threshold: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            latency_threshold,
        })
    }

    /// Probe one endpoint and classify the result
    ///
    /// Performs exactly one HTTP request with the endpoint's method and
    /// headers, measures wall-clock latency inclusive of connection
    /// setup, and classifies UP iff the status code is in `[200, 300)`
    /// and latency is strictly below the threshold.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let method = match Method::from_bytes(endpoint.method().as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                // Unsendable request counts as a failed probe, not an error
                tracing::warn!(
                    "DOWN: {} ({}) - invalid method '{}': {e}",
                    endpoint.name,
                    endpoint.url,
                    endpoint.method()
                );
                return ProbeOutcome {
                    url: endpoint.url.clone(),
                    name: endpoint.name.clone(),
                    success: false,
                    latency: Duration::ZERO,
                    status: None,
                    error: Some(format!("invalid method '{}'", endpoint.method())),
                };
            }
        };

        let mut request = self.client.request(method, &endpoint.url);
        for (key, value) in &endpoint.headers {
            request = request.header(key, value);
        }

        let start = Instant::now();
        match request.send().await {
            Ok(response) => {
                let latency = start.elapsed();
                let status = response.status().as_u16();
                let success = classify(status, latency, self.latency_threshold);

                if success {
                    tracing::info!(
                        "UP: {} ({}) - status: {status}, latency: {latency:?}",
                        endpoint.name,
                        endpoint.url
                    );
                } else {
                    tracing::info!(
                        "DOWN: {} ({}) - status: {status}, latency: {latency:?}",
                        endpoint.name,
                        endpoint.url
                    );
                }

                ProbeOutcome {
                    url: endpoint.url.clone(),
                    name: endpoint.name.clone(),
                    success,
                    latency,
                    status: Some(status),
                    error: None,
                }
            }
            Err(e) => {
                let latency = start.elapsed();
                tracing::info!(
                    "DOWN: {} ({}) - error: {e}",
                    endpoint.name,
                    endpoint.url
                );

                ProbeOutcome {
                    url: endpoint.url.clone(),
                    name: endpoint.name.clone(),
                    success: false,
                    latency,
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// UP iff the status is 2xx and latency is strictly below the threshold
#[must_use]
pub fn classify(status: u16, latency: Duration, threshold: Duration) -> bool {
    (200..300).contains(&status) && latency < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_millis(500);

    #[test]
    fn test_success_status_under_threshold_is_up() {
        assert!(classify(200, Duration::from_millis(100), THRESHOLD));
        assert!(classify(204, Duration::from_millis(499), THRESHOLD));
        assert!(classify(299, Duration::from_millis(1), THRESHOLD));
    }

    #[test]
    fn test_error_status_is_down() {
        assert!(!classify(500, Duration::from_millis(100), THRESHOLD));
        assert!(!classify(404, Duration::from_millis(100), THRESHOLD));
        assert!(!classify(301, Duration::from_millis(100), THRESHOLD));
        assert!(!classify(199, Duration::from_millis(100), THRESHOLD));
    }

    #[test]
    fn test_slow_success_is_down() {
        assert!(!classify(200, Duration::from_millis(600), THRESHOLD));
        // Boundary: latency equal to the threshold is DOWN
        assert!(!classify(200, THRESHOLD, THRESHOLD));
    }

    #[test]
    fn test_prober_creation() {
        let prober = Prober::new(THRESHOLD);
        assert!(prober.is_ok());
    }
}
