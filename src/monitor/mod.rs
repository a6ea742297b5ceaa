//! Cycle scheduling and process lifecycle
//!
//! One coordinating task drives everything: it waits for the interval
//! tick, fans out one probe task per endpoint, joins the whole round
//! before reporting, and races all of that against termination signals.
//! A slow cycle delays the next tick instead of overlapping it.

use crate::config::{Endpoint, MonitorConfig};
use crate::error::Result;
use crate::ledger::AvailabilityLedger;
use crate::probe::Prober;
use crate::report::Reporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

/// Periodic health check monitor
pub struct Monitor {
    endpoints: Vec<Endpoint>,
    prober: Arc<Prober>,
    ledger: Arc<AvailabilityLedger>,
    reporter: Reporter,
    interval: Duration,
}

impl Monitor {
    /// Build a monitor from validated endpoints and run-time parameters
    ///
    /// The ledger is pre-allocated here, one entry per distinct URL,
    /// before any cycle runs.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created
    pub fn new(endpoints: Vec<Endpoint>, config: MonitorConfig) -> Result<Self> {
        let prober = Arc::new(Prober::new(config.latency_threshold)?);
        let ledger = Arc::new(AvailabilityLedger::new(&endpoints));
        let reporter = Reporter::new(endpoints.clone());

        Ok(Self {
            endpoints,
            prober,
            ledger,
            reporter,
            interval: config.interval,
        })
    }

    /// Shared availability statistics
    #[must_use]
    pub fn ledger(&self) -> &Arc<AvailabilityLedger> {
        &self.ledger
    }

    /// Run cycles until an interrupt or termination signal arrives
    ///
    /// The first cycle starts immediately; subsequent cycles fire on the
    /// configured interval. A signal received while probes are in flight
    /// abandons the cycle and returns without a final report.
    pub async fn run(&self) -> Result<()> {
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tracing::info!("Monitoring {} endpoints:", self.endpoints.len());
        for endpoint in &self.endpoints {
            tracing::info!(
                "- domain: {}, url: {}",
                endpoint.host().unwrap_or_else(|| "unknown".to_string()),
                endpoint.url
            );
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        () = self.run_cycle() => {
                            self.reporter.report(&self.ledger).await;
                        }
                        name = wait_signal(&mut sigint, &mut sigterm) => {
                            tracing::info!("Received {name} mid-cycle. Exiting.");
                            return Ok(());
                        }
                    }
                }
                name = wait_signal(&mut sigint, &mut sigterm) => {
                    tracing::info!("Received {name}. Exiting.");
                    return Ok(());
                }
            }
        }
    }

    /// Run one full cycle: fan out one probe per endpoint, join them all
    ///
    /// Returns only after every probe of the round has completed and its
    /// outcome has been folded into the ledger.
    pub async fn run_cycle(&self) {
        tracing::info!("Starting health check cycle");

        let mut round = JoinSet::new();
        for endpoint in self.endpoints.iter().cloned() {
            let prober = Arc::clone(&self.prober);
            let ledger = Arc::clone(&self.ledger);
            round.spawn(async move {
                let outcome = prober.probe(&endpoint).await;
                ledger.record(&outcome).await;
            });
        }

        // Cycle barrier: no report until every probe has returned
        while let Some(joined) = round.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("probe task failed to join: {e}");
            }
        }
    }
}

async fn wait_signal(sigint: &mut Signal, sigterm: &mut Signal) -> &'static str {
    tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    }
}
