use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upcheck::config::{self, MonitorConfig};
use upcheck::monitor::Monitor;

#[derive(Parser)]
#[command(
    name = "upcheck",
    version,
    about = "HTTP endpoint availability monitor with per-cycle reporting",
    long_about = None
)]
struct Cli {
    /// Path to the YAML endpoint configuration file
    #[arg(short, long, default_value = "./sample.yml")]
    file: PathBuf,

    /// Path to the log file
    #[arg(short, long, default_value = "./upcheck.log")]
    log: PathBuf,

    /// Health check interval in seconds
    #[arg(short, long, default_value = "15")]
    interval: u64,

    /// Latency threshold in milliseconds for UP classification
    #[arg(long, default_value = "500")]
    latency: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log, cli.verbose)?;

    let endpoints = config::load_endpoints(&cli.file)
        .with_context(|| format!("Failed to load endpoints from {}", cli.file.display()))?;

    tracing::info!(
        endpoints = endpoints.len(),
        interval_secs = cli.interval,
        latency_threshold_ms = cli.latency,
        "upcheck starting"
    );

    let monitor_config = MonitorConfig {
        interval: Duration::from_secs(cli.interval),
        latency_threshold: Duration::from_millis(cli.latency),
    };

    let monitor = Monitor::new(endpoints, monitor_config)?;
    monitor.run().await?;

    Ok(())
}

fn setup_tracing(log_path: &Path, verbose: bool) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("upcheck=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("upcheck=info,warn")
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}
