//! Command line and environment configuration of the collector.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use common::constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_WINDOW_SIZE};
use phyphox_rs::AcquisitionConfig;
use plotter::DEFAULT_REFRESH_PERIOD;

/// Collects motion-sensor data from a phone running phyphox, plots it live and exports it to CSV on exit.
///
/// Every option can also be given through the environment, or a `.env` file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "collector", version)]
pub struct CollectorConfig {
    /// Base URL of the phyphox remote access server
    #[arg(long, env = "URL_PHYPHOX", default_value = "http://localhost:8080")]
    pub url: String,

    /// Number of snapshots kept in memory and exported
    #[arg(long, env = "COLLECTOR_BUFFER_CAPACITY", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_capacity: usize,

    /// Number of points shown per plotted channel
    #[arg(long, env = "COLLECTOR_WINDOW_SIZE", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Pause between two polls of the device
    #[arg(long, env = "COLLECTOR_SAMPLING_INTERVAL_MS", default_value_t = 100)]
    pub sampling_interval_ms: u64,

    /// Plot refresh period
    #[arg(long, env = "COLLECTOR_REFRESH_PERIOD_MS", default_value_t = DEFAULT_REFRESH_PERIOD.as_millis() as u64)]
    pub refresh_period_ms: u64,

    /// Timeout of every request to the device
    #[arg(long, env = "COLLECTOR_TIMEOUT_MS", default_value_t = 2000)]
    pub timeout_ms: u64,

    /// Directory the CSV export is written to
    #[arg(long, env = "COLLECTOR_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long, env = "COLLECTOR_RUN_FOR_SECS")]
    pub run_for_secs: Option<u64>,

    /// Print the latest values on the terminal instead of opening gnuplot windows
    #[arg(long)]
    pub console: bool,

    /// Don't plot at all
    #[arg(long, conflicts_with = "console")]
    pub headless: bool,

    /// Poll a synthetic device instead of a phone
    #[arg(long)]
    pub mock: bool,
}

impl CollectorConfig {
    pub fn acquisition(&self) -> AcquisitionConfig {
        AcquisitionConfig::default()
            .with_sampling_interval(Duration::from_millis(self.sampling_interval_ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }

    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs.map(Duration::from_secs)
    }
}
