use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const SAMPLING_INTERVAL_MS: u64 = 100;
const TRANSPORT_BACKOFF_MS: u64 = 2000;
const PARSE_BACKOFF_MS: u64 = 1000;
const SHUTDOWN_GRACE_MS: u64 = 1000;

/// Pacing of the acquisition loop.
#[derive(Clone, Debug, PartialEq)]
pub struct AcquisitionConfig {
    /// Sleep after every successful poll. Best effort: fetch latency is not compensated.
    pub sampling_interval: Duration,
    /// Wait after the device could not be reached.
    pub transport_backoff: Duration,
    /// Wait after a response could not be parsed.
    pub parse_backoff: Duration,
    /// How long `stop()` waits for the loop before abandoning it.
    pub shutdown_grace: Duration,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sampling_interval: Duration::from_millis(SAMPLING_INTERVAL_MS),
            transport_backoff: Duration::from_millis(TRANSPORT_BACKOFF_MS),
            parse_backoff: Duration::from_millis(PARSE_BACKOFF_MS),
            shutdown_grace: Duration::from_millis(SHUTDOWN_GRACE_MS),
        }
    }
}

impl AcquisitionConfig {
    pub fn with_sampling_interval(mut self, sampling_interval: Duration) -> Self {
        self.sampling_interval = sampling_interval;
        self
    }
}

/// Lifecycle of an acquisition service. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for CollectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionState::Idle => "idle",
            CollectionState::Running => "running",
            CollectionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Counters updated by the acquisition loop.
#[derive(Debug, Default)]
pub struct AcquisitionStats {
    polls: AtomicU64,
    snapshots: AtomicU64,
    transport_errors: AtomicU64,
    parse_errors: AtomicU64,
}

impl AcquisitionStats {
    pub(crate) fn record_poll(&self) {
        self.polls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_snapshot(&self) {
        self.snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_parse_error(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of fetches issued.
    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }

    /// Number of snapshots stored and published.
    pub fn snapshots(&self) -> u64 {
        self.snapshots.load(Ordering::Relaxed)
    }

    pub fn transport_errors(&self) -> u64 {
        self.transport_errors.load(Ordering::Relaxed)
    }

    pub fn parse_errors(&self) -> u64 {
        self.parse_errors.load(Ordering::Relaxed)
    }
}
