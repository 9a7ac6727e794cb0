//! Caller-supplied run measurement.
//!
//! The driver calls [`TelemetryCollector::start`] once before the root is
//! built, [`TelemetryCollector::observe_retained_bytes`] after every frontier
//! mutation batch, and [`TelemetryCollector::finish`] once when the loop ends.
//! Telemetry never influences the search.

use std::time::{Duration, Instant};

/// What a collector measured over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryReport {
    /// Wall-clock time between `start` and `finish`.
    pub elapsed: Duration,
    /// Peak bytes retained by the frontier, if the collector tracks memory.
    pub peak_memory_bytes: Option<u64>,
}

/// Observer for wall-clock and memory figures of a run.
pub trait TelemetryCollector {
    /// Called once before the search begins.
    fn start(&mut self);

    /// Bytes currently accounted to the frontier.
    fn observe_retained_bytes(&mut self, bytes: u64);

    /// Called once when the search ends.
    fn finish(&mut self) -> TelemetryReport;
}

/// Measures wall-clock time only.
#[derive(Debug, Default)]
pub struct NullTelemetry {
    started: Option<Instant>,
}

impl NullTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetryCollector for NullTelemetry {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn observe_retained_bytes(&mut self, _bytes: u64) {}

    fn finish(&mut self) -> TelemetryReport {
        TelemetryReport {
            elapsed: self.started.map_or(Duration::ZERO, |t| t.elapsed()),
            peak_memory_bytes: None,
        }
    }
}

/// Measures wall-clock time and the peak of the frontier's accounted bytes.
///
/// The figure covers live search states only (see
/// [`crate::state::SearchState::accounted_bytes`]), not allocator overhead,
/// so it is identical across runs of the same instance and policy.
#[derive(Debug, Default)]
pub struct PeakMemoryTelemetry {
    started: Option<Instant>,
    peak_bytes: u64,
}

impl PeakMemoryTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peak observed so far.
    #[must_use]
    pub fn peak_bytes(&self) -> u64 {
        self.peak_bytes
    }
}

impl TelemetryCollector for PeakMemoryTelemetry {
    fn start(&mut self) {
        self.started = Some(Instant::now());
        self.peak_bytes = 0;
    }

    fn observe_retained_bytes(&mut self, bytes: u64) {
        self.peak_bytes = self.peak_bytes.max(bytes);
    }

    fn finish(&mut self) -> TelemetryReport {
        TelemetryReport {
            elapsed: self.started.map_or(Duration::ZERO, |t| t.elapsed()),
            peak_memory_bytes: Some(self.peak_bytes),
        }
    }
}
