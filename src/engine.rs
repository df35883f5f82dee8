// Metrics engine: turns cumulative CPU counters into elapsed and percent-of-core values.
// State is the baseline (first sample) and the previous sample; nothing else is kept.

use crate::error::EngineError;
use crate::models::{DerivedMetrics, Sample};
use std::time::Duration;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy)]
struct EngineState {
    baseline: Sample,
    previous: Sample,
}

#[derive(Debug, Default)]
pub struct MetricsEngine {
    state: Option<EngineState>,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample and derive metrics from it.
    ///
    /// The first sample becomes the baseline and yields zero elapsed/percent values.
    /// A sample that is not strictly later than the previous one, or whose CPU counter
    /// went backwards, is rejected and leaves the state untouched.
    pub fn observe(&mut self, sample: Sample) -> Result<DerivedMetrics, EngineError> {
        let Some(state) = self.state else {
            self.state = Some(EngineState {
                baseline: sample,
                previous: sample,
            });
            return Ok(DerivedMetrics {
                timestamp: sample.timestamp.wall,
                time_elapsed_s: 0.0,
                cpu_time_elapsed_s: 0.0,
                cpu_pct_since_start: 0.0,
                cpu_pct_this_interval: 0.0,
                memory_kib: kib(sample.memory_bytes),
            });
        };

        let previous = state.previous;
        if sample.timestamp.monotonic <= previous.timestamp.monotonic {
            return Err(EngineError::NonMonotonicTime {
                previous: previous.timestamp.monotonic,
                current: sample.timestamp.monotonic,
            });
        }
        if sample.cpu_total_ns < previous.cpu_total_ns {
            return Err(EngineError::CounterRegressed {
                previous: previous.cpu_total_ns,
                current: sample.cpu_total_ns,
            });
        }

        let baseline = state.baseline;
        // previous >= baseline on both axes, so these cannot underflow
        let since_start = sample.timestamp.monotonic - baseline.timestamp.monotonic;
        let this_interval = sample.timestamp.monotonic - previous.timestamp.monotonic;
        let cpu_since_start = sample.cpu_total_ns - baseline.cpu_total_ns;
        let cpu_this_interval = sample.cpu_total_ns - previous.cpu_total_ns;

        self.state = Some(EngineState {
            baseline,
            previous: sample,
        });

        Ok(DerivedMetrics {
            timestamp: sample.timestamp.wall,
            time_elapsed_s: since_start.as_secs_f64(),
            cpu_time_elapsed_s: cpu_since_start as f64 / NANOS_PER_SEC,
            cpu_pct_since_start: percent_of_core(cpu_since_start, since_start),
            cpu_pct_this_interval: percent_of_core(cpu_this_interval, this_interval),
            memory_kib: kib(sample.memory_bytes),
        })
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.state.is_some()
    }

    pub fn baseline(&self) -> Option<&Sample> {
        self.state.as_ref().map(|s| &s.baseline)
    }

    pub fn previous(&self) -> Option<&Sample> {
        self.state.as_ref().map(|s| &s.previous)
    }
}

/// CPU ns over wall ns as a percentage of one core. A zero-length window is 0%.
fn percent_of_core(cpu_ns: u64, window: Duration) -> f64 {
    let window_ns = window.as_nanos();
    if window_ns == 0 {
        return 0.0;
    }
    cpu_ns as f64 / window_ns as f64 * 100.0
}

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
