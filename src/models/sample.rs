// Raw counter snapshot of one container, plus the clock that stamps it

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// When a sample was taken: wall clock for display, monotonic offset for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleTime {
    /// Offset from the owning [`Clock`]'s origin. Ordering compares this first.
    pub monotonic: Duration,
    pub wall: DateTime<Utc>,
}

impl SampleTime {
    pub fn new(wall: DateTime<Utc>, monotonic: Duration) -> Self {
        Self { monotonic, wall }
    }
}

/// Process-local clock. Monotonic offsets from one `Clock` are comparable with each other only.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> SampleTime {
        SampleTime {
            monotonic: self.origin.elapsed(),
            wall: Utc::now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: SampleTime,
    /// Cumulative CPU time consumed since the container started.
    pub cpu_total_ns: u64,
    pub memory_bytes: u64,
}
