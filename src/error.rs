// Typed errors: per-fetch source failures, engine rejections, poll loop failures

use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a sample from the container runtime.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("container {0} not found")]
    NotFound(String),
    #[error("stats unavailable: {0}")]
    Unavailable(String),
}

/// A sample the engine refused. Engine state is unchanged when this is returned.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("sample time {current:?} is not after previous sample time {previous:?}")]
    NonMonotonicTime { previous: Duration, current: Duration },
    #[error("cpu counter went backwards: {current} ns < previous {previous} ns")]
    CounterRegressed { previous: u64, current: u64 },
}

#[derive(Debug, Error)]
pub enum PollError {
    /// The bootstrap sample could not be fetched; nothing can be derived without it.
    #[error("startup fetch failed: {0}")]
    Startup(#[source] SourceError),
    /// A mid-run fetch failed under the abort policy.
    #[error("fetch failed: {0}")]
    Fetch(#[source] SourceError),
    #[error("interval {0:?} is too large to schedule")]
    IntervalTooLarge(std::time::Duration),
    #[error("sample rejected: {0}")]
    Engine(#[from] EngineError),
    #[error("write failed: {0}")]
    Sink(#[from] std::io::Error),
}
