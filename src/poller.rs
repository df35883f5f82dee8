// Poll loop: one fetch-observe-render-write cycle per tick, never overlapping.

use crate::config::FetchErrorPolicy;
use crate::engine::MetricsEngine;
use crate::error::PollError;
use crate::models::OutputFormat;
use crate::render;
use crate::sink::Sink;
use crate::source::SampleSource;
use std::io;
use tokio::sync::oneshot;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};

/// Poller timing, output format and failure policy.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub format: OutputFormat,
    pub interval: Duration,
    pub on_fetch_error: FetchErrorPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Written,
    /// Nothing was written for this tick (fetch failed under `Skip`, or the engine rejected the sample).
    Skipped,
}

pub struct Poller<S> {
    source: S,
    container: String,
    engine: MetricsEngine,
    sink: Sink,
    config: PollerConfig,
    written_total: u64,
    skipped_total: u64,
}

impl<S: SampleSource> Poller<S> {
    /// Fetch the baseline sample, then open the sink and write the header and the
    /// baseline's zero row. A failed first fetch is fatal and `open_sink` is never called,
    /// so no output file is created.
    pub async fn bootstrap<F>(
        source: S,
        container: impl Into<String>,
        config: PollerConfig,
        open_sink: F,
    ) -> Result<Self, PollError>
    where
        F: FnOnce() -> io::Result<Sink>,
    {
        let container = container.into();
        let sample = source
            .fetch(&container)
            .await
            .map_err(PollError::Startup)?;

        let mut engine = MetricsEngine::new();
        // first observation of a fresh engine cannot be rejected
        let metrics = engine.observe(sample)?;

        let mut sink = open_sink()?;
        sink.write_header(config.format)?;
        sink.write_line(&render::render(&metrics, config.format))?;
        tracing::info!(
            container = %container,
            cpu_total_ns = sample.cpu_total_ns,
            memory_bytes = sample.memory_bytes,
            "baseline sample taken"
        );

        Ok(Self {
            source,
            container,
            engine,
            sink,
            config,
            written_total: 1,
            skipped_total: 0,
        })
    }

    /// Run one cycle. Sink I/O errors and fetch errors under `Abort` are returned;
    /// everything else is logged and reported as `Skipped`.
    pub async fn tick(&mut self) -> Result<TickOutcome, PollError> {
        let sample = match self.source.fetch(&self.container).await {
            Ok(s) => s,
            Err(e) => match self.config.on_fetch_error {
                FetchErrorPolicy::Skip => {
                    tracing::warn!(
                        error = %e,
                        operation = "fetch",
                        container = %self.container,
                        "stats fetch failed; skipping tick"
                    );
                    self.skipped_total += 1;
                    return Ok(TickOutcome::Skipped);
                }
                FetchErrorPolicy::Abort => return Err(PollError::Fetch(e)),
            },
        };

        let metrics = match self.engine.observe(sample) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, operation = "observe", "sample rejected");
                self.skipped_total += 1;
                return Ok(TickOutcome::Skipped);
            }
        };

        let line = render::render(&metrics, self.config.format);
        self.sink.write_line(&line)?;
        self.written_total += 1;
        tracing::debug!(
            cpu_pct_this_interval = metrics.cpu_pct_this_interval,
            memory_kib = metrics.memory_kib,
            "sample written"
        );
        Ok(TickOutcome::Written)
    }

    /// Tick every `interval` until `shutdown` fires or a fatal error occurs. The first
    /// tick is one interval after the call; an interval that cannot be scheduled is an
    /// error. A cycle that overruns delays the next tick rather than running
    /// concurrently with it.
    #[tracing::instrument(skip_all, fields(container = %self.container))]
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> Result<(), PollError> {
        let period = self.config.interval;
        let Some(start) = Instant::now().checked_add(period) else {
            return Err(PollError::IntervalTooLarge(period));
        };
        let mut tick = interval_at(start, period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval_secs = period.as_secs_f64(), "polling started");

        let result = loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.tick().await {
                        break Err(e);
                    }
                }
                _ = &mut shutdown => {
                    tracing::debug!("poller shutting down");
                    break Ok(());
                }
            }
        };

        tracing::info!(
            samples_written_total = self.written_total,
            ticks_skipped_total = self.skipped_total,
            "polling stopped"
        );
        result
    }

    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    pub fn written_total(&self) -> u64 {
        self.written_total
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped_total
    }
}
