// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use container_stats::error::SourceError;
use container_stats::models::{Sample, SampleTime};
use container_stats::sink::Sink;
use container_stats::source::SampleSource;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MIB: u64 = 1024 * 1024;

pub fn start_wall() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Sample taken `at` after the test clock origin.
pub fn sample_at(at: Duration, cpu_total_ns: u64, memory_bytes: u64) -> Sample {
    let wall = start_wall() + chrono::Duration::from_std(at).unwrap();
    Sample {
        timestamp: SampleTime::new(wall, at),
        cpu_total_ns,
        memory_bytes,
    }
}

pub fn sample_secs(secs: u64, cpu_total_ns: u64, memory_bytes: u64) -> Sample {
    sample_at(Duration::from_secs(secs), cpu_total_ns, memory_bytes)
}

/// Writer whose bytes can be read back after being moved into a Sink.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn sink(&self) -> Sink {
        Sink::new(vec![Box::new(self.clone())])
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that always fails.
pub struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that accepts `ok_writes` writes, then fails every later one.
pub struct FlakyWriter {
    ok_writes: usize,
}

impl FlakyWriter {
    pub fn new(ok_writes: usize) -> Self {
        Self { ok_writes }
    }
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.ok_writes == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.ok_writes -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Source that replays a fixed script; once exhausted every fetch is `Unavailable`.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Sample, SourceError>>>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Sample, SourceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn samples(samples: Vec<Sample>) -> Self {
        Self::new(samples.into_iter().map(Ok).collect())
    }
}

impl SampleSource for ScriptedSource {
    async fn fetch(&self, container: &str) -> Result<Sample, SourceError> {
        self.fetched.lock().unwrap().push(container.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Unavailable("script exhausted".into())))
    }
}

/// The two-sample scenario: 1s of CPU at t=0, 3.5s at t=5s; 100 MiB then 200 MiB.
pub fn two_sample_scenario() -> (Sample, Sample) {
    (
        sample_secs(0, 1_000_000_000, 100 * MIB),
        sample_secs(5, 3_500_000_000, 200 * MIB),
    )
}
