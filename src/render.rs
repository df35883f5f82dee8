// Line rendering for derived metrics (JSON lines or CSV rows)

use crate::models::{DerivedMetrics, OutputFormat};
use chrono::SecondsFormat;

pub const CSV_HEADER: &str =
    "ts,timeElapsed,cpuTimeElapsed,percentCPUSinceStart,percentCPUThisInterval,memoryUsageKiB";

/// Header line written once before any rows; JSON has none.
pub fn header(format: OutputFormat) -> Option<&'static str> {
    match format {
        OutputFormat::Json => None,
        OutputFormat::Csv => Some(CSV_HEADER),
    }
}

/// Render one sample's metrics as a single line, without the trailing newline.
pub fn render(metrics: &DerivedMetrics, format: OutputFormat) -> String {
    // RFC 3339, whole seconds, "Z" suffix
    let ts = metrics.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    match format {
        OutputFormat::Json => format!(
            r#"{{"ts":"{}","timeElapsed":{:.2},"cpuTimeElapsed":{:.2},"percentCPUSinceStart":{:.2},"percentCPUThisInterval":{:.2},"memoryUsageKiB":{:.1}}}"#,
            ts,
            metrics.time_elapsed_s,
            metrics.cpu_time_elapsed_s,
            metrics.cpu_pct_since_start,
            metrics.cpu_pct_this_interval,
            metrics.memory_kib,
        ),
        OutputFormat::Csv => format!(
            "{},{:.2},{:.2},{:.2},{:.2},{:.1}",
            ts,
            metrics.time_elapsed_s,
            metrics.cpu_time_elapsed_s,
            metrics.cpu_pct_since_start,
            metrics.cpu_pct_this_interval,
            metrics.memory_kib,
        ),
    }
}
