// Derived metrics and output format

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Output of one engine observation. Elapsed values are relative to the baseline sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub timestamp: DateTime<Utc>,
    pub time_elapsed_s: f64,
    pub cpu_time_elapsed_s: f64,
    /// Percent of one core, averaged since the baseline.
    pub cpu_pct_since_start: f64,
    /// Percent of one core during the last inter-sample gap.
    pub cpu_pct_this_interval: f64,
    pub memory_kib: f64,
}

/// Serialized line format; lowercase in config files and flags ("json", "csv").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File name the stats are written to, e.g. "stats.json".
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "stats.json",
            OutputFormat::Csv => "stats.csv",
        }
    }
}
