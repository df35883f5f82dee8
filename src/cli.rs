// Command-line flags. Flags given on the command line override the config file.

use crate::config::{AppConfig, FetchErrorPolicy};
use crate::models::OutputFormat;
use clap::{CommandFactory, Parser};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "container-stats",
    version,
    about = "Poll a Docker container's CPU and memory usage and write it as JSON lines or CSV"
)]
pub struct Args {
    /// Name or ID of the container to monitor
    #[arg(long, default_value = "")]
    pub container: String,

    /// Output format
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Collection interval (in seconds) [default: 5]
    #[arg(long)]
    pub interval: Option<u64>,

    /// Timeout for one stats request (in seconds) [default: 10]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// What to do when a stats request fails after startup [default: skip]
    #[arg(long, value_enum)]
    pub on_fetch_error: Option<FetchErrorPolicy>,

    /// Directory for stats.json / stats.csv [default: .]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// TOML config file (falls back to CONFIG_FILE)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Trimmed container identifier, or `None` when it was left empty.
    pub fn container(&self) -> Option<&str> {
        let c = self.container.trim();
        (!c.is_empty()).then_some(c)
    }

    /// Overlay explicitly given flags onto `config`, then re-validate.
    pub fn apply_to(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(format) = self.output_format {
            config.output.format = format;
        }
        if let Some(interval) = self.interval {
            config.monitoring.interval_secs = interval;
        }
        if let Some(timeout) = self.timeout {
            config.monitoring.fetch_timeout_secs = timeout;
        }
        if let Some(policy) = self.on_fetch_error {
            config.monitoring.on_fetch_error = policy;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        config.validate()
    }

    /// Missing-container message followed by the full help text.
    pub fn usage() -> String {
        format!(
            "--container flag is required\n{}",
            Args::command().render_help()
        )
    }

    pub fn print_usage(out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", Self::usage())?;
        out.flush()
    }
}
