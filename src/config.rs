use crate::models::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Upper bound on one stats request to the container runtime.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub on_fetch_error: FetchErrorPolicy,
}

/// Upper bound for interval and timeout values (one day).
pub const MAX_SECS: u64 = 86_400;

fn default_interval_secs() -> u64 {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            on_fetch_error: FetchErrorPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory that receives stats.json / stats.csv.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            dir: default_output_dir(),
        }
    }
}

/// What a failed mid-run fetch does to the poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// Log the failure, write nothing for that tick, keep polling.
    #[default]
    Skip,
    /// Stop polling and exit with the error.
    Abort,
}

impl AppConfig {
    /// Load from `path`, else from `CONFIG_FILE`, else built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os("CONFIG_FILE").map(PathBuf::from),
        };
        match path {
            Some(p) => {
                let s = std::fs::read_to_string(&p)
                    .map_err(|e| anyhow::anyhow!("reading config {}: {}", p.display(), e))?;
                Self::load_from_str(&s)
            }
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.monitoring.interval_secs > 0,
            "monitoring.interval_secs must be > 0, got {}",
            self.monitoring.interval_secs
        );
        anyhow::ensure!(
            self.monitoring.interval_secs <= MAX_SECS,
            "monitoring.interval_secs must be <= {}, got {}",
            MAX_SECS,
            self.monitoring.interval_secs
        );
        anyhow::ensure!(
            self.monitoring.fetch_timeout_secs > 0,
            "monitoring.fetch_timeout_secs must be > 0, got {}",
            self.monitoring.fetch_timeout_secs
        );
        anyhow::ensure!(
            self.monitoring.fetch_timeout_secs <= MAX_SECS,
            "monitoring.fetch_timeout_secs must be <= {}, got {}",
            MAX_SECS,
            self.monitoring.fetch_timeout_secs
        );
        anyhow::ensure!(
            !self.output.dir.as_os_str().is_empty(),
            "output.dir must be non-empty"
        );
        Ok(())
    }
}
