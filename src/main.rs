use anyhow::Result;
use clap::Parser;
use container_stats::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    // stdout carries the stats lines; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(container) = args.container() else {
        cli::Args::print_usage(&mut std::io::stdout())?;
        return Ok(());
    };

    let mut app_config = config::AppConfig::load(args.config.as_deref())?;
    args.apply_to(&mut app_config)?;

    let poller_config = poller::PollerConfig {
        format: app_config.output.format,
        interval: Duration::from_secs(app_config.monitoring.interval_secs),
        on_fetch_error: app_config.monitoring.on_fetch_error,
    };
    let docker_repo = docker_repo::DockerRepo::connect(
        models::Clock::new(),
        Duration::from_secs(app_config.monitoring.fetch_timeout_secs),
    )?;

    let output_dir = app_config.output.dir.clone();
    let format = app_config.output.format;
    let poller = match poller::Poller::bootstrap(docker_repo, container, poller_config, || {
        let (sink, path) = sink::Sink::console_and_file(&output_dir, format)?;
        tracing::info!(path = %path.display(), "writing stats file");
        Ok(sink)
    })
    .await
    {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, container, "cannot start monitoring");
            return Err(e.into());
        }
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    });

    if let Err(e) = poller.run(shutdown_rx).await {
        tracing::error!(error = %e, "polling aborted");
        return Err(e.into());
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
