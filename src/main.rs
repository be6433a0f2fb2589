//! Vigil - cluster-aware health monitoring and alerting
//!
//! Main entry point for the Vigil CLI.

mod cli;
mod engine;

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vigil_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use vigil_monitor::MonitorService;

use crate::cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = if logging.json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    let file = match &logging.file_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("vigil")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Dropping the guard stops the writer thread.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

/// Load the configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<(Config, bool), Box<dyn std::error::Error>> {
    if path.exists() {
        Ok((ConfigLoader::load(path)?, true))
    } else {
        Ok((Config::default(), false))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, found) = load_config(&cli.config)?;

    if let Some(Commands::Validate) = cli.command {
        return validate(&cli.config, &config, found);
    }

    init_tracing(&config.logging)?;
    if !found {
        warn!(
            "Configuration file {} not found, using defaults",
            cli.config.display()
        );
    }
    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let service = engine::build_service(&config)?;

    match cli.command {
        None | Some(Commands::Run) => run(&service, &config).await,
        Some(Commands::Once { events }) => once(&service, events).await,
        Some(Commands::Validate) => Ok(()),
    }
}

fn validate(path: &Path, config: &Config, found: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !found {
        return Err(format!("configuration file {} not found", path.display()).into());
    }

    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    result.into_result()?;

    println!(
        "{} is valid ({} monitor(s), {} notification(s))",
        path.display(),
        config.monitors.len(),
        config.notifications.len()
    );
    Ok(())
}

/// Run cycles until interrupted. Cycle failures are logged and the loop
/// continues on the next tick.
async fn run(service: &MonitorService, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if !config.monitor.enabled {
        info!("Monitoring is disabled ([monitor] enabled = false)");
        return Ok(());
    }

    info!(
        "Starting Vigil v{} (interval {}s)",
        env!("CARGO_PKG_VERSION"),
        config.monitor.interval_secs
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(config.monitor.interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = service.update().await {
                    error!("Monitor cycle failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

async fn once(service: &MonitorService, show_events: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = service.update().await?;
    println!(
        "local events: {}, cluster lock: {}, cluster events: {}, notifications delivered: {}",
        report.local_events,
        if report.lock_acquired { "acquired" } else { "busy" },
        report.cluster_events,
        report.deliveries
    );

    if show_events {
        for event in service.recent_events().await? {
            println!("{}", event.summary());
        }
    }
    Ok(())
}
