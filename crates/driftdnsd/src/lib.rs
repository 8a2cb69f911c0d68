//! # driftdnsd
//!
//! Daemon wiring for driftdns: argument parsing, configuration loading,
//! tracing setup and the fixed-interval reconciliation scheduler.

pub mod cli;
pub mod config;
pub mod scheduler;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use driftdns_client::{CloudflareClient, EchoClient};
use driftdns_engine::Reconciler;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Process exit codes, following systemd conventions.
#[derive(Debug, Clone, Copy)]
enum DaemonExit {
    /// Normal termination after a shutdown signal or a `--once` run.
    CleanShutdown = 0,
    /// Unusable configuration or credentials detected at startup.
    ConfigError = 1,
    /// The daemon could not keep running.
    RuntimeError = 2,
}

impl From<DaemonExit> for ExitCode {
    fn from(code: DaemonExit) -> Self {
        Self::from(code as u8)
    }
}

impl scheduler::Tick for Reconciler {
    async fn tick(&mut self) {
        self.run_cycle().await;
    }
}

/// Parse arguments, load the configuration and run the daemon to
/// completion.
pub async fn run() -> ExitCode {
    let args = cli::Args::parse();

    // Everything before the subscriber is installed reports to stderr.
    let level = match parse_level(&args.log_level) {
        Some(level) => level,
        None => {
            eprintln!("unknown log level: {}", args.log_level);
            return DaemonExit::ConfigError.into();
        }
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
        return DaemonExit::RuntimeError.into();
    }

    let config_path = match args.config {
        Some(path) => path,
        None => match config::default_path() {
            Ok(path) => path,
            Err(err) => {
                error!(error = %err, "cannot resolve default config path");
                return DaemonExit::ConfigError.into();
            }
        },
    };

    let config = match config::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, path = %config_path.display(), "configuration rejected");
            return DaemonExit::ConfigError.into();
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        domains = config.domains.len(),
        hosts = config.host_count(),
        interval_secs = config.interval,
        "driftdnsd starting"
    );

    let echo = match EchoClient::new(&config.detector) {
        Ok(echo) => echo,
        Err(err) => {
            error!(error = %err, "detector configuration rejected");
            return DaemonExit::ConfigError.into();
        }
    };
    let api = CloudflareClient::new(config.user.clone());
    let mut reconciler = Reconciler::from_config(api, echo, &config.domains);

    if args.once {
        reconciler.run_cycle().await;
        return DaemonExit::CleanShutdown.into();
    }

    let shutdown = match scheduler::ShutdownSignal::install() {
        Ok(shutdown) => shutdown,
        Err(err) => {
            error!(error = %err, "failed to install signal handlers");
            return DaemonExit::RuntimeError.into();
        }
    };

    scheduler::run_cycles(
        Duration::from_secs(config.interval),
        shutdown.wait(),
        &mut reconciler,
    )
    .await;

    info!("driftdnsd stopped");
    DaemonExit::CleanShutdown.into()
}

fn parse_level(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}
