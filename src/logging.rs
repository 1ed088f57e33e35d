//! File logging. The terminal belongs to the dashboard, so log lines go to
//! a daily rolling file instead of stdout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix of the rolling log.
pub const LOG_FILE: &str = "sirona-console.log";

/// Install the global subscriber writing to `<log_dir>/sirona-console.log.<date>`.
///
/// `RUST_LOG` takes precedence over `default_level`. Keep the returned guard
/// alive until exit or buffered lines are lost.
pub fn init_logging(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("installing log subscriber")?;

    Ok(guard)
}
