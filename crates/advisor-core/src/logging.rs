//! File logging for the advisor.
//!
//! Events go to ${ADVISOR_HOME}/logs/advisor.log so stdout stays reserved for
//! the conversation. `ADVISOR_LOG` takes an `EnvFilter` directive.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ADVISOR_LOG";
pub const LOG_FILE_NAME: &str = "advisor.log";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the global subscriber writing to `logs_dir`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes pending lines.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

/// Parses a filter directive, falling back to `warn` when absent or invalid.
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
