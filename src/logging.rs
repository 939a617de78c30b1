// src/logging.rs
//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::File;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber. Returns `None` when logging is disabled.
pub fn init(settings: &Settings) -> Result<Option<LogGuard>> {
    if !settings.log_enabled {
        return Ok(None);
    }

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(
            settings
                .log_level
                .parse()
                .with_context(|| format!("invalid log level {:?}", settings.log_level))?,
        )
        .from_env_lossy();

    let file = File::create(&settings.log_file)
        .with_context(|| format!("failed to create log file {}", settings.log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "auraplay starting");
    Ok(Some(LogGuard { _guard: guard }))
}
