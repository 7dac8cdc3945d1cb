//! Logging for the dashboard.
//!
//! Events go to the console and to a daily rolling file in the platform data
//! directory:
//!
//! - Windows: `%APPDATA%/residuos/logs`
//! - macOS: `~/Library/Application Support/residuos/logs`
//! - Linux: `~/.local/share/residuos/logs`
//!
//! The level defaults to `info` and can be overridden with `RUST_LOG`.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! residuos::logging::init()?;
//! tracing::info!("Dashboard started");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Creates the log directory if needed.
///
/// # Errors
///
/// Returns an error if there is no data directory or it cannot be created.
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join(crate::config::APP_DIR).join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")
}

/// Installs the console and file subscribers.
///
/// # Errors
///
/// Returns an error if the log directory or the file appender cannot be
/// created, or a subscriber is already installed.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("residuos")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .pretty();

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install subscriber")?;

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);
    Ok(())
}

/// Console-only logging, for when the log directory is unavailable.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_console() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt::layer().with_target(true))
        .try_init()
        .context("Failed to install subscriber")?;
    Ok(())
}
