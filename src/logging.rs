use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "adjust.log";

pub fn log_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not find local data directory")?;
    Ok(base.join("adjust"))
}

/// Sends tracing output to a log file, since the terminal belongs to the UI.
/// The returned guard flushes pending lines when dropped.
pub fn init(debug: bool) -> Result<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let path = dir.join(LOG_FILE_NAME);
    let file = options
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let (writer, guard) = non_blocking(file);

    let default_filter = if debug { "adjust=debug" } else { "adjust=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    Ok(guard)
}
