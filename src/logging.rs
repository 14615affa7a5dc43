//! Log setup
//!
//! The terminal is owned by the UI, so events go to a file. The filter comes
//! from `SCRIBE_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SCRIBE_LOG";

pub fn init(log_path: &Path) -> Result<()> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {}", e))?;

    Ok(())
}
