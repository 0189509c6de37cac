// src/logging.rs
//! File logging. The terminal belongs to the UI, so nothing is written to stdout.
//
// Call `logging::init(level)` at the start of main() and keep the guard alive.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, prelude::*};

pub struct LogGuard {
    _guard: WorkerGuard,
    pub path: PathBuf,
}

fn logs_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("logs")
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
pub fn init(default_level: &str) -> Result<LogGuard> {
    let dir = logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join(format!("folio-{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")));

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(LogGuard {
        _guard: guard,
        path,
    })
}
