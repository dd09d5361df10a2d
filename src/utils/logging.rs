//! Logger setup for the two binaries.
//!
//! The terminal frontend owns the screen, so its log lines go to a file in
//! `~/.arena/`. The headless simulator logs to stderr. Both honor `RUST_LOG`.

use crate::core::constants::LOG_FILENAME;
use crate::utils::persistence;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "info";

/// Route logs to `~/.arena/arena.log` (appending). Returns the log path.
pub fn init_file_logger() -> io::Result<PathBuf> {
    let path = persistence::arena_path(LOG_FILENAME)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)?;
    Ok(path)
}

/// Route logs to stderr. A second call is a no-op.
pub fn init_stderr_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}
