//! File locations under `~/.arena/`.
//!
//! Config, sprite overrides and the log file live here; game progress is
//! never written to disk.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.arena/ directory path, creating it if needed.
pub fn arena_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".arena");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.arena/.
pub fn arena_path(filename: &str) -> io::Result<PathBuf> {
    Ok(arena_dir()?.join(filename))
}

/// Save a value as pretty-printed JSON to an arbitrary path.
pub fn write_json<T: serde::Serialize>(path: &std::path::Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
