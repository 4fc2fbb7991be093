//! Generic JSON persistence helpers for ~/.arcade/ files.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.arcade/ directory path, creating it if needed.
pub fn arcade_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".arcade");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.arcade/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(arcade_dir()?.join(filename))
}

/// Read JSON from `path`, returning `T::default()` if missing or invalid.
pub fn load_json_from<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Write `data` to `path` as pretty-printed JSON, creating parent directories.
pub fn save_json_to<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Load a JSON file from ~/.arcade/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => load_json_from(&path),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.arcade/.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    save_json_to(&save_path(filename)?, data)
}
