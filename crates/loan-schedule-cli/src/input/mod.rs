pub mod fragment;

use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use loan_schedule_core::Schedule;

/// Resolve a raw schedule from a JSON file, or from piped stdin when no path
/// is given. Returns `None` when neither is available.
pub fn read_schedule(path: Option<&str>) -> Result<Option<Schedule>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(read_json_file(path)?)),
        None => read_piped_json(),
    }
}

/// Read a JSON file relative to the working directory and deserialise it.
pub fn read_json_file<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

/// Deserialise JSON piped on stdin. Interactive terminals and empty input
/// yield `None`.
pub fn read_piped_json<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Schedule file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}
