//! JSON file persistence
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place so a
//! crash mid-write never leaves a truncated save behind.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure reading or writing a persisted file
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and decode a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Encode and atomically replace a JSON file
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
