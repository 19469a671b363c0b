//! Dataset file loading.
//!
//! The server's player dataset lives in a single file, read once at
//! startup. CSV is the native export format of the source dataset
//! (headers are the original column names); a JSON array works too.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::PlayerRecord;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

/// Load player records from a dataset file, dispatching on extension.
///
/// Rows that fail to parse are skipped with a warning; a file-level
/// failure (missing file, unreadable header, bad JSON document) is an
/// error.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, StorageError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let players = match extension.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(StorageError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} player records from {:?}", players.len(), path);
    Ok(players)
}

fn load_csv(path: &Path) -> Result<Vec<PlayerRecord>, StorageError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut players = Vec::new();

    for (line, result) in reader.deserialize::<PlayerRecord>().enumerate() {
        match result {
            Ok(record) => players.push(record),
            Err(e) => {
                warn!("Skipping malformed CSV row {}: {}", line + 2, e);
            }
        }
    }

    Ok(players)
}

fn load_json(path: &Path) -> Result<Vec<PlayerRecord>, StorageError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
