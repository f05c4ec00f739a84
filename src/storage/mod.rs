/// Storage layer for persisting habit snapshots
///
/// The habit store never touches the disk itself. A SnapshotStorage loads the
/// initial snapshot once and saves a fresh one after every mutation. Writers
/// do not coordinate: the last save wins.

pub mod sqlite;
pub mod migrations;
pub mod file;
pub mod memory;

// Re-export the main storage types
pub use sqlite::*;
pub use file::*;
pub use memory::*;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use crate::domain::Snapshot;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Unknown storage backend: {0}")]
    UnknownBackend(String),
}

/// Trait defining the persistence adapter for habit snapshots
///
/// `load` hands back the raw JSON so the domain layer can validate and
/// migrate it; `save` always receives a canonical snapshot.
pub trait SnapshotStorage: Send {
    /// Load the stored snapshot, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// Which persistence adapter to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Json,
}

impl StorageBackend {
    /// Pick a backend from the file extension (`.json` or SQLite)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StorageBackend::Json,
            _ => StorageBackend::Sqlite,
        }
    }

    /// Open the adapter at `path`
    pub fn open(&self, path: &Path) -> Result<Box<dyn SnapshotStorage>, StorageError> {
        Ok(match self {
            StorageBackend::Sqlite => Box::new(SqliteStorage::new(path.to_path_buf())?),
            StorageBackend::Json => Box::new(JsonFileStorage::new(path.to_path_buf())),
        })
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => f.write_str("sqlite"),
            StorageBackend::Json => f.write_str("json"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "json" => Ok(StorageBackend::Json),
            other => Err(StorageError::UnknownBackend(other.to_string())),
        }
    }
}
