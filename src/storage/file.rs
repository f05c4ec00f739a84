/// JSON file implementation of the snapshot storage interface
///
/// The snapshot is written as a pretty-printed JSON document, the same shape
/// `export_snapshot` produces, so the data file doubles as a backup. Saves go
/// through a sibling temp file and a rename, so the data file is always either
/// the previous snapshot or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::Snapshot;
use crate::storage::{SnapshotStorage, StorageError};

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `habits.json` -> `habits.json.tmp.<pid>` in the same directory
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(format!(".tmp.{}", std::process::id()));
        self.path.with_file_name(name)
    }

    fn write_temp(&self, temp_path: &Path, payload: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path)?;
        file.write_all(payload)?;
        file.sync_all()?;
        Ok(())
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                tracing::info!("Loaded snapshot from {}", self.path.display());
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(snapshot)?;
        let temp_path = self.temp_path();

        let written = self
            .write_temp(&temp_path, &payload)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(StorageError::Io));
        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            tracing::error!("Failed to save snapshot to {}: {}", self.path.display(), err);
            return Err(err);
        }

        tracing::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}
