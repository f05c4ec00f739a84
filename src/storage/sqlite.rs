/// SQLite implementation of the snapshot storage interface
///
/// The snapshot is kept as one JSON document in a small key-value table,
/// under the same `habitData` key older browser captures used.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Snapshot;
use crate::storage::{migrations, SnapshotStorage, StorageError};

/// Key the snapshot document is stored under
pub const SNAPSHOT_KEY: &str = "habitData";

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let mut conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&mut conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// In-memory database, mostly useful for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let mut conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&mut conn)?;
        Ok(Self { conn })
    }

    /// When the snapshot was last saved (RFC 3339), if ever
    pub fn last_saved_at(&self) -> Result<Option<String>, StorageError> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(updated_at)
    }
}

impl SnapshotStorage for SqliteStorage {
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError> {
        let document = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match document {
            Some(json) => {
                tracing::debug!("Loaded snapshot ({} bytes)", json.len());
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![SNAPSHOT_KEY, json, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!(
            "Saved snapshot: {} habits, {} days, {} points",
            snapshot.habits.len(),
            snapshot.history.len(),
            snapshot.points
        );
        Ok(())
    }
}
