/// Public library interface for the habit store
///
/// This module exports the HabitStore core, the persistence adapters, and the
/// HabitTrackerServer that ties one store to one adapter and serves it over
/// the Model Context Protocol.

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{
    JsonFileStorage, MemoryStorage, SnapshotStorage, SqliteStorage, StorageBackend, StorageError,
};
pub use analytics::{AnalyticsEngine, HabitStats, StoreSummary};
pub use mcp::McpServer;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A habit store bound to its persistence adapter
///
/// Every command applies the change in memory first and then saves the whole
/// snapshot. Commands that change nothing (blank names, repeat archives) skip
/// the save. A failed save is returned to the caller; the in-memory change stays.
pub struct HabitTrackerServer {
    store: HabitStore,
    storage: Box<dyn SnapshotStorage>,
    analytics: AnalyticsEngine,
}

impl HabitTrackerServer {
    /// Load the initial snapshot from `storage`
    ///
    /// Nothing stored yet gives an empty store. A stored snapshot that fails
    /// validation is an error, so it is never silently overwritten.
    pub fn new(storage: Box<dyn SnapshotStorage>, policy: CompletionPolicy) -> Result<Self, ServerError> {
        let store = match storage.load()? {
            Some(raw) => HabitStore::load_snapshot(&raw)?,
            None => HabitStore::new(),
        }
        .with_policy(policy);

        tracing::info!(
            "Habit store ready: {} habits ({} active), {} days of history, {} points",
            store.list_all_habits().len(),
            store.list_active_habits().len(),
            store.history().len(),
            store.total_points()
        );

        Ok(Self {
            store,
            storage,
            analytics: AnalyticsEngine::new(),
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Read access to the store for queries
    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    // Command surface

    pub fn add_habit(&mut self, name: &str) -> Result<Option<Habit>, ServerError> {
        let habit = self.store.add_habit(name);
        if habit.is_some() {
            self.persist()?;
        }
        Ok(habit)
    }

    pub fn rename_habit(&mut self, habit_id: &HabitId, new_name: &str) -> Result<bool, ServerError> {
        let renamed = self.store.rename_habit(habit_id, new_name)?;
        if renamed {
            self.persist()?;
        }
        Ok(renamed)
    }

    pub fn archive_habit(&mut self, habit_id: &HabitId) -> Result<bool, ServerError> {
        let archived = self.store.archive_habit(habit_id)?;
        if archived {
            self.persist()?;
        }
        Ok(archived)
    }

    pub fn toggle_completion(&mut self, habit_id: &HabitId, day: DayKey) -> Result<bool, ServerError> {
        let completed = self.store.toggle_completion(habit_id, day)?;
        self.persist()?;
        Ok(completed)
    }

    pub fn reset_all(&mut self) -> Result<(), ServerError> {
        self.store.reset_all();
        self.persist()?;
        tracing::info!("All habit data cleared");
        Ok(())
    }

    /// Replace all state with an imported snapshot
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), ServerError> {
        self.store.import_snapshot(json)?;
        self.persist()?;
        tracing::info!(
            "Imported snapshot with {} habits",
            self.store.list_all_habits().len()
        );
        Ok(())
    }

    pub fn export_snapshot(&self) -> Result<String, ServerError> {
        Ok(self.store.export_snapshot()?)
    }

    fn persist(&self) -> Result<(), ServerError> {
        self.storage.save(&self.store.snapshot()).map_err(|e| {
            tracing::error!("Failed to save habit snapshot: {}", e);
            ServerError::Database(e)
        })
    }
}
