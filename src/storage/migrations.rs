/// SQLite schema versioning for the snapshot store
///
/// Migrations are an ordered list of SQL batches. Each one runs in its own
/// transaction together with the version bump, so a failed step leaves the
/// database at the previous version.

use rusqlite::{Connection, OptionalExtension};
use crate::storage::StorageError;

/// Schema steps in order; entry `n` upgrades version `n` to `n + 1`
const MIGRATIONS: &[(&str, &str)] = &[(
    "snapshot key-value table",
    "CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );",
)];

/// Version a fully migrated database reports
pub fn latest_version() -> i32 {
    MIGRATIONS.len() as i32
}

/// Bring the schema up to date, refusing databases written by a newer build
pub fn initialize_database(conn: &mut Connection) -> Result<(), StorageError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let found = get_current_version(conn)?;
    let latest = latest_version();

    if found > latest {
        return Err(StorageError::Migration(format!(
            "database schema version {} is newer than this build understands ({})",
            found, latest
        )));
    }

    for (index, (label, sql)) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        let target = index as i32 + 1;
        tracing::info!("Applying schema migration {} ({})", target, label);

        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| StorageError::Migration(format!("migration {} failed: {}", target, e)))?;
        tx.execute("DELETE FROM schema_version", [])?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [target])?;
        tx.commit()?;
    }

    Ok(())
}

/// Stored schema version, 0 for a fresh database
pub fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })
        .optional()?
        .flatten();

    Ok(version.unwrap_or(0))
}
