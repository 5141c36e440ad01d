// 🗄️ Record Store - external key-value storage for raw survey records
// The computation core never touches this directly; only the loader reads
// through the `RecordStore` port, which keeps the store swappable in tests.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

// ============================================================================
// STORE PORT
// ============================================================================

/// Read/write port over the external key-value store.
///
/// Reads are the only side effect the pipeline has; writes exist for the
/// import command and for seeding fixtures.
pub trait RecordStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// SQLITE STORE
// ============================================================================

/// SQLite-backed store: one row per record key, raw JSON text as the value.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open store: {:?}", path.as_ref()))?;
        let store = SqliteStore { conn };
        store.setup()?;
        Ok(store)
    }

    /// In-memory store, used by tests and the server's fixture mode.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        let store = SqliteStore { conn };
        store.setup()?;
        Ok(store)
    }

    fn setup(&self) -> Result<()> {
        // WAL keeps concurrent readers (TUI + server) from blocking writes
        self.conn
            .pragma_update(None, "journal_mode", "WAL")
            .context("Failed to enable WAL mode")?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS records (
                    key        TEXT PRIMARY KEY,
                    value      TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )
            .context("Failed to create records table")?;

        Ok(())
    }

    /// Number of records currently stored
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .context("Failed to count records")?;
        Ok(count)
    }

    /// All keys present in the store, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM records ORDER BY key")
            .context("Failed to prepare key listing")?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .context("Failed to list keys")?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl RecordStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read record '{}'", key))?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write record '{}'", key))?;
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE (test double)
// ============================================================================

/// In-process map store for tests and fixtures.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one record, builder style
    pub fn with(self, key: &str, value: &str) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
