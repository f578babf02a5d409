//! Key-value snapshot store over SQLite.
//!
//! # Responsibility
//! - Model local-storage semantics: one key mapped to one JSON snapshot blob.
//! - Bootstrap the backing schema before any read or write.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A connection whose schema version is newer than this binary supports is
//!   rejected instead of being written to.
//! - An absent key reads as `SnapshotRead::Absent`.

use crate::backend::snapshot::{decode_snapshot, encode_snapshot};
use crate::backend::{BackendError, BackendResult, SnapshotRead, SnapshotStore};
use crate::model::quote::QuoteRecord;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default storage key for the quote snapshot blob.
pub const DEFAULT_QUOTES_KEY: &str = "quotes";

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Snapshot store over one row of a SQLite `kv` table.
#[derive(Debug)]
pub struct KvBackend {
    conn: Connection,
    key: String,
}

impl KvBackend {
    /// Opens a file-backed key-value store under the default quotes key.
    ///
    /// # Side effects
    /// - Bootstraps the schema and emits `kv_open` logging events.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=backend_kv status=start mode=file");

        let conn = Connection::open(path).inspect_err(|err| {
            error!(
                "event=kv_open module=backend_kv status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
        })?;

        Self::bootstrap(conn, started_at, "file")
    }

    /// Opens an in-memory key-value store, used by tests and demos.
    pub fn open_in_memory() -> BackendResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=backend_kv status=start mode=memory");

        let conn = Connection::open_in_memory().inspect_err(|err| {
            error!(
                "event=kv_open module=backend_kv status=error mode=memory duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
        })?;

        Self::bootstrap(conn, started_at, "memory")
    }

    /// Overrides the storage key; defaults to [`DEFAULT_QUOTES_KEY`].
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    fn bootstrap(conn: Connection, started_at: Instant, mode: &str) -> BackendResult<Self> {
        match apply_schema(&conn) {
            Ok(()) => {
                info!(
                    "event=kv_open module=backend_kv status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn,
                    key: DEFAULT_QUOTES_KEY.to_string(),
                })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=backend_kv status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn apply_schema(conn: &Connection) -> BackendResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if current > SCHEMA_VERSION {
        return Err(BackendError::Corrupt(format!(
            "kv schema version {current} is newer than supported {SCHEMA_VERSION}"
        )));
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}

impl SnapshotStore for KvBackend {
    fn read(&mut self) -> BackendResult<SnapshotRead> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1;",
                params![self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            info!(
                "event=snapshot_read module=backend_kv status=absent key={}",
                self.key
            );
            return Ok(SnapshotRead::Absent);
        };

        let quotes = decode_snapshot(&raw).inspect_err(|err| {
            error!(
                "event=snapshot_read module=backend_kv status=corrupt key={} error={}",
                self.key, err
            );
        })?;

        info!(
            "event=snapshot_read module=backend_kv status=ok key={} count={}",
            self.key,
            quotes.len()
        );
        Ok(SnapshotRead::Loaded(quotes))
    }

    fn write(&mut self, quotes: &[QuoteRecord]) -> BackendResult<()> {
        let encoded = encode_snapshot(quotes)?;

        let result = self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![self.key.as_str(), encoded.as_str()],
        );

        match result {
            Ok(_) => {
                info!(
                    "event=snapshot_write module=backend_kv status=ok key={} count={}",
                    self.key,
                    quotes.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_write module=backend_kv status=error key={} error={}",
                    self.key, err
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KvBackend, DEFAULT_QUOTES_KEY, SCHEMA_VERSION};
    use crate::backend::{BackendError, SnapshotRead, SnapshotStore};
    use crate::model::quote::QuoteRecord;

    #[test]
    fn absent_key_reads_as_absent() {
        let mut backend = KvBackend::open_in_memory().unwrap();
        assert_eq!(backend.read().unwrap(), SnapshotRead::Absent);
    }

    #[test]
    fn write_then_read_returns_equal_collection() {
        let mut backend = KvBackend::open_in_memory().unwrap();

        let quotes = vec![
            QuoteRecord::new("first").unwrap(),
            QuoteRecord::new("second").unwrap(),
        ];
        backend.write(&quotes).unwrap();

        assert_eq!(backend.read().unwrap(), SnapshotRead::Loaded(quotes));
    }

    #[test]
    fn rewrite_replaces_previous_snapshot() {
        let mut backend = KvBackend::open_in_memory().unwrap();

        backend
            .write(&[QuoteRecord::new("old").unwrap()])
            .unwrap();
        let replacement = vec![QuoteRecord::new("new").unwrap()];
        backend.write(&replacement).unwrap();

        assert_eq!(backend.read().unwrap(), SnapshotRead::Loaded(replacement));
    }

    #[test]
    fn keys_are_isolated() {
        let mut quotes_store = KvBackend::open_in_memory().unwrap();
        assert_eq!(quotes_store.key, DEFAULT_QUOTES_KEY);

        quotes_store = quotes_store.with_key("other");
        quotes_store
            .write(&[QuoteRecord::new("elsewhere").unwrap()])
            .unwrap();

        let mut default_view = quotes_store.with_key(DEFAULT_QUOTES_KEY);
        assert_eq!(default_view.read().unwrap(), SnapshotRead::Absent);
    }

    #[test]
    fn corrupt_stored_value_reports_corrupt() {
        let mut backend = KvBackend::open_in_memory().unwrap();
        backend
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, 'not json');",
                [DEFAULT_QUOTES_KEY],
            )
            .unwrap();

        assert!(matches!(
            backend.read().unwrap_err(),
            BackendError::Corrupt(_)
        ));
    }

    #[test]
    fn newer_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.sqlite3");

        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION + 1))
                .unwrap();
        }

        assert!(matches!(
            KvBackend::open(&path).unwrap_err(),
            BackendError::Corrupt(_)
        ));
    }
}
