//! SQLite backend for the remote record store.
//!
//! Timestamps are stored as INTEGER nanoseconds since the epoch so the
//! last-write-wins comparison happens in SQL at full precision.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, error};

use crate::errors::{LockVaultError, Result};
use crate::record::RecordKind;

use super::repository::{RecordDeleter, RecordReader, RecordUpserter, StoredRecord};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS user_data (
        data_id     TEXT PRIMARY KEY,
        user_id     TEXT NOT NULL,
        data        TEXT NOT NULL CHECK (length(data) > 0),
        data_type   TEXT NOT NULL CHECK (data_type IN
                        ('LoginPasswordData', 'TextData', 'BankCardData', 'BinaryData')),
        created_at  INTEGER NOT NULL,
        modified_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_user_data_user ON user_data(user_id);";

/// Thread-safe SQLite record store.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| storage("open", e))?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(|e| storage("pragma", e))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| storage("open", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(|e| storage("schema", e))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| LockVaultError::Storage(format!("lock poisoned: {e}")))
    }

    /// Run `apply` for each row inside one transaction, committing only
    /// if every statement succeeds.
    fn in_transaction<F>(&self, op: &str, rows: &[Row<'_>], apply: F) -> Result<()>
    where
        F: Fn(&Transaction<'_>, &Row<'_>) -> rusqlite::Result<usize>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| storage("begin transaction", e))?;

        for row in rows {
            if let Err(e) = apply(&tx, row) {
                error!(op, data_id = %row.record.data_id, error = %e, "statement failed, rolling back");
                if let Err(rb) = tx.rollback() {
                    error!(op, error = %rb, "rollback failed");
                }
                return Err(storage(op, e));
            }
        }

        tx.commit().map_err(|e| storage("commit", e))?;
        debug!(op, records = rows.len(), "batch committed");
        Ok(())
    }
}

/// A record with its timestamps converted to nanoseconds.
struct Row<'a> {
    record: &'a StoredRecord,
    created_at: i64,
    modified_at: i64,
}

impl<'a> Row<'a> {
    /// Convert a whole batch up front so a transaction never starts with
    /// a timestamp SQLite cannot hold.
    fn batch(records: &'a [StoredRecord]) -> Result<Vec<Self>> {
        records
            .iter()
            .map(|record| {
                Ok(Self {
                    record,
                    created_at: nanos(&record.created_at, &record.data_id)?,
                    modified_at: nanos(&record.modified_at, &record.data_id)?,
                })
            })
            .collect()
    }
}

impl RecordUpserter for SqliteRepository {
    fn upsert(&self, records: &[StoredRecord]) -> Result<()> {
        let rows = Row::batch(records)?;
        self.in_transaction("upsert", &rows, |tx, row| {
            let record = row.record;
            tx.execute(
                "INSERT INTO user_data (data_id, user_id, data, data_type, created_at, modified_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (data_id) DO UPDATE SET
                     data = excluded.data,
                     modified_at = excluded.modified_at
                 WHERE user_data.modified_at < excluded.modified_at
                   AND user_data.user_id = excluded.user_id",
                params![
                    record.data_id,
                    record.owner_id,
                    record.data,
                    record.data_type.as_str(),
                    row.created_at,
                    row.modified_at
                ],
            )
        })
    }
}

impl RecordDeleter for SqliteRepository {
    fn delete(&self, records: &[StoredRecord]) -> Result<()> {
        let rows = Row::batch(records)?;
        self.in_transaction("delete", &rows, |tx, row| {
            tx.execute(
                "DELETE FROM user_data
                 WHERE data_id = ?1 AND user_id = ?2 AND modified_at < ?3",
                params![row.record.data_id, row.record.owner_id, row.modified_at],
            )
        })
    }
}

impl RecordReader for SqliteRepository {
    fn read(&self, owner_id: &str) -> Result<Vec<StoredRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT data_id, user_id, data, data_type, created_at, modified_at
                 FROM user_data
                 WHERE user_id = ?1
                 ORDER BY data_id",
            )
            .map_err(|e| storage("read prepare", e))?;

        let rows = stmt
            .query_map(params![owner_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(|e| storage("read exec", e))?;

        let mut records = Vec::new();
        for row in rows {
            let (data_id, owner_id, data, data_type, created, modified) =
                row.map_err(|e| storage("row parse", e))?;
            records.push(StoredRecord {
                data_id,
                owner_id,
                data,
                data_type: RecordKind::parse(&data_type)?,
                created_at: DateTime::from_timestamp_nanos(created),
                modified_at: DateTime::from_timestamp_nanos(modified),
            });
        }
        Ok(records)
    }
}

fn nanos(ts: &DateTime<Utc>, data_id: &str) -> Result<i64> {
    ts.timestamp_nanos_opt().ok_or_else(|| {
        LockVaultError::Storage(format!("record '{data_id}' timestamp {ts} is out of range"))
    })
}

fn storage(context: &str, err: rusqlite::Error) -> LockVaultError {
    LockVaultError::Storage(format!("{context}: {err}"))
}
