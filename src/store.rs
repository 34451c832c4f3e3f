//! Durable item storage over SQLite.
//!
//! One journal is one SQLite file. [`ItemStore::open`] bootstraps the schema
//! on first use and is idempotent on reopen; every operation afterwards runs
//! in its own transaction, so callers get atomic per-call semantics without
//! any cross-call coordination.
//!
//! ## Schema
//!
//! ```sql
//! CREATE TABLE items (
//!     id              INTEGER PRIMARY KEY AUTOINCREMENT,
//!     image           BLOB NOT NULL,   -- normalized 512×512 JPEG
//!     date            TEXT NOT NULL,   -- YYYY-MM-DD
//!     reason          TEXT NOT NULL,
//!     disposal_method TEXT,            -- NULL = not provided
//!     created_at      TEXT NOT NULL    -- RFC 3339, audit only
//! );
//! CREATE INDEX idx_items_date ON items(date);
//! ```
//!
//! ## Consistency contract
//!
//! - `id` is assigned by the engine, strictly increasing, and never reused —
//!   `AUTOINCREMENT` keeps a high-water mark in `sqlite_sequence`, so deleting
//!   the newest record cannot recycle its id.
//! - `add` writes the whole record or nothing; a failed write leaves no
//!   partial row behind.
//! - `delete` is idempotent: a missing id is a successful no-op, only an
//!   engine-level abort is an error.
//! - `list_all` reads a single snapshot (one SELECT, one read transaction).
//! - Drafts are re-validated here before any SQL runs, even though the caller
//!   validates first.

use crate::item::{Item, ItemDraft, ValidationError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::{error, info};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS items (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    image           BLOB NOT NULL,
    date            TEXT NOT NULL,
    reason          TEXT NOT NULL,
    disposal_method TEXT,
    created_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_items_date ON items(date);
";

const ITEM_SELECT_SQL: &str =
    "SELECT id, image, date, reason, disposal_method, created_at FROM items";

#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying engine could not be opened or bootstrapped.
    #[error("failed to open item store: {0}")]
    Open(#[source] rusqlite::Error),
    /// A write transaction aborted; no partial record was persisted.
    #[error("item store write failed: {0}")]
    Write(#[source] rusqlite::Error),
    /// A read transaction aborted, or a stored row no longer parses.
    #[error("item store read failed: {0}")]
    Read(#[source] rusqlite::Error),
    /// The draft violated an item invariant; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Handle to one open journal. Owns the connection; drop closes it.
pub struct ItemStore {
    conn: Connection,
}

impl ItemStore {
    /// Open (or create) the journal at `path`.
    ///
    /// Creates the `items` table and date index on first use; reopening an
    /// existing journal is idempotent and leaves stored data untouched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let started = Instant::now();
        let conn = Connection::open(path).map_err(|err| open_failed("file", started, err))?;
        Self::bootstrap(conn, "file", started)
    }

    /// Open an ephemeral in-memory journal with identical semantics.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let started = Instant::now();
        let conn = Connection::open_in_memory().map_err(|err| open_failed("memory", started, err))?;
        Self::bootstrap(conn, "memory", started)
    }

    fn bootstrap(conn: Connection, mode: &str, started: Instant) -> Result<Self, StoreError> {
        let result: rusqlite::Result<()> = (|| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.execute_batch(SCHEMA_SQL)
        })();
        match result {
            Ok(()) => {
                info!(
                    "event=store_open module=store status=ok mode={} duration_ms={}",
                    mode,
                    started.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => Err(open_failed(mode, started, err)),
        }
    }

    /// Persist a draft and return the assigned id.
    ///
    /// The record becomes visible to readers only once the insert commits; a
    /// failed insert creates nothing.
    pub fn add(&self, draft: &ItemDraft) -> Result<i64, StoreError> {
        draft.validate()?;

        let created_at = Utc::now();
        self.conn
            .execute(
                "INSERT INTO items (image, date, reason, disposal_method, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    draft.image,
                    draft.date.format("%Y-%m-%d").to_string(),
                    draft.reason,
                    draft.disposal_method,
                    created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ],
            )
            .map_err(StoreError::Write)?;

        let id = self.conn.last_insert_rowid();
        info!(
            "event=item_add module=store status=ok id={} bytes={}",
            id,
            draft.image.len()
        );
        Ok(id)
    }

    /// Delete the record with `id`, if any.
    ///
    /// Deleting a missing id is a successful no-op; only an engine-level
    /// abort surfaces as an error.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(StoreError::Write)?;
        info!(
            "event=item_delete module=store status=ok id={} existed={}",
            id,
            changed > 0
        );
        Ok(())
    }

    /// Return every current item, unordered, as one consistent snapshot.
    pub fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(ITEM_SELECT_SQL).map_err(StoreError::Read)?;
        let rows = stmt
            .query_map([], parse_item_row)
            .map_err(StoreError::Read)?;
        rows.collect::<rusqlite::Result<Vec<Item>>>()
            .map_err(StoreError::Read)
    }

    /// Number of stored items.
    pub fn count(&self) -> Result<u64, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .map_err(StoreError::Read)?;
        Ok(n as u64)
    }
}

fn open_failed(mode: &str, started: Instant, err: rusqlite::Error) -> StoreError {
    error!(
        "event=store_open module=store status=error mode={} duration_ms={} error={}",
        mode,
        started.elapsed().as_millis(),
        err
    );
    StoreError::Open(err)
}

/// Map a SELECT row back to an [`Item`], rejecting rows that no longer parse
/// instead of masking them.
fn parse_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    let date_text: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;

    let created_text: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;

    Ok(Item {
        id: row.get(0)?,
        image: row.get(1)?,
        date,
        reason: row.get(3)?,
        disposal_method: row.get(4)?,
        created_at,
    })
}
