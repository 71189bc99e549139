//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The dashboard calls store methods, it never executes SQL directly.

use crate::error::DashResult;
use rusqlite::Connection;

mod account;
mod artist;
mod catalog;
mod listener;
mod overview;

pub use catalog::{NewContent, NewTrack};

pub struct DashStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl DashStore {
    pub fn open(path: &str) -> DashResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DashResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    pub fn reopen(&self) -> DashResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DashResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_catalog.sql"))?;
        Ok(())
    }

    /// Run `f` inside a single transaction. Rolls back if `f` fails.
    pub fn in_transaction<T>(&self, f: impl FnOnce(&Self) -> DashResult<T>) -> DashResult<T> {
        self.conn.execute_batch("BEGIN")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    log::error!("Rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }
}

// Helper for two-column (name, count) rows.
fn named_count_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<crate::reports::NamedCount> {
    Ok(crate::reports::NamedCount {
        name: row.get(0)?,
        count: row.get(1)?,
    })
}
