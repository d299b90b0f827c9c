//! SQLite store handle (lightweight, one connection per process).

use rusqlite::{Connection, Result};
use std::path::Path;

/// Explicitly constructed store handle.
///
/// Opened once at startup, handed to the DAO, and closed with [`DbPool::close`]
/// when the screen is torn down.
pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Close the underlying connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)
    }
}
