//! Data access object for the `todos` table.

use crate::db::log::ttlog_soft;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Todo;
use chrono::{DateTime, Local};
use rusqlite::{Result, Row, params};

/// The four operations the screen needs from the store.
///
/// `update` and `delete` match on `todo.id` only and return the number of
/// affected rows: 0 when the id does not exist, never an error.
pub trait TodoDao {
    fn list_all(&self) -> AppResult<Vec<Todo>>;
    fn insert(&self, title: &str) -> AppResult<()>;
    fn update(&self, todo: &Todo) -> AppResult<usize>;
    fn delete(&self, todo: &Todo) -> AppResult<usize>;

    /// Release the store handle. Called once, from the worker, at teardown.
    fn close(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

pub fn map_row(row: &Row) -> Result<Todo> {
    let raw: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

    Ok(Todo {
        id: row.get("id")?,
        title: row.get("title")?,
        created_at,
    })
}

/// SQLite implementation backed by an explicitly opened [`DbPool`].
pub struct SqliteTodoDao {
    pool: DbPool,
}

impl SqliteTodoDao {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Wrap `pool` after bringing its schema up to date.
    pub fn open(pool: DbPool) -> AppResult<Self> {
        run_pending_migrations(&pool.conn)?;
        Ok(Self::new(pool))
    }
}

impl TodoDao for SqliteTodoDao {
    fn list_all(&self) -> AppResult<Vec<Todo>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT id, title, created_at FROM todos ORDER BY id ASC")?;

        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn insert(&self, title: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();

        self.pool.conn.execute(
            "INSERT INTO todos (title, created_at) VALUES (?1, ?2)",
            params![title, now],
        )?;

        let id = self.pool.conn.last_insert_rowid();
        ttlog_soft(&self.pool.conn, "add", &format!("#{id}"), title);
        Ok(())
    }

    fn update(&self, todo: &Todo) -> AppResult<usize> {
        let n = self.pool.conn.execute(
            "UPDATE todos SET title = ?1 WHERE id = ?2",
            params![todo.title, todo.id],
        )?;

        if n > 0 {
            ttlog_soft(
                &self.pool.conn,
                "edit",
                &format!("#{}", todo.id),
                &todo.title,
            );
        }
        Ok(n)
    }

    fn delete(&self, todo: &Todo) -> AppResult<usize> {
        let n = self
            .pool
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", [todo.id])?;

        if n > 0 {
            ttlog_soft(
                &self.pool.conn,
                "del",
                &format!("#{}", todo.id),
                &todo.title,
            );
        }
        Ok(n)
    }

    fn close(self: Box<Self>) -> AppResult<()> {
        self.pool.close()?;
        Ok(())
    }
}
