use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step: a version tag, the SQL to run and the log message.
struct Migration {
    version: &'static str,
    sql: &'static str,
    message: &'static str,
}

/// Ordered list of schema steps. Never reorder or edit an applied entry.
const MIGRATIONS: &[Migration] = &[Migration {
    version: "20260101_0001_create_todos",
    sql: r#"
        CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
        "#,
    message: "Created todos table",
}];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<bool> {
    if is_applied(conn, m.version)? {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.message],
    )?;
    tx.commit()?;

    Ok(true)
}

/// A step applied by [`run_pending_migrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub version: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for Applied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.version, self.message)
    }
}

/// Public entry point: run all pending migrations.
///
/// Nothing is printed here; callers that talk to the user report the
/// returned steps themselves.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<Applied>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if apply(conn, m)? {
            applied.push(Applied {
                version: m.version,
                message: m.message,
            });
        }
    }

    Ok(applied)
}
