use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    info("Initializing rTodo…");
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    for step in run_pending_migrations(&conn)? {
        success(format!("Migration applied: {}", step));
    }

    log::ttlog_soft(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}
