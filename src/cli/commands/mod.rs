pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod shell;

use crate::config::Config;
use crate::core::TodoScreen;
use crate::db::{DbPool, SqliteTodoDao};
use crate::errors::{AppError, AppResult};

/// Open the configured store, start the screen and load the list.
pub fn open_screen(cfg: &Config) -> AppResult<TodoScreen> {
    let pool = DbPool::new(&cfg.database)?;
    let dao = SqliteTodoDao::open(pool)?;

    let mut screen = TodoScreen::new(Box::new(dao))?;
    screen.load()?;
    Ok(screen)
}

/// Parse a user supplied item id; a leading `#` is accepted.
pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .trim_start_matches('#')
        .parse::<i64>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}
