use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::DateTime;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTAL ITEMS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
    println!("{}• Total items:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) CREATION RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM todos ORDER BY id ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT created_at FROM todos ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |v: Option<String>| match v {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or(raw),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Created:{}", CYAN, RESET);
    println!("    first: {}", fmt(first));
    println!("    last:  {}", fmt(last));

    //
    // 4) LOG SIZE
    //
    let log_count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log entries:{} {}", CYAN, RESET, log_count);

    println!();
    Ok(())
}
