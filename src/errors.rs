//! Unified application error type.
//! All modules (db, core, cli, ui) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing / serialization
    // ---------------------------
    #[error("Invalid item id: {0}")]
    InvalidId(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    // ---------------------------
    // Screen state errors
    // ---------------------------
    #[error("No edit in progress")]
    NoEditInProgress,

    #[error("Item #{0} is being edited: save or cancel first")]
    EditInProgress(i64),

    #[error("Background worker error: {0}")]
    Worker(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
