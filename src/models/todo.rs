use chrono::{DateTime, Local};
use serde::Serialize;

/// One stored to-do item.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,                     // ⇔ todos.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub title: String,               // ⇔ todos.title (TEXT NOT NULL)
    pub created_at: DateTime<Local>, // ⇔ todos.created_at (TEXT, RFC 3339)
}

impl Todo {
    pub fn new(id: i64, title: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at,
        }
    }

    /// Copy of this record with a different title; `id` and `created_at` are kept.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            created_at: self.created_at,
        }
    }

    pub fn created_at_str(&self, pattern: &str) -> String {
        self.created_at.format(pattern).to_string()
    }
}
