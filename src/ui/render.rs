//! List-item renderer.
//!
//! ```text
//! #3  Buy milk and
//!     bread
//!             Created at 19/10/2026 08:15:02
//! ```

use crate::config::Config;
use crate::models::Todo;
use crate::utils::colors::{BOLD, RESET, dim};
use crate::utils::formatting::pad_left;
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_format: crate::config::DEFAULT_DATE_FORMAT.to_string(),
            width: crate::config::DEFAULT_WRAP_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            date_format: cfg.date_format.clone(),
            width: cfg.wrap_width.max(MIN_WIDTH),
        }
    }
}

pub fn render_item(todo: &Todo, opts: &RenderOptions) -> String {
    let tag = format!("#{}", todo.id);
    let gutter = tag.width() + 2;
    let indent = " ".repeat(gutter);

    let mut out = String::new();
    let lines = textwrap::wrap(&todo.title, opts.width);

    if lines.iter().all(|l| l.trim().is_empty()) {
        out.push_str(&format!("{}  {}\n", dim(&tag), dim("(empty)")));
    } else {
        for (i, l) in lines.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!("{}  {BOLD}{l}{RESET}\n", dim(&tag)));
            } else {
                out.push_str(&format!("{indent}{BOLD}{l}{RESET}\n"));
            }
        }
    }

    let created = format!("Created at {}", todo.created_at_str(&opts.date_format));
    out.push_str(&dim(&pad_left(&created, gutter + opts.width)));
    out.push('\n');

    out
}

pub fn render_list(todos: &[Todo], opts: &RenderOptions) -> String {
    if todos.is_empty() {
        return format!("{}\n", dim("No items yet."));
    }

    todos
        .iter()
        .map(|t| render_item(t, opts))
        .collect::<Vec<_>>()
        .join("\n")
}
