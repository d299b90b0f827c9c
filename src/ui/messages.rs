//! Terminal messages: one line, coloured, icon prefixed.

use crate::utils::colors::{BLUE, BOLD, GREEN, MAGENTA, RED, RESET, YELLOW};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_NOTICE: &str = "🔔";

fn line<T: fmt::Display>(color: &str, icon: &str, msg: T) -> String {
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(RED, ICON_ERR, msg));
}

/// Transient confirmation after an update or a delete.
pub fn notice<T: fmt::Display>(msg: T) {
    println!("{}", line(MAGENTA, ICON_NOTICE, msg));
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}", BLUE, BOLD, msg, RESET);
}
