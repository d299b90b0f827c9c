//! Formatting utilities used for CLI outputs.
//! Widths are measured in terminal columns, not bytes.

use unicode_width::UnicodeWidthStr;

pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

/// Cut `s` to at most `width` columns, ending with `…` when shortened.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
