//! `~` expansion for database and config paths.

use std::path::PathBuf;

/// Replace a leading `~` (alone or followed by a separator) with the home dir.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(r) if r.starts_with('/') || r.starts_with('\\') => &r[1..],
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// [`expand_tilde`] as a string, the form stored in `Config::database`.
pub fn expand_db_path(path: &str) -> String {
    expand_tilde(path).to_string_lossy().into_owned()
}
