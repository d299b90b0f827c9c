use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database at `db_path` to `dest_file`, optionally zipped.
    ///
    /// Returns the path of the final artifact, or `None` when the user
    /// declined to overwrite an existing file.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists()
            && !force
            && !ask_confirmation(&format!(
                "The file '{}' already exists. Overwrite it?",
                dest.display()
            ))
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        // creating the archive truncates a `.zip` dest: stage the copy beside it
        let zip_path = dest.with_extension("zip");
        let staged = if compress && zip_path == dest {
            staging_path(dest)
        } else {
            dest.to_path_buf()
        };

        fs::copy(src, &staged)?;
        if staged == dest {
            success(format!("Backup created: {}", dest.display()));
        }

        let final_path = if compress {
            let compressed = compress_backup(&staged, &zip_path, &entry_name(src, dest))?;

            if compressed != staged
                && let Err(e) = fs::remove_file(&staged)
            {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        if let Ok(conn) = Connection::open(src) {
            ttlog_soft(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

fn staging_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rtodo".to_string());
    dest.with_file_name(format!(".{}.part", name))
}

/// Name of the database inside the archive: the destination stem with the
/// database's own extension.
fn entry_name(src: &Path, dest: &Path) -> String {
    let ext = src
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sqlite".to_string());
    let stem = dest
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rtodo".to_string());
    format!("{}.{}", stem, ext)
}

/// Compress `staged` into the .zip archive at `zip_path`.
fn compress_backup(staged: &Path, zip_path: &Path, entry: &str) -> AppResult<PathBuf> {
    let mut f = fs::File::open(staged)?;
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path.to_path_buf())
}
