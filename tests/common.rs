#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtd() -> Command {
    cargo_bin_cmd!("rtodo")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtodo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB (test mode, config file untouched)
pub fn init_db(db_path: &str) {
    rtd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add the given titles in order
pub fn init_db_with_items(db_path: &str, titles: &[&str]) {
    init_db(db_path);
    for t in titles {
        rtd()
            .args(["--db", db_path, "add", t])
            .assert()
            .success();
    }
}
