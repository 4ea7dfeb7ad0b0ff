#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lev() -> Command {
    cargo_bin_cmd!("levant")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_levant.sqlite", name));
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

pub const PIN: &str = "1234";

/// Initialize the DB, run setup and add one employee ("Maya", server).
pub fn init_ready_db(db_path: &str) {
    lev()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    lev()
        .args([
            "--db",
            db_path,
            "setup",
            "--email",
            "admin@example.com",
            "--password",
            "hunter2",
            "--pin-code",
            PIN,
        ])
        .assert()
        .success();

    lev()
        .args([
            "--db", db_path, "--pin", PIN, "staff", "add", "--name", "Maya", "--role", "server",
        ])
        .assert()
        .success();
}

/// Add a completed manual shift for Maya on the given date, 09:00-17:00.
pub fn add_shift(db_path: &str, date: &str) {
    lev()
        .args([
            "--db", db_path, "--pin", PIN, "log", "add", "Maya", "--date", date, "--in", "09:00",
            "--out", "17:00", "--reason", "backfill",
        ])
        .assert()
        .success();
}
