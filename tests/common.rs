#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin.sqlite", name));
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

/// Initialize the DB only (schema, no data)
pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add one event (EV001) with three booked tickets:
///
/// - T001 Bob, checked in on 2025-01-01 and 2025-01-02
/// - T002 alice, checked in on 2025-01-01
/// - T003 Carol, never checked in
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    rti()
        .args([
            "--db",
            db_path,
            "event",
            "add",
            "New Year Conf",
            "--start",
            "2025-01-01",
            "--end",
            "2025-01-02",
            "--published",
        ])
        .assert()
        .success();

    for (name, email) in [
        ("Bob", "bob@example.com"),
        ("alice", "alice@example.com"),
        ("Carol", "carol@example.com"),
    ] {
        rti()
            .args([
                "--db", db_path, "ticket", "book", "--event", "EV001", "--name", name, "--email",
                email,
            ])
            .assert()
            .success();
    }

    for (ticket, day) in [
        ("T001", "2025-01-01"),
        ("T001", "2025-01-02"),
        ("T002", "2025-01-01"),
    ] {
        rti()
            .args(["--db", db_path, "checkin", ticket, "--date", day])
            .assert()
            .success();
    }
}
