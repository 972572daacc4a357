mod common;
use common::{init_db, init_db_with_data, rti, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv", "csv");

    rti()
        .args([
            "--db", &db_path, "export", "--event", "EV001", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Ticket,Attendee Name,Attendee Email,Ticket Type,1 Jan,2 Jan"
    );
    assert_eq!(lines[1], "T002,alice,alice@example.com,Normal,1,0");
    assert_eq!(lines[2], "T001,Bob,bob@example.com,Normal,1,1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_json_force_overwrite() {
    let db_path = setup_test_db("export_json_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_json_force", "json");
    fs::write(&out, "stale").expect("seed file");

    rti()
        .args([
            "--db", &db_path, "export", "--event", "EV001", "--format", "json", "--file", &out,
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("Total Unique Attendees"));
    assert!(content.contains("\"day_1\""));
}

#[test]
fn test_export_xlsx_and_pdf_write_files() {
    let db_path = setup_test_db("export_binary");
    init_db_with_data(&db_path);

    for ext in ["xlsx", "pdf"] {
        let out = temp_out(&format!("export_binary_{ext}"), ext);
        rti()
            .args([
                "--db", &db_path, "export", "--event", "EV001", "--format", ext, "--file", &out,
            ])
            .assert()
            .success();

        let meta = fs::metadata(&out).expect("exported file exists");
        assert!(meta.len() > 0);
    }
}

#[test]
fn test_export_without_checkins_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db(&db_path);

    rti()
        .args([
            "--db", &db_path, "event", "add", "Quiet Day", "--start", "2025-03-01",
        ])
        .assert()
        .success();

    let out = temp_out("export_empty", "csv");
    rti()
        .args([
            "--db", &db_path, "export", "--event", "EV001", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_relative_path_rejected() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "export", "--event", "EV001", "--format", "csv", "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_backup_copy() {
    let db_path = setup_test_db("backup_copy");
    init_db_with_data(&db_path);

    let out = temp_out("backup_copy", "sqlite");
    rti()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success();

    assert!(std::path::Path::new(&out).exists());
}
