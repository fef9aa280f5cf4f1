use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn saved_session() -> serde_json::Value {
    serde_json::json!({
        "schema_version": 1,
        "saved_at": "2026-03-02T10:15:00Z",
        "profile": { "name": "Dana" },
        "entries": [
            { "role": "user", "content": "boots?", "kind": "message" },
            { "role": "assistant", "content": "Try **these**.", "kind": "message" }
        ]
    })
}

#[test]
fn test_session_show_without_file() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("advisor")
        .env("ADVISOR_HOME", home.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved session."));
}

#[test]
fn test_session_show_prints_entries() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("session.json"),
        serde_json::to_string_pretty(&saved_session()).unwrap(),
    )
    .unwrap();

    cargo_bin_cmd!("advisor")
        .env("ADVISOR_HOME", home.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Dana"))
        .stdout(predicate::str::contains("You> boots?"))
        .stdout(predicate::str::contains("Advisor> Try these."));
}

#[test]
fn test_session_show_rejects_unknown_schema() {
    let home = tempdir().unwrap();
    let mut session = saved_session();
    session["schema_version"] = serde_json::json!(7);
    fs::write(home.path().join("session.json"), session.to_string()).unwrap();

    cargo_bin_cmd!("advisor")
        .env("ADVISOR_HOME", home.path())
        .args(["session", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported session schema version 7"));
}

#[test]
fn test_session_clear_removes_file() {
    let home = tempdir().unwrap();
    let path = home.path().join("session.json");
    fs::write(&path, saved_session().to_string()).unwrap();

    cargo_bin_cmd!("advisor")
        .env("ADVISOR_HOME", home.path())
        .args(["session", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared saved session"));

    assert!(!path.exists());
}
