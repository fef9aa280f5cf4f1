use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("advisor")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("session"));
}

#[test]
fn test_chat_help_shows_flags() {
    cargo_bin_cmd!("advisor")
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--html"))
        .stdout(predicate::str::contains("--resume"))
        .stdout(predicate::str::contains("--no-save"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("advisor")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("advisor"));
}
