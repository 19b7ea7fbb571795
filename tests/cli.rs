use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("interests"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_interests_prints_taxonomy() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.arg("interests")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technology"))
        .stdout(predicate::str::contains("Art and Culture"));
}

#[test]
fn test_schema_emits_json() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Config\""));
}

#[test]
fn test_run_requires_interests() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.args([
        "run",
        "--city",
        "Oslo",
        "--from",
        "2026-03-01",
        "--to",
        "2026-03-03",
    ])
    .assert()
    .failure();
}

#[test]
fn test_run_rejects_reversed_date_range() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.args([
        "run",
        "--city",
        "Oslo",
        "--interests",
        "jazz",
        "--from",
        "2026-03-05",
        "--to",
        "2026-03-03",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("must not be after"));
}

#[test]
fn test_dry_run_needs_no_api_key() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.env_remove("GOOGLE_API_KEY")
        .args([
            "run",
            "--city",
            "Oslo",
            "--interests",
            "jazz,museums",
            "--from",
            "2026-03-01",
            "--to",
            "2026-03-03",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution Plan"))
        .stdout(predicate::str::contains("jazz"));
}
