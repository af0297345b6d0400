use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_subcommands() {
    cargo_bin_cmd!("beleza")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("appointments"))
        .stdout(predicate::str::contains("services"))
        .stdout(predicate::str::contains("points"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_appointments_help_shows_subcommands() {
    cargo_bin_cmd!("beleza")
        .args(["appointments", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("cancel"));
}

#[test]
fn test_rate_rejects_missing_arguments() {
    cargo_bin_cmd!("beleza")
        .arg("rate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
