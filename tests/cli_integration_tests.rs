//! CLI integration tests
//!
//! Exercise the binary end to end with assert_cmd: help output, workbook
//! generation to default and explicit paths, rate overrides, and the
//! rates listing.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fieldbudget() -> Command {
    Command::cargo_bin("fieldbudget").unwrap()
}

#[test]
fn test_cli_help() {
    fieldbudget()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldbudget"))
        .stdout(predicate::str::contains("Inputs & Rates"));
}

#[test]
fn test_cli_version() {
    fieldbudget()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldbudget"));
}

#[test]
fn test_generate_help() {
    fieldbudget()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RATE OVERRIDES"));
}

#[test]
fn test_generate_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("trip.xlsx");

    fieldbudget()
        .args(["generate", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Template written"));

    assert!(output.exists());
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}

#[test]
fn test_generate_default_path_creates_output_dir() {
    let dir = TempDir::new().unwrap();

    fieldbudget()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success();

    assert!(dir.path().join("output/fieldtrip-cost-template.xlsx").exists());
}

#[test]
fn test_generate_overwrites_on_rerun() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("trip.xlsx");

    for _ in 0..2 {
        fieldbudget()
            .args(["generate", "-o"])
            .arg(&output)
            .assert()
            .success();
    }

    assert!(output.exists());
}

#[test]
fn test_generate_with_rate_overrides() {
    let dir = TempDir::new().unwrap();
    let overrides = dir.path().join("overrides.yaml");
    std::fs::write(&overrides, "PER_DIEM: 28\nOVERNIGHT_DEFAULT: 110\n").unwrap();
    let output = dir.path().join("trip.xlsx");

    fieldbudget()
        .args(["generate", "-o"])
        .arg(&output)
        .arg("--rates")
        .arg(&overrides)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overrides: 2"));

    assert!(output.exists());
}

#[test]
fn test_generate_rejects_unknown_override_name() {
    let dir = TempDir::new().unwrap();
    let overrides = dir.path().join("overrides.yaml");
    std::fs::write(&overrides, "PER_DEIM: 28\n").unwrap();

    fieldbudget()
        .args(["generate", "-o"])
        .arg(dir.path().join("trip.xlsx"))
        .arg("--rates")
        .arg(&overrides)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PER_DEIM"));
}

#[test]
fn test_generate_missing_override_file_fails() {
    let dir = TempDir::new().unwrap();

    fieldbudget()
        .args(["generate", "-o"])
        .arg(dir.path().join("trip.xlsx"))
        .args(["--rates", "no/such/file.yaml"])
        .assert()
        .failure();
}

#[test]
fn test_generate_verbose_lists_resolved_rates() {
    let dir = TempDir::new().unwrap();

    fieldbudget()
        .args(["generate", "--verbose", "-o"])
        .arg(dir.path().join("trip.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("PER_DIEM = 24"));
}

#[test]
fn test_rates_yaml_dump_feeds_back_into_generate() {
    let dir = TempDir::new().unwrap();
    let overrides = dir.path().join("overrides.yaml");

    let dump = fieldbudget().args(["rates", "--yaml"]).assert().success();
    std::fs::write(&overrides, &dump.get_output().stdout).unwrap();

    fieldbudget()
        .args(["generate", "-o"])
        .arg(dir.path().join("trip.xlsx"))
        .arg("--rates")
        .arg(&overrides)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overrides: 8"));
}

#[test]
fn test_rates_lists_parameters() {
    fieldbudget()
        .arg("rates")
        .assert()
        .success()
        .stdout(predicate::str::contains("PER_DIEM"))
        .stdout(predicate::str::contains("OVERNIGHT_DEFAULT"))
        .stdout(predicate::str::contains("HIWI_RATE"));
}
