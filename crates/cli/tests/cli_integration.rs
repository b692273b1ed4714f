//! CLI integration tests for the non-server subcommands.
//!
//! Uses `assert_cmd` to spawn the `activateflow` binary and verify exit
//! codes and output content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn activateflow() -> Command {
    cargo_bin_cmd!("activateflow")
}

#[test]
fn help_exits_0_with_description() {
    activateflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ActivateFlow funnel analytics service",
        ));
}

#[test]
fn version_exits_0() {
    activateflow()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("activateflow"));
}

#[test]
fn recovery_text_output_matches_reference_vector() {
    activateflow()
        .args([
            "recovery",
            "--current-users",
            "1800",
            "--lift-percent",
            "15.0",
            "--revenue",
            "450.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recovered users:     270"))
        .stdout(predicate::str::contains("Revenue recovered:   121500.00"))
        .stdout(predicate::str::contains("New conversion rate: 115.00%"));
}

#[test]
fn recovery_json_output_parses() {
    let output = activateflow()
        .args([
            "--output",
            "json",
            "recovery",
            "--current-users",
            "1800",
            "--lift-percent",
            "15.0",
            "--revenue",
            "450.0",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("recovery output is valid JSON");
    assert_eq!(json["recovered_users"], 270);
    assert_eq!(json["revenue_recovered"], 121500.0);
    assert_eq!(json["new_conversion_rate"], 115.0);
}

#[test]
fn recovery_with_zero_users_reports_zero_rate() {
    activateflow()
        .args([
            "recovery",
            "--current-users",
            "0",
            "--lift-percent",
            "15.0",
            "--revenue",
            "450.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("New conversion rate: 0.00%"));
}

#[test]
fn recovery_rejects_negative_current_users() {
    activateflow()
        .args([
            "recovery",
            "--current-users",
            "-5",
            "--lift-percent",
            "15.0",
            "--revenue",
            "450.0",
        ])
        .assert()
        .failure();
}
