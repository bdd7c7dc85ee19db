use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_commands_and_flags() {
    cargo_bin_cmd!("prism")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("emulator-host"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("prism")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("vars"))
        .stdout(predicate::str::contains("home"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("prism")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
