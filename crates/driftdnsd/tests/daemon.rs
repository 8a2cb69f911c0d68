//! Command-line behavior of the driftdnsd binary.
//!
//! These run the real binary but only with configurations that are
//! rejected before any network activity.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn driftdnsd() -> Command {
    let mut cmd = Command::cargo_bin("driftdnsd").unwrap();
    cmd.env_remove("DRIFTDNS_CONFIG");
    cmd.env_remove("DRIFTDNS_LOG_LEVEL");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_help_describes_the_daemon() {
    driftdnsd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--once"))
        .stdout(predicate::str::contains("--log-level"));
}

#[test]
fn test_version_flag() {
    driftdnsd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    driftdnsd()
        .args(["--config", "/nonexistent/driftdns.toml"])
        .assert()
        .code(1);
}

#[test]
fn test_malformed_config_is_a_config_error() {
    let file = config_file("interval = [not toml");

    driftdnsd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1);
}

#[test]
fn test_blank_credentials_are_a_config_error() {
    let file = config_file(
        r#"
        interval = 300

        [user]
        email = "admin@example.com"
        api_key = ""

        [[domains]]
        name = "example.com"
        hosts = ["www"]
        "#,
    );

    driftdnsd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1);
}

#[test]
fn test_zero_interval_is_a_config_error() {
    let file = config_file(
        r#"
        interval = 0

        [user]
        email = "admin@example.com"
        api_key = "cf-key"
        "#,
    );

    driftdnsd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1);
}

#[test]
fn test_unknown_log_level_is_a_config_error() {
    driftdnsd()
        .args(["--log-level", "verbose"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown log level"));
}
