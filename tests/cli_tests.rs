//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::write_config;

fn fillwatch() -> Command {
    let mut cmd = cargo_bin_cmd!("fillwatch");
    cmd.env_remove("FILLWATCH_WALLETS")
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("TELEGRAM_CHAT_ID");
    cmd
}

#[test]
fn test_help() {
    fillwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    fillwatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fillwatch"));
}

#[test]
fn check_config_reports_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
wallets = ["0xAAA", "0xbbb"]

[telegram]
enabled = true
"#,
    );

    fillwatch()
        .current_dir(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .env("TELEGRAM_BOT_TOKEN", "123:abc")
        .env("TELEGRAM_CHAT_ID", "-100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Wallets"))
        .stdout(predicate::str::contains("• 0xaaa"))
        .stdout(predicate::str::contains("• 0xbbb"))
        .stdout(predicate::str::contains("Telegram configured and enabled"));
}

#[test]
fn check_config_fails_without_wallets() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[delivery]\nspacing_ms = 100\n");

    fillwatch()
        .current_dir(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field: wallets"));
}

#[test]
fn check_config_fails_when_telegram_secrets_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "wallets = [\"0xabc\"]\n\n[telegram]\nenabled = true\n",
    );

    fillwatch()
        .current_dir(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn run_fails_fast_on_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    fillwatch()
        .current_dir(dir.path())
        .args(["run", "--config", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
