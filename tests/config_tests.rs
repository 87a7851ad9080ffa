mod support;

use fillwatch::error::{ConfigError, Error};
use fillwatch::infrastructure::config::settings::Config;

use support::write_config;

#[test]
fn config_loads_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
wallets = ["0xAAA", "0xbbb", "0xaaa"]
dry_run = true

[stream]
ws_url = "wss://example.invalid/ws"
subscribe_positions = true
subscribe_delay_ms = 10
closed_backoff_ms = 1000
error_backoff_ms = 2000
ping_interval_secs = 30

[delivery]
spacing_ms = 500

[store]
dir = "/var/lib/fillwatch"

[telegram]
enabled = false
notify_startup = true

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert!(config.dry_run);
    assert!(config.stream.subscribe_positions);
    assert_eq!(config.stream.ws_url, "wss://example.invalid/ws");
    assert_eq!(config.delivery.spacing_ms, 500);
    assert!(config.telegram.notify_startup);
    assert_eq!(config.logging.format, "json");

    let policy = config.stream.session_policy();
    assert_eq!(policy.subscribe_delay.as_millis(), 10);
    assert_eq!(policy.closed_backoff.as_millis(), 1000);
    assert_eq!(policy.error_backoff.as_millis(), 2000);
    assert_eq!(config.stream.ping_interval().as_secs(), 30);
}

#[test]
fn config_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn config_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "wallets = [\"0xabc\"\n[stream");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_rejects_zero_ping_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
wallets = ["0xabc"]

[stream]
ping_interval_secs = 0
"#,
    );
    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "ping_interval_secs",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid ping interval error, got {err}"),
        Ok(_) => panic!("Expected zero ping interval to be rejected"),
    }
}

#[test]
fn read_defers_validation_for_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
wallets = ["0xabc"]

[telegram]
enabled = true
api_url = "https://api.telegram.org"
"#,
    );

    let mut config = Config::read(&path).unwrap();
    config.dry_run = true;
    assert!(config.validate().is_ok());
}
