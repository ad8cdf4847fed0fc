//! Integration tests for configuration loading.

use envmon::config::Config;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn load_from_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[serial]\nport = \"/dev/ttyUSB7\"\nbaud = 57600\nsettle_ms = 100"
    )
    .unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.serial.port, "/dev/ttyUSB7");
    assert_eq!(config.serial.baud, 57600);
    assert_eq!(config.serial.settle_ms, 100);
    // Unspecified values fall back to defaults.
    assert_eq!(config.serial.idle_timeout_ms, 1000);
}

#[test]
fn load_from_missing_file_is_an_error() {
    let err = Config::load_from("/nonexistent/envmon.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/envmon.toml"));
}

#[test]
fn load_from_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[serial\nport=").unwrap();
    assert!(Config::load_from(file.path()).is_err());
}

#[test]
fn logging_level_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

    std::env::set_var("ENVMON_LOGGING_LEVEL", "trace");
    let config = Config::load_from(file.path()).unwrap();
    std::env::remove_var("ENVMON_LOGGING_LEVEL");

    assert_eq!(config.logging.level, "trace");
}
