//! Hardware tests against a real serial device.
//!
//! These require the monitor board (or a loopback plug) to be attached and
//! are compiled only with the `hardware-tests` feature:
//!
//! ```text
//! ENVMON_TEST_PORT=/dev/ttyACM0 cargo test --features hardware-tests
//! ```
#![cfg(feature = "hardware-tests")]

use envmon::port::{PortSession, PortSettings, SerialIo};
use std::time::{Duration, Instant};

fn test_port() -> String {
    std::env::var("ENVMON_TEST_PORT").unwrap_or_else(|_| "/dev/ttyACM0".to_string())
}

#[test]
fn open_and_close_is_idempotent() {
    let mut session = PortSession::open(&test_port(), PortSettings::default()).unwrap();
    assert!(session.is_open());
    session.close();
    assert!(!session.is_open());
    // Second close is a no-op.
    session.close();
    assert!(!session.is_open());
}

#[test]
fn read_after_close_reports_not_open() {
    let mut session = PortSession::open_default(&test_port()).unwrap();
    session.close();
    assert!(session.read_byte().is_err());
    assert!(session.write_bytes(b"M").is_err());
}

#[test]
fn silent_read_respects_idle_timeout() {
    let settings = PortSettings {
        idle_timeout: Duration::from_millis(200),
        ..PortSettings::default()
    };
    let mut session = PortSession::open(&test_port(), settings).unwrap();
    session.discard_input().unwrap();

    let start = Instant::now();
    let result = session.read_byte().unwrap();
    let elapsed = start.elapsed();

    // With monitoring off the board is silent, so the window must elapse.
    assert_eq!(result, None);
    assert!(elapsed >= Duration::from_millis(150));
    assert!(elapsed < Duration::from_secs(2));
}
