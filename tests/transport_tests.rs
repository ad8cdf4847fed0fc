//! Integration tests for the line transport, driven through the public API
//! against the scripted mock port.

use envmon::port::{MockPort, SerialIo, Step};
use envmon::transport::{parse_fields, LineTransport};
use pretty_assertions::assert_eq;

fn transport(steps: Vec<Step>) -> LineTransport<MockPort> {
    let mut port = MockPort::new("MOCK0");
    port.script(steps);
    LineTransport::new(port)
}

#[test]
fn command_bytes_written_verbatim() {
    let mut t = transport(vec![]);
    for b in [b'M', b'V', b'A', 0x00, 0xFF] {
        t.send_command(b).unwrap();
    }
    assert_eq!(
        t.port().write_log(),
        vec![
            vec![b'M'],
            vec![b'V'],
            vec![b'A'],
            vec![0x00],
            vec![0xFF]
        ]
    );
}

#[test]
fn crlf_line_is_returned_without_terminators() {
    let mut t = transport(vec![Step::Bytes(b"12.5,60\r\n".to_vec())]);
    assert_eq!(t.read_line(), Some("12.5,60".to_string()));
}

#[test]
fn embedded_carriage_returns_are_stripped() {
    let mut t = transport(vec![Step::Bytes(b"12\r.5\r,60\r\n".to_vec())]);
    assert_eq!(t.read_line(), Some("12.5,60".to_string()));
}

#[test]
fn three_idle_windows_yield_no_line() {
    let mut t = transport(vec![Step::Idle, Step::Idle, Step::Idle]);
    assert_eq!(t.read_line(), None);
}

#[test]
fn slow_line_with_short_gaps_still_completes() {
    // "12" [idle] ".5,60" [idle] "\n" — never 3 consecutive idle windows.
    let mut t = transport(vec![
        Step::Bytes(b"12".to_vec()),
        Step::Idle,
        Step::Bytes(b".5,60".to_vec()),
        Step::Idle,
        Step::Bytes(b"\n".to_vec()),
    ]);
    assert_eq!(t.read_line(), Some("12.5,60".to_string()));
}

#[test]
fn abandoned_partial_never_leaks_into_next_line() {
    let mut t = transport(vec![
        Step::Bytes(b"99.9".to_vec()),
        Step::Idle,
        Step::Idle,
        Step::Idle,
        Step::Bytes(b"20.0,50\n".to_vec()),
    ]);
    assert_eq!(t.read_line(), None);
    assert_eq!(t.read_line(), Some("20.0,50".to_string()));
}

#[test]
fn stale_buffered_bytes_are_flushed_per_call() {
    let mut t = transport(vec![Step::Bytes(b"fresh,2\n".to_vec())]);
    t.port_mut().buffer_stale(b"stale,1\n");
    assert_eq!(t.read_line(), Some("fresh,2".to_string()));
    assert_eq!(t.port().discard_count(), 1);
}

#[test]
fn hard_read_error_looks_like_timeout_to_the_caller() {
    let mut silent = transport(vec![Step::Idle, Step::Idle, Step::Idle]);
    let mut broken = transport(vec![Step::Bytes(b"12.".to_vec()), Step::ReadError]);
    assert_eq!(silent.read_line(), broken.read_line());
}

#[test]
fn write_failure_leaves_transport_usable() {
    let mut t = transport(vec![Step::Bytes(b"ok\n".to_vec())]);
    t.port_mut().fail_next_write();
    assert!(t.send_command(b'M').is_err());
    assert!(t.send_command(b'M').is_ok());
    assert_eq!(t.read_line(), Some("ok".to_string()));
}

#[test]
fn parse_fields_contract() {
    assert_eq!(parse_fields("12.5,60"), vec!["12.5", "60"]);
    assert_eq!(parse_fields("12.5"), vec!["12.5"]);
    assert_eq!(parse_fields(""), Vec::<&str>::new());
    assert_eq!(parse_fields("a,b,c"), vec!["a", "b", "c"]);
}

#[test]
fn bare_newline_is_an_empty_complete_line() {
    let mut t = transport(vec![Step::Bytes(b"\n".to_vec())]);
    let line = t.read_line();
    assert_eq!(line, Some(String::new()));
    assert_eq!(parse_fields(line.as_deref().unwrap()), Vec::<&str>::new());
}
