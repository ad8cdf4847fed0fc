//! Line-oriented transport over a serial port.
//!
//! The device speaks a plain byte protocol: the host writes single command
//! bytes (no framing, no acknowledgement) and the device answers with
//! newline-terminated ASCII lines of comma-separated fields. `LineTransport`
//! implements the command-write path and the blocking line reader with its
//! idle-timeout policy; field parsing is a pure helper.

use crate::port::{PortError, SerialIo};
use tracing::{debug, trace, warn};

/// Consecutive idle windows tolerated before a read is abandoned.
///
/// With the 1.0 s idle timeout configured on the port this bounds a silent
/// read to ~3 s, while gaps shorter than one window inside a slowly-arriving
/// line never abort it. Both values are the long-standing field-tested
/// policy; keep them in sync.
pub const MAX_IDLE_WINDOWS: u32 = 3;

/// Line-reader outcome, internal to `read_line`.
#[derive(Debug, PartialEq, Eq)]
enum ReadState {
    Complete,
    TimedOut,
    Error,
}

/// Command writer and line reader over any [`SerialIo`] implementation.
///
/// Stateless apart from the underlying port: every `read_line` call starts
/// from a fresh buffer and discards anything accumulated by a failed
/// previous call.
#[derive(Debug)]
pub struct LineTransport<P: SerialIo> {
    port: P,
}

impl<P: SerialIo> LineTransport<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Write exactly one command byte to the device.
    ///
    /// No acknowledgement is awaited. A failed write leaves the session
    /// open; whether to retry or give up is the caller's decision.
    pub fn send_command(&mut self, byte: u8) -> Result<(), PortError> {
        let n = self.port.write_bytes(&[byte])?;
        if n != 1 {
            return Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "command byte not written",
            )));
        }
        trace!(command = %(byte as char), "command sent");
        Ok(())
    }

    /// Read one newline-terminated line from the device.
    ///
    /// Input buffered before the call is discarded first, so the result
    /// reflects fresh device output rather than a stale earlier response.
    /// Carriage returns are stripped; the terminating line feed is not part
    /// of the returned value. Returns `None` after [`MAX_IDLE_WINDOWS`]
    /// consecutive idle timeouts or on a hard read error; the caller cannot
    /// tell the two apart (the logs can).
    pub fn read_line(&mut self) -> Option<String> {
        if let Err(e) = self.port.discard_input() {
            warn!(port = self.port.name(), error = %e, "failed to flush input");
            return None;
        }

        let mut line = Vec::new();
        let mut idle_windows = 0u32;

        let state = loop {
            match self.port.read_byte() {
                Ok(Some(b'\n')) => break ReadState::Complete,
                Ok(Some(b'\r')) => {
                    idle_windows = 0;
                }
                Ok(Some(b)) => {
                    idle_windows = 0;
                    line.push(b);
                }
                Ok(None) => {
                    idle_windows += 1;
                    if idle_windows >= MAX_IDLE_WINDOWS {
                        break ReadState::TimedOut;
                    }
                }
                Err(e) => {
                    warn!(port = self.port.name(), error = %e, "hard read error");
                    break ReadState::Error;
                }
            }
        };

        match state {
            ReadState::Complete => {
                let line = String::from_utf8_lossy(&line).into_owned();
                trace!(port = self.port.name(), line = %line, "line received");
                Some(line)
            }
            ReadState::TimedOut => {
                debug!(
                    port = self.port.name(),
                    windows = MAX_IDLE_WINDOWS,
                    "no complete line before idle limit"
                );
                None
            }
            ReadState::Error => None,
        }
    }

    /// Borrow the underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the underlying port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Consume the transport and return the port.
    pub fn into_port(self) -> P {
        self.port
    }
}

/// Split a line into its comma-separated fields.
///
/// Pure function, no I/O. No minimum field count is enforced here: an empty
/// line yields no fields and a short line yields a short list, and callers
/// must validate completeness before use.
pub fn parse_fields(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(',').collect()
}
