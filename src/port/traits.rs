//! Core trait and settings for the serial port abstraction.
//!
//! Defines the `SerialIo` trait that allows the real hardware port and a
//! scripted mock to be used interchangeably by the line transport.

use super::error::PortError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration parameters for a serial port session.
///
/// Framing is fixed at 8 data bits, no parity, one stop bit, no flow
/// control; the device side of this protocol speaks nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSettings {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Idle timeout for a single read: a read blocks until at least one
    /// byte arrives or this much silence elapses.
    pub idle_timeout: Duration,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            idle_timeout: Duration::from_secs(1),
        }
    }
}

/// Outcome of a single-byte read attempt.
///
/// `Ok(Some(b))` is a delivered byte, `Ok(None)` means the idle timeout
/// elapsed with no data, and `Err` is a hard I/O failure.
pub type ReadByte = Result<Option<u8>, PortError>;

/// Trait for blocking serial I/O operations.
///
/// Abstracts over the real port (`PortSession`) and the scripted mock
/// (`MockPort`) so the line-reader state machine can be tested without
/// hardware.
pub trait SerialIo: Send + std::fmt::Debug {
    /// Write bytes to the port, returning the number actually written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Attempt to read one byte, waiting at most the configured idle timeout.
    fn read_byte(&mut self) -> ReadByte;

    /// Discard any input the OS has buffered but not yet delivered.
    fn discard_input(&mut self) -> Result<(), PortError>;

    /// Get the name/path of this port.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PortSettings::default();
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.idle_timeout, Duration::from_secs(1));
    }
}
