//! Real serial port session backed by the `serialport` crate.
//!
//! Opening a session puts the port in raw mode: 8N1 framing, no flow
//! control, non-canonical input with a fixed idle timeout. This is the
//! crate-level equivalent of the classic termios `VMIN=0`/`VTIME`
//! configuration: a read blocks until at least one byte arrives or the
//! idle timeout elapses, then returns with whatever was read.

use super::error::PortError;
use super::traits::{PortSettings, ReadByte, SerialIo};
use std::io::{Read, Write};
use tracing::debug;

/// An exclusively-owned, configured serial handle.
///
/// The handle is either open and fully configured or closed; a failure
/// anywhere in `open` never hands back a half-configured session. The OS
/// handle is released exactly once, on `close()` or on drop.
pub struct PortSession {
    /// The underlying handle; `None` once closed.
    port: Option<Box<dyn serialport::SerialPort>>,
    /// The device path, kept for diagnostics.
    path: String,
}

impl PortSession {
    /// Open and configure a serial port.
    ///
    /// # Errors
    ///
    /// - [`PortError::Open`] if the path cannot be opened
    /// - [`PortError::Configure`] if the idle timeout cannot be committed
    pub fn open(path: &str, settings: PortSettings) -> Result<Self, PortError> {
        let mut port = serialport::new(path, settings.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|e| PortError::open(path, e))?;

        port.set_timeout(settings.idle_timeout)
            .map_err(PortError::Configure)?;

        debug!(path, baud = settings.baud_rate, "serial port opened");

        Ok(Self {
            port: Some(port),
            path: path.to_string(),
        })
    }

    /// Open with default settings (9600 baud, 1 s idle timeout).
    pub fn open_default(path: &str) -> Result<Self, PortError> {
        Self::open(path, PortSettings::default())
    }

    /// Release the OS handle. Idempotent: a second call is a no-op.
    pub fn close(&mut self) {
        if let Some(port) = self.port.take() {
            debug!(path = %self.path, "serial port closed");
            drop(port);
        }
    }

    /// Whether the session still holds an open handle.
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn serialport::SerialPort>, PortError> {
        self.port.as_mut().ok_or(PortError::NotOpen)
    }
}

impl SerialIo for PortSession {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let port = self.port_mut()?;
        let n = port.write(data)?;
        port.flush()?;
        Ok(n)
    }

    fn read_byte(&mut self) -> ReadByte {
        let port = self.port_mut()?;
        let mut buf = [0u8; 1];
        match port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            // The serialport crate reports an elapsed timeout as TimedOut
            // (WouldBlock on some platforms); both mean "idle window, no data".
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(None)
            }
            Err(e) => Err(PortError::Io(e)),
        }
    }

    fn discard_input(&mut self) -> Result<(), PortError> {
        self.port_mut()?
            .clear(serialport::ClearBuffer::Input)
            .map_err(|e| PortError::Io(std::io::Error::from(e)))
    }

    fn name(&self) -> &str {
        &self.path
    }
}

impl Drop for PortSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PortSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortSession")
            .field("path", &self.path)
            .field("open", &self.port.is_some())
            .finish()
    }
}
