//! Port-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during serial port operations.
#[derive(Debug, Error)]
pub enum PortError {
    /// The device path could not be opened.
    #[error("failed to open serial port '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: serialport::Error,
    },

    /// The port opened but could not be configured; the session is unusable.
    #[error("failed to configure serial port: {0}")]
    Configure(#[source] serialport::Error),

    /// A hard I/O error during a read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempted to use a session after it was closed.
    #[error("port is not open")]
    NotOpen,
}

impl PortError {
    /// Create an Open error from a path and the underlying serialport error.
    pub fn open(path: impl Into<PathBuf>, source: serialport::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::open(
            "/dev/ttyACM0",
            serialport::Error::new(serialport::ErrorKind::NoDevice, "no such device"),
        );
        assert!(err.to_string().contains("/dev/ttyACM0"));

        let err = PortError::NotOpen;
        assert_eq!(err.to_string(), "port is not open");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: PortError = io.into();
        assert!(matches!(err, PortError::Io(_)));
    }
}
