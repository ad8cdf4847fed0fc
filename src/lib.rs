//! envmon library
//!
//! Host-side controller for an Arduino-class environmental monitor reached
//! over a serial line. The board accepts single-character commands and
//! reports sensor data as newline-terminated, comma-separated ASCII lines.
//!
//! # Modules
//!
//! - `config`: TOML configuration with environment overrides
//! - `port`: serial port abstraction (real session + scripted mock)
//! - `transport`: command writer and idle-timeout line reader
//! - `console`: interactive menu and display formatting

pub mod config;
pub mod console;
pub mod port;
pub mod transport;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError};
pub use console::{Command, SensorReading};
pub use port::{MockPort, PortError, PortSession, PortSettings, SerialIo, Step};
pub use transport::{parse_fields, LineTransport, MAX_IDLE_WINDOWS};
