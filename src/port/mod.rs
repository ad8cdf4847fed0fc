//! Port abstraction layer for serial communication.
//!
//! Provides the `SerialIo` trait plus the real hardware implementation and
//! a scripted mock, enabling the line transport to be tested without a
//! device attached.

pub mod error;
pub mod mock;
pub mod session;
pub mod traits;

pub use error::PortError;
pub use mock::{MockPort, Step};
pub use session::PortSession;
pub use traits::{PortSettings, ReadByte, SerialIo};
