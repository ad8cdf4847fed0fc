//! Mock serial port for testing the line transport without hardware.
//!
//! The mock is driven by a script of [`Step`]s: bytes to deliver, idle
//! windows (an elapsed read timeout with no data), and hard read errors.
//! Writes are logged for verification.

use super::error::PortError;
use super::traits::{ReadByte, SerialIo};
use std::collections::VecDeque;

/// One step of a scripted device feed.
#[derive(Debug, Clone)]
pub enum Step {
    /// Deliver these bytes, one per `read_byte` call.
    Bytes(Vec<u8>),
    /// One idle window: the read timeout elapses with no data.
    Idle,
    /// A hard read error (not a timeout).
    ReadError,
}

/// Scripted mock implementing [`SerialIo`].
///
/// # Example
/// ```
/// use envmon::port::{MockPort, SerialIo, Step};
///
/// let mut port = MockPort::new("MOCK0");
/// port.script([Step::Bytes(b"ok\n".to_vec())]);
///
/// assert_eq!(port.read_byte().unwrap(), Some(b'o'));
/// port.write_bytes(b"M").unwrap();
/// assert_eq!(port.write_log(), vec![b"M".to_vec()]);
/// ```
#[derive(Debug, Default)]
pub struct MockPort {
    name: String,
    /// Pending scripted reads, flattened to one item per `read_byte` call.
    feed: VecDeque<FeedItem>,
    /// Bytes sitting in the "OS buffer" before the next `discard_input`.
    stale: VecDeque<u8>,
    /// Log of all writes, one entry per call.
    writes: Vec<Vec<u8>>,
    /// Count of `discard_input` calls.
    discards: usize,
    /// When set, the next write fails.
    fail_next_write: bool,
}

#[derive(Debug, Clone)]
enum FeedItem {
    Byte(u8),
    Idle,
    Error,
}

impl MockPort {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append steps to the read script.
    pub fn script(&mut self, steps: impl IntoIterator<Item = Step>) {
        for step in steps {
            match step {
                Step::Bytes(bytes) => self.feed.extend(bytes.into_iter().map(FeedItem::Byte)),
                Step::Idle => self.feed.push_back(FeedItem::Idle),
                Step::ReadError => self.feed.push_back(FeedItem::Error),
            }
        }
    }

    /// Place bytes in the simulated OS input buffer. They are dropped by
    /// `discard_input`; if still present when `read_byte` runs, they are
    /// delivered before the script (stale data leaking into a read).
    pub fn buffer_stale(&mut self, bytes: &[u8]) {
        self.stale.extend(bytes);
    }

    /// Make the next `write_bytes` call fail.
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// All writes performed so far, one entry per call.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        self.writes.clone()
    }

    /// Number of `discard_input` calls so far.
    pub fn discard_count(&self) -> usize {
        self.discards
    }

    /// Scripted items not yet consumed.
    pub fn remaining(&self) -> usize {
        self.feed.len()
    }
}

impl SerialIo for MockPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated write failure",
            )));
        }
        self.writes.push(data.to_vec());
        Ok(data.len())
    }

    fn read_byte(&mut self) -> ReadByte {
        if let Some(b) = self.stale.pop_front() {
            return Ok(Some(b));
        }
        match self.feed.pop_front() {
            Some(FeedItem::Byte(b)) => Ok(Some(b)),
            Some(FeedItem::Idle) => Ok(None),
            Some(FeedItem::Error) => Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated read failure",
            ))),
            // Script exhausted: behave like a silent device.
            None => Ok(None),
        }
    }

    fn discard_input(&mut self) -> Result<(), PortError> {
        self.stale.clear();
        self.discards += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
