//! Interactive control panel for the monitor board.
//!
//! Thin presentation glue over the transport contract: maps menu options to
//! command bytes, requests sensor readings, and formats the status panel.
//! Depends only on `send_command`/`read_line`/`parse_fields`.

use crate::port::SerialIo;
use crate::transport::{parse_fields, LineTransport};
use std::io::{BufRead, Write};
use tracing::info;

/// Commands understood by the board firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle periodic sensor monitoring.
    ToggleMonitoring,
    /// Toggle the fan relay.
    ToggleFan,
    /// Toggle the alarm buzzer.
    ToggleAlarm,
}

impl Command {
    /// The raw byte written to the board.
    pub fn byte(self) -> u8 {
        match self {
            Command::ToggleMonitoring => b'M',
            Command::ToggleFan => b'V',
            Command::ToggleAlarm => b'A',
        }
    }
}

/// A parsed temperature/humidity reading.
///
/// The transport enforces no field count, so validation that both fields
/// are present and non-empty happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    pub temperature: String,
    pub humidity: String,
}

impl SensorReading {
    /// Pull temperature and humidity out of a sensor-data line.
    ///
    /// Returns `None` when the line is missing either field.
    pub fn from_line(line: &str) -> Option<Self> {
        let fields = parse_fields(line);
        match fields.as_slice() {
            [temp, hum, ..] if !temp.is_empty() && !hum.is_empty() => Some(Self {
                temperature: temp.to_string(),
                humidity: hum.to_string(),
            }),
            _ => None,
        }
    }
}

/// Menu selections, parsed from one line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Send(Command),
    ReadSensors,
    Quit,
    Invalid,
}

fn parse_choice(input: &str) -> MenuChoice {
    match input.trim() {
        "1" => MenuChoice::Send(Command::ToggleMonitoring),
        "2" => MenuChoice::Send(Command::ToggleFan),
        "3" => MenuChoice::Send(Command::ToggleAlarm),
        "4" => MenuChoice::ReadSensors,
        "0" => MenuChoice::Quit,
        _ => MenuChoice::Invalid,
    }
}

fn render_panel(reading: &SensorReading) -> String {
    format!(
        "\n===============================\n\
         \x20  CURRENT SYSTEM STATUS\n\
         ===============================\n\
         \x20Temperature : {} C\n\
         \x20Humidity    : {} %\n\
         ===============================\n",
        reading.temperature, reading.humidity
    )
}

const MENU: &str = "\n--- CONTROL PANEL ---\n\
                    1. Toggle monitoring (ON/OFF)\n\
                    2. Toggle fan (ON/OFF)\n\
                    3. Toggle alarm (ON/OFF)\n\
                    4. Read sensors (temp/hum)\n\
                    0. Quit\n\
                    Select: ";

/// Run the interactive menu loop until the operator quits or input ends.
///
/// Generic over the input/output streams so the loop is testable with
/// in-memory buffers.
pub fn run_menu<P, R, W>(
    transport: &mut LineTransport<P>,
    input: R,
    mut out: W,
) -> std::io::Result<()>
where
    P: SerialIo,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "{MENU}")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            // EOF on stdin: leave quietly.
            return Ok(());
        };

        match parse_choice(&line) {
            MenuChoice::Send(cmd) => match transport.send_command(cmd.byte()) {
                Ok(()) => {
                    info!(command = ?cmd, "command sent");
                    writeln!(out, ">> Command '{}' sent.", cmd.byte() as char)?;
                }
                Err(e) => writeln!(out, "[ERROR] Command not sent: {e}")?,
            },
            MenuChoice::ReadSensors => {
                writeln!(out, "Reading sensors...")?;
                match transport.read_line() {
                    Some(data) => match SensorReading::from_line(&data) {
                        Some(reading) => write!(out, "{}", render_panel(&reading))?,
                        None => writeln!(out, "[WARN] Incomplete data received: {data}")?,
                    },
                    None => writeln!(
                        out,
                        "[TIMEOUT] No data received. Is monitoring switched on?"
                    )?,
                }
            }
            MenuChoice::Quit => {
                writeln!(out, "Closing connection...")?;
                return Ok(());
            }
            MenuChoice::Invalid => writeln!(out, "Invalid option.")?,
        }
    }
}
