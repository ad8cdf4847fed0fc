use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use envmon::config::Config;
use envmon::console::run_menu;
use envmon::port::{PortSession, PortSettings};
use envmon::transport::LineTransport;

/// Command-line arguments. Flags override the config file and environment.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Control panel for the serial environmental monitor board.",
    long_about = "Talks to an Arduino-class environmental monitor over a serial line: \
                  toggles monitoring, fan and alarm, and reads temperature/humidity data."
)]
struct Args {
    /// Serial device path (e.g. /dev/ttyACM0).
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate.
    #[arg(short, long)]
    baud: Option<u32>,

    /// Path to a configuration file (otherwise resolved automatically).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = args.port {
        config.serial.port = port;
    }
    if let Some(baud) = args.baud {
        config.serial.baud = baud;
    }

    let default_level = if args.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = PortSettings {
        baud_rate: config.serial.baud,
        idle_timeout: config.serial.idle_timeout(),
    };
    let session = PortSession::open(&config.serial.port, settings)?;

    println!("Connecting to the monitor board on {}...", config.serial.port);
    // Opening the line resets the board; give it time to boot.
    std::thread::sleep(config.serial.settle_delay());
    println!("Connection established.");
    info!(port = %config.serial.port, baud = config.serial.baud, "session ready");

    let mut transport = LineTransport::new(session);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_menu(&mut transport, stdin.lock(), stdout.lock())?;

    // Drop would release the handle too; closing here keeps shutdown explicit.
    transport.into_port().close();
    Ok(())
}
