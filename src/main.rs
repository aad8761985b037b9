//! # Joy MIDI Bridge
//!
//! Turn a Linux joystick into a MIDI controller.
//!
//! Joystick axes become control change, pitch bend or 14-bit controller
//! messages on an ALSA sequencer port; joystick buttons select the MIDI
//! channel.

use std::convert::Infallible;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::filter::{Directive, EnvFilter};

use joy_midi_bridge::axis::table::AxisTable;
use joy_midi_bridge::bridge::{Bridge, DIAGNOSTICS_TARGET};
use joy_midi_bridge::cli::Cli;
use joy_midi_bridge::config::Config;
use joy_midi_bridge::error::BridgeError;
use joy_midi_bridge::joystick::device::JoystickDevice;
use joy_midi_bridge::midi::port::{MidiPort, PORT_NAME};

/// Exit code for failures outside the [`BridgeError`] taxonomy
const EXIT_FAILURE: i32 = 1;

/// Main entry point for Joy MIDI Bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber (stderr)
///    - Parse the command line and the optional profile
///    - Parse every axis spec, before any device is touched
///    - Open the joystick, then the MIDI port
///
/// 2. **Main Loop**
///    - Read one joystick event at a time and send MIDI on change
///
/// 3. **Exit**
///    - There is no graceful shutdown: the loop only ends on a read error
///      (or when the process is killed). Every error is reported once here
///      and mapped to its exit code.
///
/// # Examples
///
/// ```bash
/// joy-midi-bridge -d 0 -0 7 -1 32767:-32768:p -v
/// ```
///
/// Expected output:
/// ```text
/// INFO joy_midi_bridge: joy-midi-bridge v0.1.0 starting...
/// INFO joy_midi_bridge::joystick::device: Using joystick (Logitech Extreme 3D) through device /dev/input/js0 with 6 axes and 12 buttons.
/// INFO joy_midi_bridge::midi::port: Created MIDI port Joystick0:Joystick Output
/// INFO joy_midi_bridge: Ready, entering loop - use Ctrl-C to exit.
/// ```
fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env()))
        .with_writer(std::io::stderr)
        .init();

    let err = match run() {
        Ok(never) => match never {},
        Err(err) => err,
    };

    let code = match err.downcast_ref::<BridgeError>() {
        Some(bridge_error) => {
            match bridge_error {
                BridgeError::Help(text) => print!("{}", text),
                BridgeError::Usage(text) => eprint!("{}", text),
                _ => error!("{:#}", err),
            }
            bridge_error.exit_code()
        }
        None => {
            error!("{:#}", err);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

/// `info` by default, with the `-v` status lines always let through.
fn log_filter(filter: EnvFilter) -> EnvFilter {
    let filter = filter.add_directive(tracing::Level::INFO.into());
    match format!("{}=info", DIAGNOSTICS_TARGET).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn run() -> Result<Infallible> {
    let cli = Cli::parse_from_args(std::env::args_os())?;

    info!("{} v{} starting...", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.merge_cli(&cli);

    let axis_configs = config
        .axis_configs()
        .context("Failed to parse axis specs")?;

    let joystick = JoystickDevice::open(config.device)?;
    let port = MidiPort::open(&config.client_name(), PORT_NAME)?;

    let table = AxisTable::new(&axis_configs, config.high_resolution);
    let mut bridge = Bridge::new(joystick, port, table, config.verbose);

    info!("Ready, entering loop - use Ctrl-C to exit.");

    Ok(bridge.run()?)
}
