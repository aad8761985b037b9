//! # Bridge Loop
//!
//! Reads joystick events and turns them into MIDI messages.
//!
//! ## Event Handling
//!
//! | Event | Effect |
//! |-------|--------|
//! | Button press | Session channel becomes `button + 1` |
//! | Button release | Ignored |
//! | Axis 0-9 | Scaled; sent on the session channel if the value changed |
//! | Axis 10+ | Ignored |
//!
//! The loop is single-threaded. Its only blocking point is the read of the
//! next joystick event, and any read failure ends it.
//!
//! ## Usage
//!
//! ```no_run
//! use joy_midi_bridge::axis::spec::AxisConfigs;
//! use joy_midi_bridge::axis::table::AxisTable;
//! use joy_midi_bridge::bridge::Bridge;
//! use joy_midi_bridge::joystick::device::JoystickDevice;
//! use joy_midi_bridge::midi::port::{client_name, MidiPort, PORT_NAME};
//!
//! let joystick = JoystickDevice::open(0)?;
//! let port = MidiPort::open(&client_name(0), PORT_NAME)?;
//! let table = AxisTable::new(&AxisConfigs::default(), false);
//!
//! let mut bridge = Bridge::new(joystick, port, table, false);
//! let err = bridge.run().unwrap_err();
//! eprintln!("{}", err);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::convert::Infallible;

use tracing::{info, trace, warn};

use crate::axis::table::AxisTable;
use crate::error::Result;
use crate::joystick::event::{JsEvent, JsEventKind};
use crate::joystick::EventSource;
use crate::midi::message::MidiEvent;
use crate::midi::MidiSink;

/// Session channel before any button is pressed
pub const INITIAL_CHANNEL: u16 = 1;

/// Tracing target of the `-v` status lines. Enabled whenever the session
/// reports diagnostics, whatever `RUST_LOG` says about the rest of the crate.
pub const DIAGNOSTICS_TARGET: &str = "joy_midi_bridge::diagnostics";

/// Joystick-to-MIDI session.
///
/// Owns the event source, the MIDI sink, the axis table and the session
/// channel for the lifetime of the process.
pub struct Bridge<E, S> {
    source: E,
    sink: S,
    table: AxisTable,
    channel: u16,
    diagnostics: bool,
}

impl<E: EventSource, S: MidiSink> Bridge<E, S> {
    /// Creates a session on channel 1.
    ///
    /// With `diagnostics`, every channel switch and every sent value is
    /// reported, together with the raw range each axis has covered.
    pub fn new(source: E, sink: S, table: AxisTable, diagnostics: bool) -> Self {
        Self {
            source,
            sink,
            table,
            channel: INITIAL_CHANNEL,
            diagnostics,
        }
    }

    /// Current session channel.
    pub fn channel(&self) -> u16 {
        self.channel
    }

    /// Axis table with its emission state.
    pub fn table(&self) -> &AxisTable {
        &self.table
    }

    /// The MIDI sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Processes events until reading fails.
    ///
    /// Never returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the read error that ended the loop.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            self.step()?;
        }
    }

    /// Reads and dispatches one event.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeRead` if the event source fails.
    pub fn step(&mut self) -> Result<()> {
        let event = self.source.read_event()?;
        self.dispatch(event);
        Ok(())
    }

    /// Routes one event.
    pub fn dispatch(&mut self, event: JsEvent) {
        match event.kind {
            JsEventKind::Button => self.handle_button(event.number, event.value),
            JsEventKind::Axis => self.handle_axis(usize::from(event.number), event.value),
            JsEventKind::Other(kind) => trace!("Ignoring event type 0x{:02x}", kind),
        }
    }

    fn handle_button(&mut self, button: u8, value: i16) {
        if value == 0 {
            return;
        }

        self.channel = u16::from(button) + 1;
        if self.diagnostics {
            info!(target: DIAGNOSTICS_TARGET, "Switched to MIDI channel {}.", self.channel);
        }
    }

    fn handle_axis(&mut self, index: usize, raw: i16) {
        let Some(axis) = self.table.get_mut(index) else {
            return;
        };
        let Some(value) = axis.update(raw) else {
            return;
        };

        let event = MidiEvent {
            kind: axis.kind(),
            channel: self.channel,
            target: axis.target(),
            value,
        };

        if self.diagnostics {
            axis.observe(raw);
            info!(
                target: DIAGNOSTICS_TARGET,
                "{}",
                {
                    let (min, max) = axis.observed_range();
                    sent_line(event.target, value, (i32::from(min), i32::from(max)))
                }
            );
        }

        for message in event.encode() {
            if let Err(e) = self.sink.send(&message) {
                warn!("{}", e);
            }
        }
    }
}

fn sent_line(target: u8, value: i32, (min, max): (i32, i32)) -> String {
    format!(
        "Sent controller {} with value: {:5} (range: {:5}..{:5}).",
        target, value, min, max
    )
}
