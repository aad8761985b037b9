//! # MIDI Output Port
//!
//! Sequencer client with a single virtual output port.
//!
//! Other applications see the client as `Joystick<N>` and subscribe to
//! its `Joystick Output` port, e.g. with `aconnect`.

use midir::os::unix::VirtualOutput;
use midir::{MidiOutput, MidiOutputConnection};
use midly::live::LiveEvent;
use tracing::{debug, info};

use super::{MidiSink, SendError};
use crate::error::{BridgeError, Result};

/// Name of the output port
pub const PORT_NAME: &str = "Joystick Output";

/// Sequencer client name for joystick `index`.
///
/// # Examples
///
/// ```
/// use joy_midi_bridge::midi::port::client_name;
///
/// assert_eq!(client_name(0), "Joystick0");
/// ```
#[must_use]
pub fn client_name(index: u32) -> String {
    format!("Joystick{}", index)
}

/// Open sequencer client and output port.
pub struct MidiPort {
    connection: MidiOutputConnection,
    client_name: String,
    port_name: String,
    buffer: Vec<u8>,
}

impl std::fmt::Debug for MidiPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidiPort")
            .field("client_name", &self.client_name)
            .field("port_name", &self.port_name)
            .finish_non_exhaustive()
    }
}

impl MidiPort {
    /// Opens a sequencer client named `client_name` and creates one
    /// subscribable output port named `port_name`.
    ///
    /// # Errors
    ///
    /// Returns `TransportAccess` if the sequencer cannot be opened or the
    /// port cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joy_midi_bridge::midi::port::{client_name, MidiPort, PORT_NAME};
    ///
    /// let port = MidiPort::open(&client_name(0), PORT_NAME)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(client_name: &str, port_name: &str) -> Result<Self> {
        let output = MidiOutput::new(client_name).map_err(|e| {
            BridgeError::TransportAccess(format!("Failed to open client {}: {}", client_name, e))
        })?;

        let connection = output.create_virtual(port_name).map_err(|e| {
            BridgeError::TransportAccess(format!("Failed to create port {}: {}", port_name, e))
        })?;

        info!("Created MIDI port {}:{}", client_name, port_name);

        Ok(Self {
            connection,
            client_name: client_name.to_string(),
            port_name: port_name.to_string(),
            buffer: Vec::with_capacity(3),
        })
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiSink for MidiPort {
    fn send(&mut self, event: &LiveEvent<'static>) -> std::result::Result<(), SendError> {
        self.buffer.clear();
        event
            .write_std(&mut self.buffer)
            .map_err(|e| SendError(e.to_string()))?;

        self.connection
            .send(&self.buffer)
            .map_err(|e| SendError(e.to_string()))?;

        debug!("Sent MIDI message {:02X?}", self.buffer);
        Ok(())
    }
}
