//! # MIDI Module
//!
//! MIDI output through the ALSA sequencer.
//!
//! This module handles:
//! - Encoding axis changes as control change, pitch bend and 14-bit controller messages
//! - Creating a named sequencer client with one subscribable output port
//! - Sending each message immediately, without queueing or timestamps

pub mod message;
pub mod port;

use midly::live::LiveEvent;
use thiserror::Error;

/// A message could not be delivered to the output port.
#[derive(Debug, Error)]
#[error("Failed to send MIDI message: {0}")]
pub struct SendError(pub String);

/// Destination for live MIDI messages.
#[cfg_attr(test, mockall::automock)]
pub trait MidiSink {
    /// Sends one message immediately.
    fn send(&mut self, event: &LiveEvent<'static>) -> Result<(), SendError>;
}
