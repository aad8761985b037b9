//! # Joystick Module
//!
//! Linux joystick input via the joydev interface.
//!
//! This module handles:
//! - Opening `/dev/jsN` or `/dev/input/jsN`
//! - Decoding joydev event records
//! - Querying the device name, axis count and button count through evdev

pub mod device;
pub mod event;

use crate::error::Result;
use event::JsEvent;

/// Source of joystick events.
///
/// Blocking: each call waits until the next event is available.
pub trait EventSource {
    /// Reads the next event.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeRead` on I/O failure or a short read.
    fn read_event(&mut self) -> Result<JsEvent>;
}
