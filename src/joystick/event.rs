//! # Joystick Event Records
//!
//! Decodes the fixed-size records read from a Linux joydev node (`/dev/input/jsN`).
//!
//! ## Record Layout (8 bytes, little-endian)
//!
//! ```text
//! Byte 0-3: time   (u32, milliseconds)
//! Byte 4-5: value  (i16)
//! Byte 6:   type   (u8, 0x01 button, 0x02 axis, 0x80 init flag)
//! Byte 7:   number (u8, button or axis index)
//! ```

use std::io::{self, Read};

use bytes::Buf;

/// Size of one joydev event record
pub const JS_EVENT_SIZE: usize = 8;

/// Button pressed/released
pub const JS_EVENT_BUTTON: u8 = 0x01;
/// Axis moved
pub const JS_EVENT_AXIS: u8 = 0x02;
/// Synthetic event describing the initial state
pub const JS_EVENT_INIT: u8 = 0x80;

/// Event class with the init flag masked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsEventKind {
    Button,
    Axis,
    /// Any other type byte
    Other(u8),
}

/// One decoded joystick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsEvent {
    /// Event timestamp in milliseconds
    pub time_ms: u32,
    /// Axis position or button state (nonzero = pressed)
    pub value: i16,
    /// Button, axis or unknown
    pub kind: JsEventKind,
    /// Set for the synthetic initial-state events sent on open
    pub init: bool,
    /// Button or axis index
    pub number: u8,
}

impl JsEvent {
    /// Creates an axis event.
    #[must_use]
    pub fn axis(number: u8, value: i16) -> Self {
        Self {
            time_ms: 0,
            value,
            kind: JsEventKind::Axis,
            init: false,
            number,
        }
    }

    /// Creates a button event.
    #[must_use]
    pub fn button(number: u8, pressed: bool) -> Self {
        Self {
            time_ms: 0,
            value: i16::from(pressed),
            kind: JsEventKind::Button,
            init: false,
            number,
        }
    }

    /// Decodes one record.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::joystick::event::{JsEvent, JsEventKind};
    ///
    /// // Axis 1 at -2, initial state
    /// let event = JsEvent::decode(&[0x10, 0, 0, 0, 0xFE, 0xFF, 0x82, 0x01]);
    /// assert_eq!(event.kind, JsEventKind::Axis);
    /// assert!(event.init);
    /// assert_eq!(event.number, 1);
    /// assert_eq!(event.value, -2);
    /// ```
    #[must_use]
    pub fn decode(record: &[u8; JS_EVENT_SIZE]) -> Self {
        let mut buf = &record[..];
        let time_ms = buf.get_u32_le();
        let value = buf.get_i16_le();
        let event_type = buf.get_u8();
        let number = buf.get_u8();

        let kind = match event_type & !JS_EVENT_INIT {
            JS_EVENT_BUTTON => JsEventKind::Button,
            JS_EVENT_AXIS => JsEventKind::Axis,
            other => JsEventKind::Other(other),
        };

        Self {
            time_ms,
            value,
            kind,
            init: event_type & JS_EVENT_INIT != 0,
            number,
        }
    }
}

/// Reads exactly one record from `reader`.
///
/// A single `read` call must return the whole record, as a joydev node
/// does. Fewer bytes, including end of stream, is an error.
///
/// # Errors
///
/// Returns the underlying I/O error, or `UnexpectedEof` on a short read.
pub fn read_record<R: Read + ?Sized>(reader: &mut R) -> io::Result<JsEvent> {
    let mut record = [0u8; JS_EVENT_SIZE];
    let n = reader.read(&mut record)?;
    if n != JS_EVENT_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short read: got {} of {} bytes", n, JS_EVENT_SIZE),
        ));
    }
    Ok(JsEvent::decode(&record))
}
