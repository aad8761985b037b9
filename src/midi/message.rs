//! # MIDI Message Encoding
//!
//! Turns a scaled axis value into MIDI wire messages.
//!
//! ## Encoding
//!
//! | Kind | Messages |
//! |------|----------|
//! | Control change | `Bn cc vv` with `vv = value & 0x7F` |
//! | Pitch bend | `En ll mm` with `value + 8192` split into 7-bit halves |
//! | 14-bit control change (cc < 32) | `Bn cc msb`, then `Bn cc+32 lsb` |
//! | 14-bit control change (cc >= 32) | `Bn cc vv`, no LSB partner exists |
//!
//! `n` is the low nibble of the session channel. Values outside a
//! message's range are masked, not clamped.

use midly::live::LiveEvent;
use midly::num::{u14, u4, u7};
use midly::{MidiMessage, PitchBend};

use crate::axis::EventKind;

/// Offset from an MSB controller to its LSB partner
const LSB_CONTROLLER_OFFSET: u8 = 32;

/// Pitch bend wire value for the centre position
const PITCH_BEND_CENTER: i32 = 8192;

/// One axis change, ready to be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub kind: EventKind,
    /// Session channel (1 after startup, `button + 1` after a press)
    pub channel: u16,
    /// Controller number, ignored for pitch bend
    pub target: u8,
    pub value: i32,
}

impl MidiEvent {
    /// Encodes this event as one or two live MIDI messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::axis::EventKind;
    /// use joy_midi_bridge::midi::message::MidiEvent;
    ///
    /// let event = MidiEvent { kind: EventKind::ControlChange14, channel: 1, target: 7, value: 16383 };
    /// assert_eq!(event.encode().len(), 2); // MSB on CC 7, LSB on CC 39
    /// ```
    #[must_use]
    pub fn encode(&self) -> Vec<LiveEvent<'static>> {
        let channel = u4::from_int_lossy((self.channel & 0x0F) as u8);
        let midi = |message| LiveEvent::Midi { channel, message };

        match self.kind {
            EventKind::ControlChange => vec![midi(controller(self.target, self.value))],
            EventKind::PitchBend => {
                let bend = self.value.wrapping_add(PITCH_BEND_CENTER) as u16;
                vec![midi(MidiMessage::PitchBend {
                    bend: PitchBend(u14::from_int_lossy(bend)),
                })]
            }
            EventKind::ControlChange14 if self.target < LSB_CONTROLLER_OFFSET => vec![
                midi(controller(self.target, self.value >> 7)),
                midi(controller(self.target + LSB_CONTROLLER_OFFSET, self.value)),
            ],
            EventKind::ControlChange14 => vec![midi(controller(self.target, self.value))],
        }
    }
}

fn controller(number: u8, value: i32) -> MidiMessage {
    MidiMessage::Controller {
        controller: u7::from_int_lossy(number),
        value: u7::from_int_lossy(value as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(event: &MidiEvent) -> Vec<Vec<u8>> {
        event
            .encode()
            .iter()
            .map(|live| {
                let mut bytes = Vec::new();
                live.write_std(&mut bytes).unwrap();
                bytes
            })
            .collect()
    }

    fn event(kind: EventKind, channel: u16, target: u8, value: i32) -> MidiEvent {
        MidiEvent {
            kind,
            channel,
            target,
            value,
        }
    }

    #[test]
    fn test_control_change() {
        assert_eq!(
            wire(&event(EventKind::ControlChange, 1, 10, 127)),
            vec![vec![0xB1, 10, 127]]
        );
    }

    #[test]
    fn test_control_change_masks_value() {
        // Extrapolated past the calibration: 254 & 0x7F, -127 & 0x7F
        assert_eq!(
            wire(&event(EventKind::ControlChange, 1, 10, 254)),
            vec![vec![0xB1, 10, 0x7E]]
        );
        assert_eq!(
            wire(&event(EventKind::ControlChange, 1, 10, -127)),
            vec![vec![0xB1, 10, 0x01]]
        );
    }

    #[test]
    fn test_channel_uses_low_nibble() {
        assert_eq!(wire(&event(EventKind::ControlChange, 5, 1, 0))[0][0], 0xB5);
        assert_eq!(wire(&event(EventKind::ControlChange, 16, 1, 0))[0][0], 0xB0);
        assert_eq!(wire(&event(EventKind::ControlChange, 17, 1, 0))[0][0], 0xB1);
    }

    #[test]
    fn test_pitch_bend() {
        assert_eq!(
            wire(&event(EventKind::PitchBend, 1, 0, -8192)),
            vec![vec![0xE1, 0x00, 0x00]]
        );
        assert_eq!(
            wire(&event(EventKind::PitchBend, 1, 0, 0)),
            vec![vec![0xE1, 0x00, 0x40]]
        );
        assert_eq!(
            wire(&event(EventKind::PitchBend, 1, 0, 8191)),
            vec![vec![0xE1, 0x7F, 0x7F]]
        );
    }

    #[test]
    fn test_fourteen_bit_controller_pair() {
        // 16383 = 0x3FFF -> MSB 0x7F, LSB 0x7F; 8192 -> MSB 0x40, LSB 0x00
        assert_eq!(
            wire(&event(EventKind::ControlChange14, 2, 7, 16383)),
            vec![vec![0xB2, 7, 0x7F], vec![0xB2, 39, 0x7F]]
        );
        assert_eq!(
            wire(&event(EventKind::ControlChange14, 2, 7, 8192 + 5)),
            vec![vec![0xB2, 7, 0x40], vec![0xB2, 39, 0x05]]
        );
    }

    #[test]
    fn test_fourteen_bit_controller_without_partner() {
        assert_eq!(
            wire(&event(EventKind::ControlChange14, 1, 64, 16383)),
            vec![vec![0xB1, 64, 0x7F]]
        );
    }
}
