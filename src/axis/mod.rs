//! # Axis Module
//!
//! Per-axis calibration and MIDI mapping.
//!
//! This module handles:
//! - Parsing per-axis configuration tokens (`<cc>` or `<min>:<max>:<event>`)
//! - Scaling raw joystick samples into MIDI values
//! - The fixed table of axis slots and the 14-bit resolution pass
//! - Suppressing repeated values so only changes are emitted

pub mod scaling;
pub mod spec;
pub mod table;

/// Number of axis slots. Axis events with a higher index are ignored.
pub const MAX_AXES: usize = 10;

/// Default calibration lower bound (full signed 16-bit range)
pub const DEFAULT_INPUT_MIN: i32 = i16::MIN as i32;
/// Default calibration upper bound (full signed 16-bit range)
pub const DEFAULT_INPUT_MAX: i32 = i16::MAX as i32;

/// Control change output range (7-bit: 0-127)
pub const CONTROL_CHANGE_OUTPUT_MIN: i32 = 0;
pub const CONTROL_CHANGE_OUTPUT_RANGE: i32 = 127;

/// Pitch bend output range (14-bit, signed around center: -8192..8191)
pub const PITCH_BEND_OUTPUT_MIN: i32 = -8192;

/// Output range of the 14-bit message kinds
pub const FULL_RESOLUTION_OUTPUT_RANGE: i32 = 16383;

/// Axis `i` defaults to controller number `DEFAULT_CONTROLLER_BASE + i`.
pub const DEFAULT_CONTROLLER_BASE: u8 = 10;

/// Highest valid MIDI controller number
pub const MAX_CONTROLLER: u8 = 127;

/// Kind of MIDI message an axis produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// 7-bit control change
    ControlChange,
    /// 14-bit pitch bend
    PitchBend,
    /// 14-bit control change (MSB/LSB controller pair)
    ControlChange14,
}
