//! # Axis Specification Parser
//!
//! Turns a per-axis configuration token into calibration and output mapping.
//!
//! ## Token Grammar
//!
//! | Form | Example | Effect |
//! |------|---------|--------|
//! | `<cc>` | `64` | Control change on controller 64, default calibration |
//! | `<min>:<max>:<cc>` | `-20000:20000:7` | Calibrated control change on controller 7 |
//! | `<min>:<max>:p` | `32767:-32768:p` | Calibrated pitch bend |
//!
//! `min` and `max` are not ordered: swapping them inverts the axis.
//!
//! ## Usage
//!
//! ```
//! use joy_midi_bridge::axis::spec::AxisConfigs;
//! use joy_midi_bridge::axis::EventKind;
//!
//! let mut configs = AxisConfigs::default();
//! configs.configure(1, "-100:100:p")?;
//!
//! assert_eq!(configs[1].kind, EventKind::PitchBend);
//! assert_eq!(configs[1].input_min, -100);
//! # Ok::<(), joy_midi_bridge::error::BridgeError>(())
//! ```

use std::ops::Index;
use std::str::FromStr;

use thiserror::Error;

use super::{
    EventKind, CONTROL_CHANGE_OUTPUT_MIN, CONTROL_CHANGE_OUTPUT_RANGE, DEFAULT_CONTROLLER_BASE,
    DEFAULT_INPUT_MAX, DEFAULT_INPUT_MIN, FULL_RESOLUTION_OUTPUT_RANGE, MAX_AXES, MAX_CONTROLLER,
    PITCH_BEND_OUTPUT_MIN,
};
use crate::error::{BridgeError, Result};

/// Delimiter between the fields of the extended form
const FIELD_DELIMITER: char = ':';

/// Event field value selecting pitch bend
const PITCH_BEND_EVENT: &str = "p";

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("missing 2nd delimiter, needs to be <cc> or <min>:<max>:<ev>")]
    MissingDelimiter,

    #[error("one of the fields is empty, needs to be <min>:<max>:<ev>")]
    EmptyField,

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("controller number {0} is out of range (0-127)")]
    ControllerOutOfRange(i64),

    #[error("calibration range {0}:{0} is empty")]
    EmptyRange(i32),
}

/// Event field of the extended form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSpec {
    /// `p`
    PitchBend,
    /// A controller number
    Controller(u8),
}

/// A parsed axis configuration token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSpec {
    /// Bare controller number, calibration left at defaults.
    Legacy { controller: u8 },
    /// `<min>:<max>:<event>`
    Extended {
        input_min: i32,
        input_max: i32,
        event: EventSpec,
    },
}

impl FromStr for AxisSpec {
    type Err = SpecError;

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        let Some((min, rest)) = token.split_once(FIELD_DELIMITER) else {
            return Ok(AxisSpec::Legacy {
                controller: parse_controller(token)?,
            });
        };

        let (max, event) = rest
            .split_once(FIELD_DELIMITER)
            .ok_or(SpecError::MissingDelimiter)?;

        if min.is_empty() || max.is_empty() || event.is_empty() {
            return Err(SpecError::EmptyField);
        }

        let input_min = parse_number::<i32>(min)?;
        let input_max = parse_number::<i32>(max)?;
        if input_min == input_max {
            return Err(SpecError::EmptyRange(input_min));
        }

        let event = if event == PITCH_BEND_EVENT {
            EventSpec::PitchBend
        } else {
            EventSpec::Controller(parse_controller(event)?)
        };

        Ok(AxisSpec::Extended {
            input_min,
            input_max,
            event,
        })
    }
}

fn parse_number<T: FromStr>(field: &str) -> std::result::Result<T, SpecError> {
    field
        .trim()
        .parse()
        .map_err(|_| SpecError::InvalidNumber(field.to_string()))
}

fn parse_controller(field: &str) -> std::result::Result<u8, SpecError> {
    let number = parse_number::<i64>(field)?;
    u8::try_from(number)
        .ok()
        .filter(|&cc| cc <= MAX_CONTROLLER)
        .ok_or(SpecError::ControllerOutOfRange(number))
}

/// Configuration of one axis slot, before the axis table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConfig {
    /// Calibration lower bound
    pub input_min: i32,
    /// Calibration upper bound
    pub input_max: i32,
    /// Output lower bound
    pub output_min: i32,
    /// Output span
    pub output_range: i32,
    /// Message kind
    pub kind: EventKind,
    /// Controller number (0 for pitch bend)
    pub target: u8,
}

impl AxisConfig {
    /// Default configuration of axis slot `index`.
    ///
    /// Full 16-bit calibration, 7-bit control change on controller `10 + index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::axis::spec::AxisConfig;
    ///
    /// let config = AxisConfig::for_axis(3);
    /// assert_eq!(config.target, 13);
    /// assert_eq!((config.input_min, config.input_max), (-32768, 32767));
    /// assert_eq!((config.output_min, config.output_range), (0, 127));
    /// ```
    #[must_use]
    pub fn for_axis(index: usize) -> Self {
        Self {
            input_min: DEFAULT_INPUT_MIN,
            input_max: DEFAULT_INPUT_MAX,
            output_min: CONTROL_CHANGE_OUTPUT_MIN,
            output_range: CONTROL_CHANGE_OUTPUT_RANGE,
            kind: EventKind::ControlChange,
            target: DEFAULT_CONTROLLER_BASE.saturating_add(index as u8),
        }
    }

    /// Applies a parsed token to this slot.
    ///
    /// The legacy form only changes the controller. The extended form sets
    /// the calibration, and switches to pitch bend when the event is `p`.
    /// A control change always gets the 7-bit output bounds.
    pub fn apply(&mut self, spec: AxisSpec) {
        match spec {
            AxisSpec::Legacy { controller } => self.set_controller(controller),
            AxisSpec::Extended {
                input_min,
                input_max,
                event,
            } => {
                self.input_min = input_min;
                self.input_max = input_max;
                match event {
                    EventSpec::PitchBend => {
                        self.kind = EventKind::PitchBend;
                        self.target = 0;
                        self.output_min = PITCH_BEND_OUTPUT_MIN;
                        self.output_range = FULL_RESOLUTION_OUTPUT_RANGE;
                    }
                    EventSpec::Controller(controller) => self.set_controller(controller),
                }
            }
        }
    }

    fn set_controller(&mut self, controller: u8) {
        self.kind = EventKind::ControlChange;
        self.target = controller;
        self.output_min = CONTROL_CHANGE_OUTPUT_MIN;
        self.output_range = CONTROL_CHANGE_OUTPUT_RANGE;
    }
}

/// Configurations for all axis slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisConfigs {
    slots: [AxisConfig; MAX_AXES],
}

impl Default for AxisConfigs {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(AxisConfig::for_axis),
        }
    }
}

impl AxisConfigs {
    /// Parses `token` and applies it to axis slot `axis`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the axis index is out of range or the
    /// token is malformed. The slot is left untouched on error.
    pub fn configure(&mut self, axis: usize, token: &str) -> Result<()> {
        let configuration_error = |reason: String| BridgeError::Configuration {
            axis,
            token: token.to_string(),
            reason,
        };

        let slot = self
            .slots
            .get_mut(axis)
            .ok_or_else(|| configuration_error(format!("axis must be 0-{}", MAX_AXES - 1)))?;
        let spec = token
            .parse::<AxisSpec>()
            .map_err(|e| configuration_error(e.to_string()))?;

        slot.apply(spec);
        Ok(())
    }

    /// Iterates over all slots in axis order.
    pub fn iter(&self) -> impl Iterator<Item = &AxisConfig> {
        self.slots.iter()
    }
}

impl Index<usize> for AxisConfigs {
    type Output = AxisConfig;

    fn index(&self, axis: usize) -> &AxisConfig {
        &self.slots[axis]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_token() {
        assert_eq!("64".parse(), Ok(AxisSpec::Legacy { controller: 64 }));
    }

    #[test]
    fn test_legacy_token_keeps_default_calibration() {
        let mut configs = AxisConfigs::default();
        configs.configure(0, "64").unwrap();

        let config = configs[0];
        assert_eq!(config.target, 64);
        assert_eq!(config.kind, EventKind::ControlChange);
        assert_eq!((config.input_min, config.input_max), (-32768, 32767));
        assert_eq!((config.output_min, config.output_range), (0, 127));
    }

    #[test]
    fn test_extended_controller_token() {
        assert_eq!(
            "-20000:20000:7".parse(),
            Ok(AxisSpec::Extended {
                input_min: -20000,
                input_max: 20000,
                event: EventSpec::Controller(7),
            })
        );
    }

    #[test]
    fn test_extended_controller_keeps_control_change_output() {
        let mut configs = AxisConfigs::default();
        configs.configure(2, "0:1000:21").unwrap();

        let config = configs[2];
        assert_eq!(config.kind, EventKind::ControlChange);
        assert_eq!(config.target, 21);
        assert_eq!((config.input_min, config.input_max), (0, 1000));
        assert_eq!((config.output_min, config.output_range), (0, 127));
    }

    #[test]
    fn test_extended_pitch_bend_token() {
        let mut configs = AxisConfigs::default();
        configs.configure(1, "-100:100:p").unwrap();

        let config = configs[1];
        assert_eq!(config.kind, EventKind::PitchBend);
        assert_eq!(config.target, 0);
        assert_eq!((config.input_min, config.input_max), (-100, 100));
        assert_eq!((config.output_min, config.output_range), (-8192, 16383));
    }

    #[test]
    fn test_inverted_calibration_is_accepted() {
        assert_eq!(
            "32767:-32768:p".parse(),
            Ok(AxisSpec::Extended {
                input_min: 32767,
                input_max: -32768,
                event: EventSpec::PitchBend,
            })
        );
    }

    #[test]
    fn test_missing_second_delimiter() {
        assert_eq!("10:20".parse::<AxisSpec>(), Err(SpecError::MissingDelimiter));
    }

    #[test]
    fn test_empty_fields() {
        for token in [":20:7", "10::7", "10:20:", "::"] {
            assert_eq!(
                token.parse::<AxisSpec>(),
                Err(SpecError::EmptyField),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(
            "abc".parse::<AxisSpec>(),
            Err(SpecError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            "x:20:7".parse::<AxisSpec>(),
            Err(SpecError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            "10:20:pitch".parse::<AxisSpec>(),
            Err(SpecError::InvalidNumber("pitch".to_string()))
        );
    }

    #[test]
    fn test_controller_out_of_range() {
        assert_eq!(
            "128".parse::<AxisSpec>(),
            Err(SpecError::ControllerOutOfRange(128))
        );
        assert_eq!(
            "0:10:-1".parse::<AxisSpec>(),
            Err(SpecError::ControllerOutOfRange(-1))
        );
    }

    #[test]
    fn test_empty_calibration_range() {
        assert_eq!("5:5:7".parse::<AxisSpec>(), Err(SpecError::EmptyRange(5)));
    }

    #[test]
    fn test_configure_reports_axis_and_token() {
        let mut configs = AxisConfigs::default();
        let err = configs.configure(4, "10:20").unwrap_err();

        match err {
            BridgeError::Configuration { axis, token, .. } => {
                assert_eq!(axis, 4);
                assert_eq!(token, "10:20");
            }
            other => panic!("Expected Configuration error, got: {:?}", other),
        }
        // Slot untouched
        assert_eq!(configs[4], AxisConfig::for_axis(4));
    }

    #[test]
    fn test_configure_rejects_axis_out_of_range() {
        let mut configs = AxisConfigs::default();
        assert!(matches!(
            configs.configure(MAX_AXES, "64"),
            Err(BridgeError::Configuration { axis: 10, .. })
        ));
    }

    #[test]
    fn test_default_controllers() {
        let configs = AxisConfigs::default();
        let targets: Vec<u8> = configs.iter().map(|c| c.target).collect();
        assert_eq!(targets, (10..20).collect::<Vec<u8>>());
    }

    #[test]
    fn test_later_token_overrides_earlier() {
        let mut configs = AxisConfigs::default();
        configs.configure(0, "-100:100:p").unwrap();
        configs.configure(0, "0:50:3").unwrap();

        assert_eq!(configs[0].kind, EventKind::ControlChange);
        assert_eq!(configs[0].target, 3);
        assert_eq!((configs[0].input_min, configs[0].input_max), (0, 50));
        assert_eq!((configs[0].output_min, configs[0].output_range), (0, 127));
    }

    #[test]
    fn test_legacy_after_extended_keeps_calibration() {
        let mut configs = AxisConfigs::default();
        configs.configure(5, "100:-100:p").unwrap();
        configs.configure(5, "1").unwrap();

        assert_eq!(configs[5].kind, EventKind::ControlChange);
        assert_eq!(configs[5].target, 1);
        assert_eq!((configs[5].input_min, configs[5].input_max), (100, -100));
        assert_eq!((configs[5].output_min, configs[5].output_range), (0, 127));
    }
}
