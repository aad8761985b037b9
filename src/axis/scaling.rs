//! # Scaling
//!
//! Maps a raw joystick sample onto a MIDI value range.
//!
//! The formula used is:
//!
//! ```text
//! normalized = (raw - input_min) / input_range
//! result     = output_min + output_range * normalized   (truncated toward zero)
//! ```
//!
//! The result is truncated, never rounded, so a full-scale stick on a
//! 7-bit controller only reaches 127 at the very last raw step.
//!
//! ## Usage
//!
//! ```
//! use joy_midi_bridge::axis::scaling::scale;
//!
//! // Full 16-bit stick onto a 7-bit controller
//! assert_eq!(scale(-32768, -32768, 65535.0, 0, 127.0), 0);
//! assert_eq!(scale(32767, -32768, 65535.0, 0, 127.0), 127);
//! ```

/// Scales a raw sample into the output range.
///
/// `input_range` is `input_max - input_min` and is expected to be computed
/// once when the axis table is built. A negative range inverts the axis.
///
/// Samples outside the calibration bounds extrapolate past the output
/// bounds; nothing is clamped here.
///
/// # Arguments
///
/// * `raw` - Raw joystick sample
/// * `input_min` - Calibration lower bound
/// * `input_range` - Calibration span (`input_max - input_min`, nonzero)
/// * `output_min` - Output lower bound
/// * `output_range` - Output span
///
/// # Examples
///
/// ```
/// use joy_midi_bridge::axis::scaling::scale;
///
/// // Pitch bend on a calibrated -100:100 axis, stick centred
/// assert_eq!(scale(0, -100, 200.0, -8192, 16383.0), 0);
/// ```
#[inline]
#[must_use]
pub fn scale(raw: i32, input_min: i32, input_range: f64, output_min: i32, output_range: f64) -> i32 {
    let normalized = (f64::from(raw) - f64::from(input_min)) / input_range;
    let value = f64::from(output_min) + output_range * normalized;

    // `as` truncates toward zero
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_MIN: i32 = -32768;
    const FULL_RANGE: f64 = 65535.0;

    #[test]
    fn test_default_control_change_endpoints() {
        assert_eq!(scale(-32768, FULL_MIN, FULL_RANGE, 0, 127.0), 0);
        assert_eq!(scale(32767, FULL_MIN, FULL_RANGE, 0, 127.0), 127);
    }

    #[test]
    fn test_default_control_change_center() {
        // 127 * 32768 / 65535 = 63.5009... -> truncated
        assert_eq!(scale(0, FULL_MIN, FULL_RANGE, 0, 127.0), 63);
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        // 127 * 65534 / 65535 = 126.998... must stay 126
        assert_eq!(scale(32766, FULL_MIN, FULL_RANGE, 0, 127.0), 126);
    }

    #[test]
    fn test_truncates_toward_zero_for_negative_results() {
        // -8192 + 16383 * 0.5 = -0.5 -> 0, not -1
        assert_eq!(scale(0, -100, 200.0, -8192, 16383.0), 0);
        // -8192 + 16383 * 0.495 = -82.415 -> -82
        assert_eq!(scale(-1, -100, 200.0, -8192, 16383.0), -82);
    }

    #[test]
    fn test_pitch_bend_endpoints() {
        assert_eq!(scale(-32768, FULL_MIN, FULL_RANGE, -8192, 16383.0), -8192);
        assert_eq!(scale(32767, FULL_MIN, FULL_RANGE, -8192, 16383.0), 8191);
    }

    #[test]
    fn test_fourteen_bit_controller_endpoints() {
        assert_eq!(scale(-32768, FULL_MIN, FULL_RANGE, 0, 16383.0), 0);
        assert_eq!(scale(32767, FULL_MIN, FULL_RANGE, 0, 16383.0), 16383);
    }

    #[test]
    fn test_calibrated_range() {
        // 0:1000 calibration
        assert_eq!(scale(0, 0, 1000.0, 0, 127.0), 0);
        assert_eq!(scale(500, 0, 1000.0, 0, 127.0), 63);
        assert_eq!(scale(1000, 0, 1000.0, 0, 127.0), 127);
    }

    #[test]
    fn test_inverted_range_reverses_direction() {
        // 1000:0 calibration, range = -1000
        assert_eq!(scale(1000, 1000, -1000.0, 0, 127.0), 0);
        assert_eq!(scale(0, 1000, -1000.0, 0, 127.0), 127);
        assert_eq!(scale(250, 1000, -1000.0, 0, 127.0), 95);
    }

    #[test]
    fn test_samples_outside_calibration_extrapolate() {
        assert_eq!(scale(2000, 0, 1000.0, 0, 127.0), 254);
        assert_eq!(scale(-1000, 0, 1000.0, 0, 127.0), -127);
    }

    #[test]
    fn test_monotonic_over_full_range() {
        let mut previous = i32::MIN;
        for raw in (-32768..=32767).step_by(97) {
            let value = scale(raw, FULL_MIN, FULL_RANGE, 0, 127.0);
            assert!(value >= previous, "scale must be non-decreasing at raw {}", raw);
            assert!((0..=127).contains(&value));
            previous = value;
        }
    }
}
