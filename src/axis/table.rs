//! # Axis Table
//!
//! Runtime state of the ten axis slots.
//!
//! The table is built once from the parsed [`AxisConfigs`]. Building it
//! applies the optional 14-bit resolution pass and derives each axis'
//! calibration span, so neither happens per sample.
//!
//! ## Usage
//!
//! ```
//! use joy_midi_bridge::axis::spec::AxisConfigs;
//! use joy_midi_bridge::axis::table::AxisTable;
//!
//! let mut table = AxisTable::new(&AxisConfigs::default(), false);
//! let axis = table.get_mut(0).unwrap();
//!
//! assert_eq!(axis.update(32767), Some(127));
//! assert_eq!(axis.update(32767), None); // unchanged, suppressed
//! ```

use super::scaling::scale;
use super::spec::{AxisConfig, AxisConfigs};
use super::{EventKind, FULL_RESOLUTION_OUTPUT_RANGE, MAX_AXES};

/// Calibration, output mapping and emission state of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisChannel {
    input_min: i32,
    input_range: f64,
    output_min: i32,
    output_range: f64,
    kind: EventKind,
    target: u8,
    /// `None` until the first value is emitted.
    last_value: Option<i32>,
    observed_min: i16,
    observed_max: i16,
}

impl AxisChannel {
    fn new(config: &AxisConfig, high_resolution: bool) -> Self {
        let mut kind = config.kind;
        let mut output_range = config.output_range;

        if high_resolution && kind == EventKind::ControlChange {
            kind = EventKind::ControlChange14;
            output_range = FULL_RESOLUTION_OUTPUT_RANGE;
        }

        Self {
            input_min: config.input_min,
            input_range: f64::from(config.input_max) - f64::from(config.input_min),
            output_min: config.output_min,
            output_range: f64::from(output_range),
            kind,
            target: config.target,
            last_value: None,
            observed_min: i16::MAX,
            observed_max: i16::MIN + 1,
        }
    }

    /// Message kind this axis emits.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Controller number (0 for pitch bend).
    #[must_use]
    pub fn target(&self) -> u8 {
        self.target
    }

    /// Output lower bound.
    #[must_use]
    pub fn output_min(&self) -> i32 {
        self.output_min
    }

    /// Output span.
    #[must_use]
    pub fn output_range(&self) -> i32 {
        self.output_range as i32
    }

    /// Last emitted value, `None` before the first emission.
    #[must_use]
    pub fn last_value(&self) -> Option<i32> {
        self.last_value
    }

    /// Raw range seen so far, as `(min, max)`.
    ///
    /// Only tracked while diagnostics are enabled.
    #[must_use]
    pub fn observed_range(&self) -> (i16, i16) {
        (self.observed_min, self.observed_max)
    }

    /// Scales a raw sample without touching any state.
    #[must_use]
    pub fn scale(&self, raw: i16) -> i32 {
        scale(
            i32::from(raw),
            self.input_min,
            self.input_range,
            self.output_min,
            self.output_range,
        )
    }

    /// Scales a raw sample and records it as emitted if it changed.
    ///
    /// Returns the new value when it differs from the last emitted one,
    /// `None` when the sample would repeat it.
    pub fn update(&mut self, raw: i16) -> Option<i32> {
        let value = self.scale(raw);
        if self.last_value == Some(value) {
            return None;
        }
        self.last_value = Some(value);
        Some(value)
    }

    /// Widens the observed raw range to include `raw`.
    pub fn observe(&mut self, raw: i16) {
        self.observed_min = self.observed_min.min(raw);
        self.observed_max = self.observed_max.max(raw);
    }
}

/// Fixed table of [`MAX_AXES`] axis slots.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTable {
    channels: [AxisChannel; MAX_AXES],
}

impl AxisTable {
    /// Builds the runtime table from parsed configuration.
    ///
    /// With `high_resolution`, every 7-bit control change axis becomes a
    /// 14-bit control change with output span 16383. Pitch bend axes are
    /// already 14-bit and stay as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::axis::spec::AxisConfigs;
    /// use joy_midi_bridge::axis::table::AxisTable;
    /// use joy_midi_bridge::axis::EventKind;
    ///
    /// let table = AxisTable::new(&AxisConfigs::default(), true);
    /// assert_eq!(table.get(0).unwrap().kind(), EventKind::ControlChange14);
    /// assert_eq!(table.get(0).unwrap().output_range(), 16383);
    /// ```
    #[must_use]
    pub fn new(configs: &AxisConfigs, high_resolution: bool) -> Self {
        Self {
            channels: std::array::from_fn(|axis| AxisChannel::new(&configs[axis], high_resolution)),
        }
    }

    /// Axis at `index`, or `None` if the index has no slot.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AxisChannel> {
        self.channels.get(index)
    }

    /// Mutable axis at `index`, or `None` if the index has no slot.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut AxisChannel> {
        self.channels.get_mut(index)
    }

    /// Iterates over all axes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &AxisChannel> {
        self.channels.iter()
    }
}
