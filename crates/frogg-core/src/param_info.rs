//! Parameter introspection for discoverable engine parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let a host discover and manipulate parameters at runtime:
//!
//! - **CLI hosts**: list parameters and map flags onto them
//! - **State persistence**: save and restore parameters by stable key
//! - **Shared parameter stores**: clamp values written from a control thread
//!
//! # Design
//!
//! Parameters are accessed by zero-based index. Each parameter is described by
//! a [`ParamDescriptor`] carrying its display name, range, default, a stable
//! numeric [`ParamId`] and a stable string key used for persistence.
//!
//! # Example
//!
//! ```rust
//! use frogg_core::{ParameterInfo, ParamDescriptor, ParamId, ParamUnit};
//!
//! struct Tremolo {
//!     rate: f32,
//! }
//!
//! impl ParameterInfo for Tremolo {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::rate_hz(0.1, 20.0, 5.0)
//!                 .with_id(ParamId(1), "rate")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.rate,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.rate = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut trem = Tremolo { rate: 5.0 };
//! trem.set_param(0, 100.0);
//! assert_eq!(trem.get_param(0), 20.0);
//! assert_eq!(trem.find_param_by_key("rate"), Some(0));
//! ```

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\] space.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
/// The modulation engine uses 100..=105.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// Use [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use frogg_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the instance. Use [`param_count`](Self::param_count) to
/// determine valid indices.
pub trait ParameterInfo {
    /// Returns the number of parameters exposed.
    ///
    /// Valid parameter indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp the value to the descriptor's range and ignore
    /// out-of-range indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Find a parameter index by its persistence key ([`ParamDescriptor::string_id`]).
    ///
    /// Keys are matched exactly.
    fn find_param_by_key(&self, key: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.string_id == key))
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Example
///
/// ```rust
/// use frogg_core::{ParamDescriptor, ParamId, ParamUnit};
///
/// let depth = ParamDescriptor::custom("Depth", "Depth", 0.0, 1.0, 0.5)
///     .with_id(ParamId(101), "depth");
///
/// assert_eq!(depth.unit, ParamUnit::None);
/// assert_eq!(depth.clamp(1.5), 1.0);
/// assert_eq!(depth.string_id, "depth");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Dry Wet", "Phase Offset").
    pub name: &'static str,

    /// Short name, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the engine is initialized.
    pub default: f32,

    /// Recommended step increment.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable string key used for persistence and CLI lookup.
    ///
    /// Default: `""` (unassigned).
    pub string_id: &'static str,

    /// Normalization curve. Default: [`ParamScale::Linear`].
    pub scale: ParamScale,

    /// Capability flags. Default: [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,

    /// Display labels for stepped parameters, indexed by integer value.
    pub step_labels: Option<&'static [&'static str]>,
}

impl ParamDescriptor {
    /// Dimensionless parameter with custom name and range.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            step_labels: None,
        }
    }

    /// Standard LFO rate parameter in Hz.
    ///
    /// Uses logarithmic scaling for perceptually uniform rate control.
    pub const fn rate_hz(min: f32, max: f32, default: f32) -> Self {
        Self {
            name: "Rate",
            short_name: "Rate",
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 0.05,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
            step_labels: None,
        }
    }

    /// Sets the stable parameter ID and string key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use frogg_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::custom("Dry Wet", "Mix", 0.0, 1.0, 0.5)
    ///     .with_id(ParamId(100), "drywet");
    /// assert_eq!(desc.id, ParamId(100));
    /// assert_eq!(desc.string_id, "drywet");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the labels shown for each integer step.
    pub const fn with_step_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.step_labels = Some(labels);
        self
    }

    /// Label for a stepped value, if this descriptor has labels.
    ///
    /// ```rust
    /// use frogg_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::custom("Type", "Type", 0.0, 1.0, 1.0)
    ///     .with_step_labels(&["Chorus", "Flanger"]);
    /// assert_eq!(desc.step_label(1.0), Some("Flanger"));
    /// assert_eq!(desc.step_label(0.2), Some("Chorus"));
    /// ```
    pub fn step_label(&self, value: f32) -> Option<&'static str> {
        let labels = self.step_labels?;
        let index = libm::roundf(self.clamp(value) - self.min);
        if index < 0.0 {
            return None;
        }
        labels.get(index as usize).copied()
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use frogg_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::custom("Feedback", "Fdbk", 0.0, 0.98, 0.5);
    /// assert_eq!(desc.clamp(0.3), 0.3);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(2.0), 0.98);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// Respects the parameter's [`ParamScale`]:
    /// - **Linear**: `(value - min) / (max - min)`
    /// - **Logarithmic**: `ln(value/min) / ln(max/min)`, requires `min > 0`
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - LFO rate.
    Hertz,

    /// Cycles - phase offsets measured in LFO periods.
    Cycles,

    /// No unit - for dimensionless or custom parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use frogg_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Cycles => " cyc",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestProcessor {
        rate: f32,
        amount: f32,
    }

    impl TestProcessor {
        fn new() -> Self {
            Self {
                rate: 1.0,
                amount: 0.5,
            }
        }
    }

    impl ParameterInfo for TestProcessor {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::rate_hz(0.1, 20.0, 1.0).with_id(ParamId(10), "rate")),
                1 => Some(
                    ParamDescriptor::custom("Amount", "Amt", 0.0, 1.0, 0.5)
                        .with_id(ParamId(11), "amount"),
                ),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.rate,
                1 => self.amount,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            match index {
                0 => self.rate = desc.clamp(value),
                1 => self.amount = desc.clamp(value),
                _ => {}
            }
        }
    }

    #[test]
    fn test_param_lookup() {
        let proc = TestProcessor::new();
        assert_eq!(proc.find_param_by_name("rate"), Some(0));
        assert_eq!(proc.find_param_by_name("AMT"), Some(1));
        assert_eq!(proc.find_param_by_name("missing"), None);

        assert_eq!(proc.find_param_by_key("amount"), Some(1));
        assert_eq!(proc.find_param_by_key("Amount"), None);

        assert_eq!(proc.param_index_by_id(ParamId(10)), Some(0));
        assert_eq!(proc.param_index_by_id(ParamId(99)), None);
    }

    #[test]
    fn test_set_param_clamps() {
        let mut proc = TestProcessor::new();
        proc.set_param(0, 50.0);
        assert_eq!(proc.get_param(0), 20.0);
        proc.set_param(1, -3.0);
        assert_eq!(proc.get_param(1), 0.0);

        // Out-of-range index is ignored
        proc.set_param(7, 1.0);
        assert_eq!(proc.get_param(7), 0.0);
    }

    #[test]
    fn test_clamp_nan_to_default() {
        let desc = ParamDescriptor::custom("Depth", "Depth", 0.0, 1.0, 0.5);
        assert_eq!(desc.clamp(f32::NAN), 0.5);
        assert_eq!(desc.clamp(f32::INFINITY), 1.0);
        assert_eq!(desc.clamp(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_linear_normalize_round_trip() {
        let desc = ParamDescriptor::custom("Phase Offset", "Phase", 0.0, 1.1, 0.5);
        assert_eq!(desc.normalize(0.0), 0.0);
        assert!((desc.normalize(1.1) - 1.0).abs() < 1e-6);
        assert!((desc.denormalize(desc.normalize(0.55)) - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_logarithmic_normalize() {
        let desc = ParamDescriptor::rate_hz(0.1, 20.0, 10.0);
        assert_eq!(desc.scale, ParamScale::Logarithmic);
        assert!(desc.normalize(0.1).abs() < 1e-6);
        assert!((desc.normalize(20.0) - 1.0).abs() < 1e-5);
        assert!((desc.denormalize(0.5) - libm::sqrtf(0.1 * 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_range_normalizes_to_zero() {
        let desc = ParamDescriptor::custom("Fixed", "Fixed", 1.0, 1.0, 1.0);
        assert_eq!(desc.normalize(1.0), 0.0);
    }

    #[test]
    fn test_step_labels() {
        let desc = ParamDescriptor::custom("Type", "Type", 0.0, 1.0, 1.0)
            .with_step(1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
            .with_step_labels(&["Chorus", "Flanger"]);

        assert_eq!(desc.step_label(0.0), Some("Chorus"));
        assert_eq!(desc.step_label(0.7), Some("Flanger"));
        assert_eq!(desc.step_label(5.0), Some("Flanger"));
        assert!(desc.flags.contains(ParamFlags::STEPPED));

        let plain = ParamDescriptor::custom("Depth", "Depth", 0.0, 1.0, 0.5);
        assert_eq!(plain.step_label(0.5), None);
    }

    #[test]
    fn test_default_flags() {
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
        assert!(!ParamFlags::NONE.contains(ParamFlags::AUTOMATABLE));
    }
}
