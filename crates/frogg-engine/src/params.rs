//! Control parameters of the modulation engine.
//!
//! [`ModulationParams`] is the plain value set the engine reads once per
//! block. Its [`ParameterInfo`] implementation describes the six parameters
//! (range, default, stable id and persistence key) for hosts and for the
//! shared atomic store in [`crate::shared`].
//!
//! | idx | key | range | default |
//! |-----|-----|-------|---------|
//! | 0 | `drywet` | 0 – 1 | 0.5 |
//! | 1 | `depth` | 0 – 1 | 0.5 |
//! | 2 | `rate` | 0.1 – 20 Hz | 10.0 |
//! | 3 | `phaseoffset` | 0 – 1.1 cycles | 0.5 |
//! | 4 | `feedback` | 0 – 0.98 | 0.5 |
//! | 5 | `type` | 0 (Chorus) / 1 (Flanger) | 1 |

use frogg_core::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo, map_range};

/// Delay-time mapping selected by the `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModulationType {
    /// 5 – 30 ms modulated delay.
    Chorus,
    /// 1 – 5 ms modulated delay.
    #[default]
    Flanger,
}

/// Display labels indexed by [`ModulationType::index`].
pub const MODULATION_TYPE_LABELS: &[&str] = &["Chorus", "Flanger"];

impl ModulationType {
    /// Variant for a parameter index, `None` when out of range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Chorus),
            1 => Some(Self::Flanger),
            _ => None,
        }
    }

    /// Variant for a continuous parameter value, rounded to the nearest index.
    ///
    /// ```rust
    /// use frogg_engine::ModulationType;
    ///
    /// assert_eq!(ModulationType::from_value(0.2), ModulationType::Chorus);
    /// assert_eq!(ModulationType::from_value(0.5), ModulationType::Flanger);
    /// assert_eq!(ModulationType::from_value(7.0), ModulationType::Flanger);
    /// ```
    pub fn from_value(value: f32) -> Self {
        if value >= 0.5 { Self::Flanger } else { Self::Chorus }
    }

    /// Parameter index of this variant.
    pub const fn index(self) -> usize {
        match self {
            Self::Chorus => 0,
            Self::Flanger => 1,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        MODULATION_TYPE_LABELS[self.index()]
    }

    /// Delay-time range in seconds as `(min, max)`.
    pub const fn delay_range(self) -> (f64, f64) {
        match self {
            Self::Chorus => (0.005, 0.03),
            Self::Flanger => (0.001, 0.005),
        }
    }

    /// Delay time in seconds for a (depth-scaled) LFO value in `[-1, 1]`.
    ///
    /// Linear map of `[-1, 1]` onto [`delay_range`](Self::delay_range).
    ///
    /// ```rust
    /// use frogg_engine::ModulationType;
    ///
    /// assert!((ModulationType::Chorus.delay_seconds(0.0) - 0.0175).abs() < 1e-12);
    /// assert!((ModulationType::Flanger.delay_seconds(-1.0) - 0.001).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn delay_seconds(self, lfo: f64) -> f64 {
        let (lo, hi) = self.delay_range();
        map_range(lfo, -1.0, 1.0, lo, hi)
    }
}

impl core::fmt::Display for ModulationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of engine parameters.
pub const PARAM_COUNT: usize = 6;

/// Index of the dry/wet parameter.
pub const DRY_WET: usize = 0;
/// Index of the depth parameter.
pub const DEPTH: usize = 1;
/// Index of the LFO rate parameter.
pub const RATE: usize = 2;
/// Index of the right-channel phase offset parameter.
pub const PHASE_OFFSET: usize = 3;
/// Index of the feedback parameter.
pub const FEEDBACK: usize = 4;
/// Index of the modulation type parameter.
pub const TYPE: usize = 5;

/// Descriptors of every engine parameter, in index order.
pub static PARAM_DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::custom("Dry Wet", "Mix", 0.0, 1.0, 0.5).with_id(ParamId(100), "drywet"),
    ParamDescriptor::custom("Depth", "Depth", 0.0, 1.0, 0.5).with_id(ParamId(101), "depth"),
    ParamDescriptor::rate_hz(0.1, 20.0, 10.0).with_id(ParamId(102), "rate"),
    ParamDescriptor::custom("Phase Offset", "Phase", 0.0, 1.1, 0.5)
        .with_unit(ParamUnit::Cycles)
        .with_id(ParamId(103), "phaseoffset"),
    ParamDescriptor::custom("Feedback", "Fdbk", 0.0, 0.98, 0.5).with_id(ParamId(104), "feedback"),
    ParamDescriptor::custom("Type", "Type", 0.0, 1.0, 1.0)
        .with_step(1.0)
        .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
        .with_step_labels(MODULATION_TYPE_LABELS)
        .with_id(ParamId(105), "type"),
];

/// One block's worth of control parameters.
///
/// # Example
///
/// ```rust
/// use frogg_engine::{ModulationParams, ModulationType};
///
/// let params = ModulationParams {
///     mod_type: ModulationType::Chorus,
///     feedback: 3.0,
///     ..ModulationParams::default()
/// }
/// .clamped();
///
/// assert_eq!(params.feedback, 0.98);
/// assert_eq!(params.rate, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationParams {
    /// 0 = fully dry, 1 = fully wet.
    pub dry_wet: f32,
    /// LFO amplitude scale.
    pub depth: f32,
    /// LFO frequency in Hz.
    pub rate: f32,
    /// Right-channel LFO phase offset in cycles.
    pub phase_offset: f32,
    /// Gain applied to the delayed sample fed back into the delay line.
    pub feedback: f32,
    /// Delay-time mapping.
    pub mod_type: ModulationType,
}

impl Default for ModulationParams {
    fn default() -> Self {
        Self {
            dry_wet: PARAM_DESCRIPTORS[DRY_WET].default,
            depth: PARAM_DESCRIPTORS[DEPTH].default,
            rate: PARAM_DESCRIPTORS[RATE].default,
            phase_offset: PARAM_DESCRIPTORS[PHASE_OFFSET].default,
            feedback: PARAM_DESCRIPTORS[FEEDBACK].default,
            mod_type: ModulationType::default(),
        }
    }
}

impl ModulationParams {
    /// Copy with every field inside its declared range.
    ///
    /// NaN fields fall back to their defaults.
    pub fn clamped(&self) -> Self {
        Self {
            dry_wet: PARAM_DESCRIPTORS[DRY_WET].clamp(self.dry_wet),
            depth: PARAM_DESCRIPTORS[DEPTH].clamp(self.depth),
            rate: PARAM_DESCRIPTORS[RATE].clamp(self.rate),
            phase_offset: PARAM_DESCRIPTORS[PHASE_OFFSET].clamp(self.phase_offset),
            feedback: PARAM_DESCRIPTORS[FEEDBACK].clamp(self.feedback),
            mod_type: self.mod_type,
        }
    }
}

impl ParameterInfo for ModulationParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            DRY_WET => self.dry_wet,
            DEPTH => self.depth,
            RATE => self.rate,
            PHASE_OFFSET => self.phase_offset,
            FEEDBACK => self.feedback,
            TYPE => self.mod_type.index() as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = PARAM_DESCRIPTORS.get(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            DRY_WET => self.dry_wet = value,
            DEPTH => self.depth = value,
            RATE => self.rate = value,
            PHASE_OFFSET => self.phase_offset = value,
            FEEDBACK => self.feedback = value,
            TYPE => self.mod_type = ModulationType::from_value(value),
            _ => {}
        }
    }
}
