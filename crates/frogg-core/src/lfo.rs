//! Low Frequency Oscillator for modulation effects.
//!
//! A sine phase accumulator shared by both channels of the chorus/flanger:
//! the left channel reads the LFO at its own phase, the right channel at the
//! same phase plus a per-block offset.
//!
//! Phase is kept in `f64`. At 192 kHz and 0.1 Hz the per-sample increment is
//! about 5e-7, which an `f32` accumulator near 1.0 would round visibly.

use core::f64::consts::TAU;
use libm::{floor, sin};

/// Wrap a phase (in cycles) into `[0, 1)`.
///
/// Works for any finite input, including offsets of more than one cycle
/// (the right-channel offset goes up to 1.1) and negative values.
///
/// # Example
///
/// ```rust
/// use frogg_core::wrap_phase;
///
/// assert_eq!(wrap_phase(0.25), 0.25);
/// assert_eq!(wrap_phase(1.0), 0.0);
/// assert!((wrap_phase(2.05) - 0.05).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase - floor(phase);
    // phase - floor(phase) can round up to 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Sine of a phase given in cycles: `sin(2π · phase)`.
#[inline]
pub fn sine_at(phase: f64) -> f64 {
    sin(TAU * phase)
}

/// Sine LFO phase accumulator.
///
/// The owner decides the increment each sample (`rate / sample_rate`), so a
/// rate change takes effect on the very next sample without any per-LFO
/// sample-rate bookkeeping.
///
/// # Example
///
/// ```rust
/// use frogg_core::Lfo;
///
/// let mut lfo = Lfo::new();
/// assert_eq!(lfo.sine(), 0.0);
///
/// // Quarter cycle later the sine peaks
/// lfo.advance(0.25);
/// assert!((lfo.sine() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f64,
}

impl Lfo {
    /// Create an LFO at phase 0.
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Jump to a specific phase (wrapped into `[0, 1)`).
    ///
    /// 0.0 = 0°, 0.25 = 90°, 0.5 = 180°, 0.75 = 270°
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = wrap_phase(phase);
    }

    /// Get current phase (0.0 - 1.0).
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance the phase by `increment` cycles and wrap.
    #[inline]
    pub fn advance(&mut self, increment: f64) {
        self.phase = wrap_phase(self.phase + increment);
    }

    /// Sine output at the current phase, in `[-1.0, 1.0]`.
    #[inline]
    pub fn sine(&self) -> f64 {
        sine_at(self.phase)
    }

    /// Sine output at the current phase plus `offset` cycles.
    #[inline]
    pub fn sine_with_offset(&self, offset: f64) -> f64 {
        sine_at(wrap_phase(self.phase + offset))
    }
}
