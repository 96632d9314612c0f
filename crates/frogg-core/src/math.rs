//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`lerp`] - Linear interpolation between two samples
//! - [`map_range`] - Linear mapping of one range onto another
//! - [`wet_dry_mix`] - Crossfade between dry and processed signal
//! - [`flush_denormal`] - Keep feedback paths out of the subnormal range

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
///
/// # Returns
/// Interpolated value. `t = 0.0` returns `a` exactly.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `value` linearly from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// `out_lo + (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)`.
/// Values outside the input range extrapolate; nothing is clamped.
///
/// # Example
/// ```rust
/// use frogg_core::map_range;
///
/// assert_eq!(map_range(0.0, -1.0, 1.0, 0.0, 10.0), 5.0);
/// assert_eq!(map_range(-1.0, -1.0, 1.0, 0.001, 0.005), 0.001);
/// ```
#[inline]
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
}

/// Crossfade between dry and wet signals.
///
/// Computes `dry * (1 - mix) + wet * mix`. At `mix = 0.0` the result is
/// exactly `dry`, at `mix = 1.0` exactly `wet`.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, well before the IEEE 754 subnormal
/// range begins. Used on the feedback path, where a signal decays toward
/// zero indefinitely.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
