//! Circular delay buffer for modulated-delay effects.
//!
//! Provides the per-channel ring buffer the chorus/flanger engine writes into
//! and reads back from with a fractional read head.
//!
//! # Ownership of the heads
//!
//! Unlike a self-advancing delay line, [`DelayLine`] does not track its own
//! write position. Both channels of a stereo engine share one write head, so
//! the engine owns that index and passes it to [`DelayLine::write`]. Reads take
//! an absolute, already wrapped buffer position (see [`wrap_read_head`]).
//!
//! # Use Cases
//!
//! | Effect | Delay Range | Modulation |
//! |--------|-------------|------------|
//! | Flanger | 1-5ms | Yes (LFO) |
//! | Chorus | 5-30ms | Yes (LFO) |
//!
//! The buffer itself is sized for up to two seconds by default, far longer
//! than either range, so a read head never has to wrap more than once.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;
use libm::{floor, round};

use crate::math::lerp;

/// Number of samples needed to hold `max_seconds` of audio at `sample_rate`.
///
/// Rounds to the nearest whole sample: 48 kHz × 2 s = 96000.
///
/// # Example
///
/// ```rust
/// use frogg_core::buffer_len_for;
///
/// assert_eq!(buffer_len_for(48000.0, 2.0), 96000);
/// assert_eq!(buffer_len_for(44100.0, 2.0), 88200);
/// ```
#[inline]
pub fn buffer_len_for(sample_rate: f64, max_seconds: f64) -> usize {
    let samples = round(sample_rate * max_seconds);
    if samples > 0.0 { samples as usize } else { 0 }
}

/// Bring a fractional read head into `[0, len)`.
///
/// A read head is computed as `write_head - delay_samples`. With any delay
/// shorter than the buffer this is at most one buffer length below zero, so
/// a single addition of `len` is enough. The result is additionally folded
/// when rounding lands exactly on `len` (e.g. `-1e-13 + 96000.0` rounds to
/// `96000.0`), which would otherwise index one past the end.
///
/// Positions further out of range than one buffer length are wrapped with a
/// true modulo; the engine never produces those with in-range parameters.
///
/// # Example
///
/// ```rust
/// use frogg_core::wrap_read_head;
///
/// assert_eq!(wrap_read_head(10.5, 100), 10.5);
/// assert_eq!(wrap_read_head(-0.5, 100), 99.5);
/// assert_eq!(wrap_read_head(-1e-13, 96000), 0.0);
/// ```
#[inline]
pub fn wrap_read_head(position: f64, len: usize) -> f64 {
    let len = len as f64;
    let mut wrapped = position;
    if wrapped < 0.0 {
        wrapped += len;
    }
    if !(0.0..len).contains(&wrapped) {
        wrapped %= len;
        if wrapped < 0.0 {
            wrapped += len;
        }
        if wrapped >= len {
            wrapped = 0.0;
        }
    }
    wrapped
}

/// Circular sample buffer with linear-interpolated reads (heap-allocated).
///
/// Created empty; [`resize`](Self::resize) allocates and zero-fills the
/// storage. Reads and writes never allocate.
///
/// # Example
///
/// ```rust
/// use frogg_core::DelayLine;
///
/// let mut line = DelayLine::with_len(8);
/// line.write(3, 1.0);
/// line.write(4, 3.0);
///
/// assert_eq!(line.read_interpolated(3.0), 1.0);
/// assert_eq!(line.read_interpolated(3.5), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    /// Circular buffer storage
    buffer: Vec<f32>,
}

impl DelayLine {
    /// Creates an empty delay line with no storage.
    ///
    /// Call [`resize`](Self::resize) before writing or reading.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates a zero-filled delay line holding `len` samples.
    pub fn with_len(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len],
        }
    }

    /// Reallocates the storage to `len` samples, all zero.
    ///
    /// The previous buffer is dropped even when the length is unchanged.
    pub fn resize(&mut self, len: usize) {
        self.buffer = vec![0.0; len];
    }

    /// Zero every sample without reallocating.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Number of samples the line holds.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the line has no storage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stores `value` at `index`.
    ///
    /// The caller guarantees `index < len()`.
    #[inline]
    pub fn write(&mut self, index: usize, value: f32) {
        debug_assert!(index < self.buffer.len(), "write index out of range");
        self.buffer[index] = value;
    }

    /// Returns the sample stored at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.buffer[index]
    }

    /// Reads the buffer at a fractional position with linear interpolation.
    ///
    /// `position` must already be wrapped into `[0, len())`. With
    /// `x0 = floor(position)`, `x1 = (x0 + 1) % len` and `frac = position - x0`
    /// this returns `buffer[x0] * (1 - frac) + buffer[x1] * frac`; an integer
    /// position returns `buffer[position]` exactly.
    #[inline]
    pub fn read_interpolated(&self, position: f64) -> f32 {
        let len = self.buffer.len();
        debug_assert!(
            position >= 0.0 && position < len as f64,
            "read position must be pre-wrapped"
        );

        let base = floor(position);
        let x0 = base as usize;
        let x1 = if x0 + 1 >= len { 0 } else { x0 + 1 };
        let frac = (position - base) as f32;

        lerp(self.buffer[x0], self.buffer[x1], frac)
    }
}
