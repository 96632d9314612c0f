//! Stereo chorus/flanger modulation engine.
//!
//! One sine LFO drives a modulated delay on each channel. The right channel
//! reads the LFO at a configurable phase offset, which is what spreads the
//! effect across the stereo field.
//!
//! # Signal Flow (per sample)
//!
//! ```text
//!            ┌──────────── feedback ◄──────────┐
//!            ▼                                 │
//! in ──►(+)──► DelayLine[write_head]   read(write_head - delay) ──► delayed
//!  │                                                                 │
//!  └────────────────────────────► wet_dry_mix(in, delayed, dry_wet) ◄┘──► out
//! ```
//!
//! Per sample, in order:
//!
//! 1. Write `input + feedback` into each delay line at the shared write head
//! 2. Read the LFO: left at the current phase, right at phase + offset
//! 3. Advance the LFO phase by `rate / sample_rate`
//! 4. Scale both LFO values by `depth`
//! 5. Map `[-1, 1]` onto the delay range of the modulation type
//! 6. Convert seconds to samples
//! 7. Wrap `write_head - delay` into the buffer
//! 8. Read the interpolated delayed sample
//! 9. Store `delayed * feedback` for the next sample
//! 10. Advance the write head
//! 11. Mix dry and delayed into the output, in place
//!
//! Because the write happens before the read, a fed-back sample re-enters the
//! line one sample after it was read: successive feedback echoes are spaced
//! `delay + 1` samples apart.

use frogg_core::{DelayLine, Lfo, buffer_len_for, flush_denormal, wet_dry_mix, wrap_read_head};
use libm::ceil;

use crate::error::EngineError;
use crate::params::{ModulationParams, ModulationType};

/// Delay buffer length used by hosts that don't choose one, in seconds.
pub const DEFAULT_MAX_DELAY_SECONDS: f64 = 2.0;

/// Convert a delay time in seconds to a (fractional) number of samples.
///
/// ```rust
/// use frogg_engine::delay_in_samples;
///
/// assert!((delay_in_samples(0.0175, 48000.0) - 840.0).abs() < 1e-9);
/// ```
#[inline]
pub fn delay_in_samples(seconds: f64, sample_rate: f64) -> f64 {
    seconds * sample_rate
}

/// Smallest delay buffer that holds the longest modulated delay at
/// `sample_rate`, plus one sample for the interpolation neighbour.
pub fn required_buffer_len(sample_rate: f64) -> usize {
    let (_, longest) = ModulationType::Chorus.delay_range();
    (ceil(delay_in_samples(longest, sample_rate)) as usize).saturating_add(1)
}

/// Longest delay line `prepare` will allocate, in samples per channel.
///
/// 2^24 samples (64 MiB per channel) holds 87 s at 192 kHz.
pub const MAX_BUFFER_LEN: usize = 1 << 24;

/// Everything the engine owns once it has a sample rate.
#[derive(Debug, Clone)]
struct Prepared {
    left: DelayLine,
    right: DelayLine,
    /// Shared by both channels.
    write_head: usize,
    lfo: Lfo,
    feedback_left: f32,
    feedback_right: f32,
    sample_rate: f64,
}

impl Prepared {
    fn new(len: usize, sample_rate: f64) -> Self {
        Self {
            left: DelayLine::with_len(len),
            right: DelayLine::with_len(len),
            write_head: 0,
            lfo: Lfo::new(),
            feedback_left: 0.0,
            feedback_right: 0.0,
            sample_rate,
        }
    }

    /// Reallocate both lines at `len` and start over from silence.
    fn reprepare(&mut self, len: usize, sample_rate: f64) {
        self.left.resize(len);
        self.right.resize(len);
        self.write_head = 0;
        self.lfo.reset();
        self.feedback_left = 0.0;
        self.feedback_right = 0.0;
        self.sample_rate = sample_rate;
    }

    fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.write_head = 0;
        self.lfo.reset();
        self.feedback_left = 0.0;
        self.feedback_right = 0.0;
    }

    fn process_block(&mut self, left: &mut [f32], right: &mut [f32], params: &ModulationParams) {
        let params = params.clamped();
        let len = self.left.len();
        let sample_rate = self.sample_rate;
        let increment = f64::from(params.rate) / sample_rate;
        let depth = f64::from(params.depth);
        let offset = f64::from(params.phase_offset);
        let mod_type = params.mod_type;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let in_l = *l;
            let in_r = *r;

            self.left.write(self.write_head, in_l + self.feedback_left);
            self.right.write(self.write_head, in_r + self.feedback_right);

            let lfo_l = self.lfo.sine();
            let lfo_r = self.lfo.sine_with_offset(offset);
            self.lfo.advance(increment);

            let delay_l = delay_in_samples(mod_type.delay_seconds(lfo_l * depth), sample_rate);
            let delay_r = delay_in_samples(mod_type.delay_seconds(lfo_r * depth), sample_rate);

            let head = self.write_head as f64;
            let delayed_l = self.left.read_interpolated(wrap_read_head(head - delay_l, len));
            let delayed_r = self.right.read_interpolated(wrap_read_head(head - delay_r, len));

            self.feedback_left = flush_denormal(delayed_l * params.feedback);
            self.feedback_right = flush_denormal(delayed_r * params.feedback);

            self.write_head += 1;
            if self.write_head >= len {
                self.write_head = 0;
            }

            *l = wet_dry_mix(in_l, delayed_l, params.dry_wet);
            *r = wet_dry_mix(in_r, delayed_r, params.dry_wet);
        }
    }
}

#[derive(Debug, Clone, Default)]
enum EngineState {
    #[default]
    Unprepared,
    Prepared(Prepared),
}

/// Stereo chorus/flanger engine.
///
/// Starts unprepared. [`prepare`](Self::prepare) allocates the delay lines
/// for a sample rate; [`process`](Self::process) then runs blocks of audio in
/// place without allocating. [`release`](Self::release) frees the buffers.
///
/// # Example
///
/// ```rust
/// use frogg_engine::{ModulationEngine, ModulationParams};
///
/// let mut engine = ModulationEngine::new();
/// engine.prepare(48000.0, 2.0).unwrap();
///
/// let mut left = vec![0.5f32; 256];
/// let mut right = vec![0.5f32; 256];
/// engine.process(&mut left, &mut right, &ModulationParams::default()).unwrap();
///
/// assert_eq!(engine.write_head(), 256);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModulationEngine {
    state: EngineState,
}

impl ModulationEngine {
    /// Create an unprepared engine.
    pub fn new() -> Self {
        Self {
            state: EngineState::Unprepared,
        }
    }

    /// Allocate and zero the delay lines for `sample_rate`.
    ///
    /// Valid from either state. Calling it again reallocates the buffers and
    /// resets the write head, LFO phase and feedback, even at the same rate.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidSampleRate`] if `sample_rate` is not finite and positive
    /// - [`EngineError::InvalidMaxDelay`] if `max_delay_seconds` is not finite
    /// - [`EngineError::DelayBufferTooShort`] if `max_delay_seconds` gives a
    ///   buffer shorter than the longest chorus delay needs
    /// - [`EngineError::DelayBufferTooLong`] if the buffer would exceed
    ///   [`MAX_BUFFER_LEN`] samples
    ///
    /// On error the engine keeps its previous state.
    pub fn prepare(&mut self, sample_rate: f64, max_delay_seconds: f64) -> Result<(), EngineError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if !max_delay_seconds.is_finite() {
            return Err(EngineError::InvalidMaxDelay(max_delay_seconds));
        }

        let available = buffer_len_for(sample_rate, max_delay_seconds);
        let required = required_buffer_len(sample_rate);
        if available < required {
            return Err(EngineError::DelayBufferTooShort {
                required,
                available,
            });
        }
        if available > MAX_BUFFER_LEN {
            return Err(EngineError::DelayBufferTooLong {
                requested: available,
                limit: MAX_BUFFER_LEN,
            });
        }

        match &mut self.state {
            EngineState::Prepared(prepared) => prepared.reprepare(available, sample_rate),
            EngineState::Unprepared => {
                self.state = EngineState::Prepared(Prepared::new(available, sample_rate));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("engine_prepare: {sample_rate} Hz, {available} sample delay lines");

        Ok(())
    }

    /// Free the delay lines and return to the unprepared state.
    pub fn release(&mut self) {
        if matches!(self.state, EngineState::Prepared(_)) {
            #[cfg(feature = "tracing")]
            tracing::debug!("engine_release");
        }
        self.state = EngineState::Unprepared;
    }

    /// Zero the delay lines, write head, LFO phase and feedback without
    /// reallocating. No-op when unprepared.
    pub fn reset(&mut self) {
        if let EngineState::Prepared(prepared) = &mut self.state {
            prepared.reset();
        }
    }

    /// Process one block of stereo audio in place.
    ///
    /// `params` are clamped to their ranges once per block.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Unprepared`] before [`prepare`](Self::prepare)
    /// - [`EngineError::ChannelLengthMismatch`] if the slices differ in length
    ///
    /// Neither error touches the audio or the engine state.
    pub fn process(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        params: &ModulationParams,
    ) -> Result<(), EngineError> {
        let EngineState::Prepared(prepared) = &mut self.state else {
            return Err(EngineError::Unprepared);
        };
        if left.len() != right.len() {
            return Err(EngineError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        prepared.process_block(left, right, params);
        Ok(())
    }

    /// Returns `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        matches!(self.state, EngineState::Prepared(_))
    }

    /// Sample rate of the last successful prepare.
    pub fn sample_rate(&self) -> Option<f64> {
        match &self.state {
            EngineState::Prepared(p) => Some(p.sample_rate),
            EngineState::Unprepared => None,
        }
    }

    /// Length of each delay line in samples, 0 when unprepared.
    pub fn buffer_len(&self) -> usize {
        match &self.state {
            EngineState::Prepared(p) => p.left.len(),
            EngineState::Unprepared => 0,
        }
    }

    /// Current LFO phase in `[0, 1)`.
    pub fn lfo_phase(&self) -> f64 {
        match &self.state {
            EngineState::Prepared(p) => p.lfo.phase(),
            EngineState::Unprepared => 0.0,
        }
    }

    /// Current write head, in `[0, buffer_len())`.
    pub fn write_head(&self) -> usize {
        match &self.state {
            EngineState::Prepared(p) => p.write_head,
            EngineState::Unprepared => 0,
        }
    }
}
