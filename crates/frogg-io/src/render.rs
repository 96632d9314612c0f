//! Offline block renderer: plays the host role for whole files.
//!
//! A real-time host calls the engine once per audio callback with whatever
//! parameters the control thread last published. [`OfflineRenderer`] does
//! the same over an in-memory file: it slices the audio into fixed-size
//! blocks and takes one [`SharedParams::snapshot`] before each block, so a
//! control thread can automate parameters while a render is running.

use std::sync::Arc;

use frogg_engine::{EngineError, ModulationEngine, SharedParams};

use crate::Result;
use crate::wav::StereoSamples;

/// Block size used when none is given, in samples per channel.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Renders [`StereoSamples`] through a [`ModulationEngine`] block by block.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use frogg_engine::{ModulationParams, SharedParams};
/// use frogg_io::{OfflineRenderer, StereoSamples};
///
/// let params = Arc::new(SharedParams::new(&ModulationParams {
///     dry_wet: 0.0,
///     ..ModulationParams::default()
/// }));
/// let mut renderer = OfflineRenderer::new(48000.0, 2.0, params).unwrap();
///
/// let mut audio = StereoSamples::from_mono(vec![0.25; 2000]);
/// renderer.render(&mut audio).unwrap();
/// assert!(audio.left.iter().all(|&s| s == 0.25));
/// ```
#[derive(Debug)]
pub struct OfflineRenderer {
    engine: ModulationEngine,
    params: Arc<SharedParams>,
    block_size: usize,
}

impl OfflineRenderer {
    /// Create a renderer with an engine prepared at `sample_rate`.
    pub fn new(
        sample_rate: f64,
        max_delay_seconds: f64,
        params: Arc<SharedParams>,
    ) -> Result<Self> {
        let mut engine = ModulationEngine::new();
        engine.prepare(sample_rate, max_delay_seconds)?;
        tracing::debug!(
            sample_rate,
            buffer_len = engine.buffer_len(),
            "offline renderer ready"
        );
        Ok(Self {
            engine,
            params,
            block_size: DEFAULT_BLOCK_SIZE,
        })
    }

    /// Set the block size (clamped to at least 1 sample).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Samples per channel handed to the engine per call.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The shared parameter store read before every block.
    pub fn params(&self) -> &Arc<SharedParams> {
        &self.params
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &ModulationEngine {
        &self.engine
    }

    /// Clear the engine's delay lines, LFO and feedback between renders.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Process `samples` in place.
    pub fn render(&mut self, samples: &mut StereoSamples) -> Result<()> {
        self.render_with_progress(samples, |_, _| {})
    }

    /// Process `samples` in place, calling `progress(done, total)` after
    /// every block with frame counts.
    ///
    /// # Errors
    ///
    /// Channels of different lengths fail with
    /// [`EngineError::ChannelLengthMismatch`] before any block is processed.
    pub fn render_with_progress<F>(
        &mut self,
        samples: &mut StereoSamples,
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        if samples.left.len() != samples.right.len() {
            return Err(EngineError::ChannelLengthMismatch {
                left: samples.left.len(),
                right: samples.right.len(),
            }
            .into());
        }

        let total = samples.len();
        let mut done = 0;

        for (left, right) in samples
            .left
            .chunks_mut(self.block_size)
            .zip(samples.right.chunks_mut(self.block_size))
        {
            let params = self.params.snapshot();
            self.engine.process(left, right, &params)?;
            done += left.len();
            progress(done, total);
        }

        tracing::debug!(frames = done, block_size = self.block_size, "render complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frogg_engine::{ModulationParams, ModulationType};

    fn impulse(len: usize) -> StereoSamples {
        let mut mono = vec![0.0f32; len];
        mono[0] = 1.0;
        StereoSamples::from_mono(mono)
    }

    #[test]
    fn test_render_matches_engine_delay() {
        let params = Arc::new(SharedParams::new(&ModulationParams {
            dry_wet: 1.0,
            depth: 0.0,
            feedback: 0.0,
            mod_type: ModulationType::Chorus,
            ..ModulationParams::default()
        }));
        let mut renderer = OfflineRenderer::new(48000.0, 2.0, params)
            .unwrap()
            .with_block_size(100);

        let mut audio = impulse(1000);
        renderer.render(&mut audio).unwrap();
        assert!((audio.left[840] - 1.0).abs() < 1e-5);
        assert!((audio.right[840] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_progress_reports_every_block() {
        let mut renderer = OfflineRenderer::new(44100.0, 2.0, Arc::new(SharedParams::default()))
            .unwrap()
            .with_block_size(64);

        let mut calls = Vec::new();
        let mut audio = StereoSamples::silence(200);
        renderer
            .render_with_progress(&mut audio, |done, total| calls.push((done, total)))
            .unwrap();

        assert_eq!(calls, vec![(64, 200), (128, 200), (192, 200), (200, 200)]);
    }

    #[test]
    fn test_parameter_change_between_renders() {
        let params = Arc::new(SharedParams::new(&ModulationParams {
            dry_wet: 0.0,
            ..ModulationParams::default()
        }));
        let mut renderer = OfflineRenderer::new(48000.0, 2.0, Arc::clone(&params)).unwrap();

        let mut audio = impulse(300);
        renderer.render(&mut audio).unwrap();
        assert_eq!(audio.left[0], 1.0);

        // Fully wet from the next block on
        params.set_value(frogg_engine::params::DRY_WET, 1.0);
        renderer.reset();
        let mut audio = impulse(300);
        renderer.render(&mut audio).unwrap();
        assert_eq!(audio.left[0], 0.0);
    }

    #[test]
    fn test_zero_block_size_clamped() {
        let renderer = OfflineRenderer::new(48000.0, 2.0, Arc::new(SharedParams::default()))
            .unwrap()
            .with_block_size(0);
        assert_eq!(renderer.block_size(), 1);
    }

    #[test]
    fn test_bad_sample_rate_is_engine_error() {
        let err = OfflineRenderer::new(0.0, 2.0, Arc::new(SharedParams::default())).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Engine(EngineError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_mismatched_channels_rejected() {
        let mut renderer = OfflineRenderer::new(48000.0, 2.0, Arc::new(SharedParams::default()))
            .unwrap()
            .with_block_size(4);
        let mut audio = StereoSamples {
            left: vec![0.0; 10],
            right: vec![0.0; 7],
        };
        let err = renderer.render(&mut audio).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Engine(EngineError::ChannelLengthMismatch { left: 10, right: 7 })
        ));
    }

    #[test]
    fn test_mismatch_on_block_boundary_leaves_audio_untouched() {
        let params = Arc::new(SharedParams::new(&ModulationParams {
            dry_wet: 1.0,
            ..ModulationParams::default()
        }));
        let mut renderer = OfflineRenderer::new(48000.0, 2.0, params)
            .unwrap()
            .with_block_size(512);
        // Every block of the shorter channel is full length
        let mut audio = StereoSamples {
            left: vec![0.5; 1024],
            right: vec![0.5; 512],
        };

        let mut calls = Vec::new();
        let err = renderer
            .render_with_progress(&mut audio, |done, total| calls.push((done, total)))
            .unwrap_err();

        assert!(matches!(
            err,
            crate::Error::Engine(EngineError::ChannelLengthMismatch {
                left: 1024,
                right: 512
            })
        ));
        assert!(calls.is_empty());
        assert!(audio.left.iter().chain(&audio.right).all(|&s| s == 0.5));
        assert_eq!(renderer.engine().write_head(), 0);
    }
}
