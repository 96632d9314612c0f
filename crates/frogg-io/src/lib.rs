//! Audio file I/O and offline rendering for frogg.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for
//!   loading/saving stereo audio, [`read_wav_info`] for headers only
//! - **Offline rendering**: [`OfflineRenderer`] runs a whole file through the
//!   modulation engine block by block, the way a host would
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use frogg_engine::SharedParams;
//! use frogg_io::{OfflineRenderer, read_wav_stereo, write_wav_stereo};
//!
//! # fn main() -> frogg_io::Result<()> {
//! let (mut samples, spec) = read_wav_stereo("input.wav")?;
//!
//! let params = Arc::new(SharedParams::default());
//! let mut renderer = OfflineRenderer::new(f64::from(spec.sample_rate), 2.0, params)?;
//! renderer.render(&mut samples)?;
//!
//! write_wav_stereo("output.wav", &samples, spec)?;
//! # Ok(())
//! # }
//! ```

mod render;
mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, OfflineRenderer};
pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The modulation engine rejected a call.
    #[error("engine error: {0}")]
    Engine(#[from] frogg_engine::EngineError),

    /// The requested output bit depth cannot be written.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
