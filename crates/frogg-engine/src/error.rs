//! Errors returned by the modulation engine.

/// Errors from [`ModulationEngine`](crate::ModulationEngine) lifecycle and
/// processing calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// `process` was called before `prepare` (or after `release`).
    Unprepared,
    /// The left and right channel slices have different lengths.
    ChannelLengthMismatch {
        /// Samples in the left slice.
        left: usize,
        /// Samples in the right slice.
        right: usize,
    },
    /// The sample rate is zero, negative, NaN or infinite.
    InvalidSampleRate(f64),
    /// The maximum delay time is NaN or infinite.
    InvalidMaxDelay(f64),
    /// The delay buffer cannot hold the longest modulated delay.
    DelayBufferTooShort {
        /// Minimum buffer length in samples.
        required: usize,
        /// Buffer length the requested maximum delay would give.
        available: usize,
    },
    /// The delay buffer would exceed the allocation limit.
    DelayBufferTooLong {
        /// Buffer length the sample rate and maximum delay would give.
        requested: usize,
        /// Largest buffer the engine allocates.
        limit: usize,
    },
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unprepared => write!(f, "engine has not been prepared"),
            Self::ChannelLengthMismatch { left, right } => {
                write!(f, "channel length mismatch: left has {left} samples, right has {right}")
            }
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate: {sr}"),
            Self::InvalidMaxDelay(secs) => write!(f, "invalid maximum delay: {secs} s"),
            Self::DelayBufferTooShort {
                required,
                available,
            } => write!(
                f,
                "delay buffer too short: need {required} samples, max delay gives {available}"
            ),
            Self::DelayBufferTooLong { requested, limit } => write!(
                f,
                "delay buffer too long: {requested} samples requested, limit is {limit}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
