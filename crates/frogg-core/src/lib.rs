//! Frogg Core - DSP primitives for the frogg chorus/flanger
//!
//! This crate provides the building blocks the modulation engine is made of,
//! designed for real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Delay Line
//!
//! - [`DelayLine`] - Circular sample buffer with linear-interpolated reads
//! - [`wrap_read_head`] - Bring a fractional read head back into the buffer
//!
//! ## Modulation
//!
//! - [`Lfo`] - Sine LFO phase accumulator
//! - [`wrap_phase`] / [`sine_at`] - Stateless phase helpers
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] - Name, range, default and stable IDs of one parameter
//!
//! ## Utilities
//!
//! - Math functions: [`lerp`], [`map_range`], [`wet_dry_mix`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the delay buffers).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! frogg-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use frogg_core::{DelayLine, Lfo, map_range, wrap_read_head};
//!
//! let mut line = DelayLine::with_len(4800);
//! let mut lfo = Lfo::new();
//!
//! for write_head in 0..line.len() {
//!     line.write(write_head, 0.25);
//!     let delay = map_range(lfo.sine(), -1.0, 1.0, 48.0, 240.0);
//!     lfo.advance(0.5 / 48000.0);
//!     let head = wrap_read_head(write_head as f64 - delay, line.len());
//!     let _delayed = line.read_interpolated(head);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Allocation only happens when a delay line is resized
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Pure helpers**: Interpolation, wrapping and range mapping are free
//!   functions, testable without constructing an engine

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod lfo;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use delay::{DelayLine, buffer_len_for, wrap_read_head};
pub use lfo::{Lfo, sine_at, wrap_phase};
pub use math::{flush_denormal, lerp, map_range, wet_dry_mix};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
