//! Frogg Engine - stereo chorus/flanger modulation engine
//!
//! Builds the modulation effect out of the [`frogg_core`] primitives: two
//! delay lines with a shared write head, one sine LFO, and a per-sample
//! feedback path.
//!
//! # Modules
//!
//! - [`engine`] - [`ModulationEngine`], its prepare/process/release lifecycle
//!   and the per-sample algorithm
//! - [`params`] - [`ModulationParams`], [`ModulationType`] and the parameter
//!   descriptors
//! - [`shared`] - [`SharedParams`], a lock-free handoff from a control thread
//! - [`error`] - [`EngineError`]
//!
//! # Example
//!
//! ```rust
//! use frogg_engine::{ModulationEngine, ModulationParams, ModulationType, SharedParams};
//!
//! let shared = SharedParams::default();
//! shared.publish(&ModulationParams {
//!     mod_type: ModulationType::Chorus,
//!     dry_wet: 0.4,
//!     ..ModulationParams::default()
//! });
//!
//! let mut engine = ModulationEngine::new();
//! engine.prepare(44100.0, 2.0).unwrap();
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! engine.process(&mut left, &mut right, &shared.snapshot()).unwrap();
//! ```
//!
//! # Features
//!
//! - `std` (default) - `std::error::Error` for [`EngineError`]
//! - `tracing` - debug logs from `prepare` and `release` (never from `process`)

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
pub mod error;
pub mod params;
pub mod shared;

pub use engine::{
    DEFAULT_MAX_DELAY_SECONDS, MAX_BUFFER_LEN, ModulationEngine, delay_in_samples,
    required_buffer_len,
};
pub use error::EngineError;
pub use params::{
    MODULATION_TYPE_LABELS, ModulationParams, ModulationType, PARAM_COUNT, PARAM_DESCRIPTORS,
};
pub use shared::SharedParams;
