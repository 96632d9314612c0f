//! State persistence for the frogg chorus/flanger.
//!
//! The engine's whole state is its six parameters. This crate stores them as
//! a flat key → value TOML document ([`PluginState`]) and turns a document
//! back into validated [`ModulationParams`](frogg_engine::ModulationParams).
//!
//! # Example
//!
//! ```rust,no_run
//! use frogg_config::PluginState;
//! use frogg_engine::ModulationParams;
//!
//! // Save the current parameters
//! let params = ModulationParams { depth: 0.8, ..ModulationParams::default() };
//! PluginState::from_params(&params).save("state/frogg.toml").unwrap();
//!
//! // Restore them later
//! let restored = PluginState::load("state/frogg.toml").unwrap().to_params().unwrap();
//! assert_eq!(restored.depth, 0.8);
//! ```

mod error;
mod state;

pub use error::ConfigError;
pub use state::{PluginState, STATE_VERSION};
