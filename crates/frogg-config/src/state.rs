//! Persisted engine state: a flat key → value document of the six parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use frogg_core::ParameterInfo;
use frogg_engine::ModulationParams;

use crate::error::ConfigError;

/// Newest state document version this crate writes and reads.
pub const STATE_VERSION: u32 = 1;

/// Saved parameter state.
///
/// Keys are the parameters' persistence keys (`drywet`, `depth`, `rate`,
/// `phaseoffset`, `feedback`, `type`). Values are plain numbers; `type` is
/// 0 for Chorus and 1 for Flanger.
///
/// # TOML Format
///
/// ```toml
/// version = 1
///
/// [params]
/// depth = 0.5
/// drywet = 0.5
/// feedback = 0.5
/// phaseoffset = 0.5
/// rate = 10.0
/// type = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginState {
    /// Format version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Parameter values by persistence key.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

fn default_version() -> u32 {
    STATE_VERSION
}

/// Shortest decimal that reads back as the same `f32`, so 0.98 is stored
/// as `0.98` rather than `0.9800000190734863`.
fn tidy(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl PluginState {
    /// Capture every parameter of `params`.
    pub fn from_params(params: &ModulationParams) -> Self {
        let params_map = (0..params.param_count())
            .filter_map(|i| {
                params
                    .param_info(i)
                    .map(|desc| (desc.string_id.to_string(), tidy(params.get_param(i))))
            })
            .collect();
        Self {
            version: STATE_VERSION,
            params: params_map,
        }
    }

    /// Rebuild engine parameters from the document.
    ///
    /// Missing keys keep their defaults and out-of-range values are clamped.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedVersion`] for documents newer than
    /// [`STATE_VERSION`], [`ConfigError::UnknownParameter`] for keys the engine
    /// doesn't have, [`ConfigError::InvalidValue`] for NaN or infinite values.
    pub fn to_params(&self) -> Result<ModulationParams, ConfigError> {
        if self.version > STATE_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: STATE_VERSION,
            });
        }

        let mut params = ModulationParams::default();
        for (key, &value) in &self.params {
            let index = params
                .find_param_by_key(key)
                .ok_or_else(|| ConfigError::UnknownParameter(key.clone()))?;
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: key.clone(),
                    value: value as f32,
                });
            }
            // Clamp before narrowing: `1e300 as f32` is infinite
            let value = match params.param_info(index) {
                Some(desc) => value.clamp(f64::from(desc.min), f64::from(desc.max)) as f32,
                None => value as f32,
            };
            params.set_param(index, value);
        }
        Ok(params)
    }

    /// Load a state document from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a state document from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the document to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the document to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for PluginState {
    fn default() -> Self {
        Self::from_params(&ModulationParams::default())
    }
}

impl From<&ModulationParams> for PluginState {
    fn from(params: &ModulationParams) -> Self {
        Self::from_params(params)
    }
}
