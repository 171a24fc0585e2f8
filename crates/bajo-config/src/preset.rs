//! Preset file format and conversion to chain parameters.

use std::collections::BTreeMap;
use std::path::Path;

use bajo_effects::params::find_index;
use bajo_effects::{DESCRIPTORS, EffectParameters, ParamStore};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A saved patch for the effects chain.
///
/// Presets are flat TOML files: a name, an optional description, and a
/// `[params]` table keyed by the stable parameter keys from the chain's
/// descriptor table. A preset is a complete patch, not a diff; parameters
/// the file does not mention come back as their defaults when the preset
/// is converted or applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Dub Echo"
/// description = "Long feedback echo into a dark lowpass"
///
/// [params]
/// delay_time = 0.45
/// delay_feedback = 0.72
/// delay_mix = 0.5
/// filter_cutoff = 900.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by descriptor key.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new preset with no parameter overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f32) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Capture a full parameter snapshot under the given name.
    ///
    /// Every chain parameter is written out explicitly, so the resulting
    /// file documents the whole patch rather than just the edits.
    pub fn from_parameters(name: impl Into<String>, params: &EffectParameters) -> Self {
        let values = params.to_array();
        let mut map = BTreeMap::new();
        for (i, desc) in DESCRIPTORS.iter().enumerate() {
            map.insert(desc.key.to_string(), values[i]);
        }
        Self {
            name: name.into(),
            description: None,
            params: map,
        }
    }

    /// Get a parameter value by key.
    pub fn param(&self, key: &str) -> Option<f32> {
        self.params.get(key).copied()
    }

    /// Set a parameter value.
    pub fn set_param(&mut self, key: impl Into<String>, value: f32) {
        self.params.insert(key.into(), value);
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve a preset by name or path.
    ///
    /// Search order: an existing file path as given, then the user presets
    /// directory, then the system presets directory, and finally the
    /// embedded factory presets. A user file named like a factory preset
    /// therefore shadows the factory version.
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        if let Some(path) = crate::paths::find_preset(name) {
            return Self::load(path);
        }
        crate::factory_presets::get_factory_preset(name)
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// Check every entry against the chain's descriptor table.
    ///
    /// Unknown keys and non-finite values are errors. Out-of-range values
    /// are not: they clamp on conversion, the same as any other write to
    /// the chain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, &value) in &self.params {
            if find_index(key).is_none() {
                return Err(ConfigError::UnknownParameter(key.clone()));
            }
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    param: key.clone(),
                    reason: format!("{value} is not a finite number"),
                });
            }
        }
        Ok(())
    }

    /// Convert into a typed parameter snapshot.
    ///
    /// Starts from the chain defaults and overlays every entry whose key
    /// matches a descriptor, clamped to the descriptor range. Unknown keys
    /// and non-finite values are skipped; call [`validate`](Self::validate)
    /// first to surface them as errors.
    pub fn to_parameters(&self) -> EffectParameters {
        let mut values = EffectParameters::default().to_array();
        for (i, desc) in DESCRIPTORS.iter().enumerate() {
            if let Some(&value) = self.params.get(desc.key)
                && value.is_finite()
            {
                values[i] = desc.clamp(value);
            }
        }
        EffectParameters::from_array(&values)
    }

    /// Publish the preset into a parameter store.
    ///
    /// This writes all parameters, so anything the preset leaves out
    /// returns to its default rather than keeping its previous value.
    pub fn apply(&self, store: &ParamStore) {
        store.store(&self.to_parameters());
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
