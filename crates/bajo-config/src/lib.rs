//! Preset storage for the bajo effects chain.
//!
//! The chain has one fixed topology, so a preset is just a named set of
//! parameter values: a flat TOML file whose `[params]` table is keyed by the
//! stable keys in the chain's descriptor table. This crate loads and saves
//! those files, validates them, converts them to typed parameter snapshots,
//! and ships a handful of factory patches embedded in the binary.
//!
//! # Features
//!
//! - **Preset files**: flat TOML load/save with clamped, defaulted values
//! - **Factory patches**: built-in presets that need no external files
//! - **Paths**: platform preset directories and name-based lookup
//! - **Store integration**: publish a preset into the chain's parameter store
//!
//! # Example
//!
//! ```rust,no_run
//! use bajo_config::{Preset, get_factory_preset, user_presets_dir};
//!
//! // Start from a factory patch and save a tweaked copy
//! let mut preset = get_factory_preset("dub_echo").unwrap();
//! preset.set_param("delay_feedback", 0.85);
//!
//! let path = user_presets_dir().join("longer_echo.toml");
//! preset.save(&path).unwrap();
//!
//! // Later: resolve by name (files shadow factory patches) and apply
//! let loaded = Preset::resolve("longer_echo").unwrap();
//! let params = loaded.to_parameters();
//! ```

mod error;
mod preset;

/// Platform-specific preset directories.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    system_presets_dir, user_presets_dir,
};
pub use preset::Preset;
