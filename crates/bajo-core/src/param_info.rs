//! Parameter metadata for display, validation, and presets.
//!
//! Each chain parameter is described by a [`ParamDescriptor`] carrying its
//! stable key, display names, unit, and valid range. The descriptors back:
//!
//! - **Preset files**: values are validated and clamped against the range
//! - **CLI overrides**: `--set key=value` resolves through the key
//! - **Listing**: `bajo stages` prints each stage's parameters from them
//!
//! The descriptor table itself lives with the chain parameters; this module
//! only defines the types.

/// Describes a single parameter's metadata.
///
/// # Short Name
///
/// The `short_name` field should be 8 characters or less for compatibility
/// with hardware displays.
///
/// # Step Size
///
/// The `step` field is the recommended increment for encoder-based control.
/// Continuous parameters use small values like `0.01`; discrete selector
/// parameters (filter mode, pole count) use `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable snake_case key for presets and CLI lookup (e.g. `"delay_mix"`).
    ///
    /// Once assigned, a key must never change. Preset files reference
    /// parameters by key.
    pub key: &'static str,

    /// Full parameter name for display (e.g., "Delay Feedback").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the chain is initialized or reset.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,
}

impl ParamDescriptor {
    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            key: "",
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
        }
    }

    /// Dry/wet mix parameter (0 to 1, default fully dry).
    pub const fn mix(name: &'static str, short_name: &'static str) -> Self {
        Self {
            key: "",
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            step: 0.01,
        }
    }

    /// Nonlinearity drive amount (1 to 200, default 1 = unity).
    ///
    /// Used by the waveshaper and foldback stages, where the amount
    /// multiplies the input before the shaping function.
    pub const fn drive(name: &'static str, short_name: &'static str) -> Self {
        Self {
            key: "",
            name,
            short_name,
            unit: ParamUnit::None,
            min: 1.0,
            max: 200.0,
            default: 1.0,
            step: 1.0,
        }
    }

    /// Frequency parameter in Hz.
    pub const fn freq_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            key: "",
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
        }
    }

    /// Generic dimensionless parameter with an explicit range.
    pub const fn value(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            key: "",
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
        }
    }

    /// Sets the stable parameter key.
    ///
    /// Builder pattern — call after a factory method.
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    /// Sets the step increment.
    ///
    /// Builder pattern — call after a factory method.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for gain parameters.
    Decibels,

    /// Hertz (Hz) - for the filter cutoff.
    Hertz,

    /// No unit - for mixes, amounts, and selector parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use bajo_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}
