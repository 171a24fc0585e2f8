//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use bajo_config::{ConfigError, Preset};
use bajo_core::ParamDescriptor;
use bajo_effects::{FilterMode, FilterPoles};

/// Parse a `key=value` override for clap's `value_parser`.
pub fn parse_set(s: &str) -> Result<(String, f32), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("Invalid override: '{s}' (expected key=value)"));
    };
    let key = key.trim();
    let value = value.trim();
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("Invalid value for '{key}': '{value}' is not a number"))?;
    Ok((key.to_string(), parsed))
}

/// Resolve a preset by name or path and validate it.
///
/// User preset files shadow factory presets of the same name.
pub fn resolve_preset(name: &str) -> anyhow::Result<Preset> {
    let preset = match Preset::resolve(name) {
        Ok(preset) => preset,
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!(
            "Preset '{name}' not found. Use 'bajo presets list' to see available presets."
        ),
        Err(e) => return Err(e.into()),
    };
    preset
        .validate()
        .with_context(|| format!("invalid preset '{}'", preset.name))?;
    Ok(preset)
}

/// Format a parameter value for display.
///
/// Selector parameters show their labels instead of raw indices; the
/// rest get their unit suffix.
pub fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.key {
        "filter_mode" => FilterMode::from_index(value as usize).label().to_string(),
        "filter_poles" => FilterPoles::from_index(value as usize).label().to_string(),
        _ => format!("{}{}", value, desc.unit.suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bajo_effects::{DESCRIPTORS, index};

    #[test]
    fn parse_set_accepts_key_value() {
        assert_eq!(
            parse_set("delay_mix=0.4").unwrap(),
            ("delay_mix".to_string(), 0.4)
        );
    }

    #[test]
    fn parse_set_trims_whitespace() {
        assert_eq!(
            parse_set(" filter_cutoff = 800 ").unwrap(),
            ("filter_cutoff".to_string(), 800.0)
        );
    }

    #[test]
    fn parse_set_rejects_missing_equals() {
        assert!(parse_set("delay_mix").is_err());
    }

    #[test]
    fn parse_set_rejects_non_numeric_value() {
        assert!(parse_set("delay_mix=loud").is_err());
    }

    #[test]
    fn format_value_uses_selector_labels() {
        assert_eq!(format_value(&DESCRIPTORS[index::FILTER_MODE], 1.0), "bandpass");
        assert_eq!(format_value(&DESCRIPTORS[index::FILTER_POLES], 1.0), "24 dB/oct");
    }

    #[test]
    fn format_value_appends_unit_suffix() {
        assert_eq!(format_value(&DESCRIPTORS[index::FILTER_CUTOFF], 800.0), "800 Hz");
        assert_eq!(format_value(&DESCRIPTORS[index::DELAY_MIX], 0.5), "0.5");
    }
}
