//! Factory presets bundled with the library.
//!
//! These patches are embedded at compile time and always available without
//! external files. They cover the chain's main voices and serve as starting
//! points for user presets.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "warm_drive",
    "fuzz_fold",
    "vowel_talk",
    "dub_echo",
    "wide_sub",
];

/// TOML content for factory presets.
///
/// Kept in the same order as [`FACTORY_PRESET_NAMES`].
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("warm_drive", WARM_DRIVE_PRESET),
    ("fuzz_fold", FUZZ_FOLD_PRESET),
    ("vowel_talk", VOWEL_TALK_PRESET),
    ("dub_echo", DUB_ECHO_PRESET),
    ("wide_sub", WIDE_SUB_PRESET),
];

/// Init preset - every stage at its default.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Flat chain - every stage at its default"

[params]
input_gain = 0.0
output_gain = 0.0
"#;

/// Warm drive preset - gentle saturation.
const WARM_DRIVE_PRESET: &str = r#"
name = "Warm Drive"
description = "Gentle saturation with a rounded top end"

[params]
input_gain = 3.0
shape_amount = 12.0
shape_mix = 0.55
filter_cutoff = 6500.0
filter_resonance = 0.8
output_gain = -2.0
"#;

/// Fuzz fold preset - wavefolding into a light crush.
const FUZZ_FOLD_PRESET: &str = r#"
name = "Fuzz Fold"
description = "Foldback fuzz into a light sample-rate crush"

[params]
input_gain = 4.0
fold_amount = 18.0
fold_mix = 0.6
crush_amount = 0.35
crush_mix = 0.4
filter_cutoff = 3200.0
filter_resonance = 1.4
filter_poles = 1.0
output_gain = -4.0
"#;

/// Vowel talk preset - drive into the formant bank.
const VOWEL_TALK_PRESET: &str = r#"
name = "Vowel Talk"
description = "Drive into the formant bank, parked between ae and eh"

[params]
shape_amount = 8.0
shape_mix = 0.4
formant_morph = 6.5
formant_mix = 0.8
filter_cutoff = 9000.0
output_gain = -6.0
"#;

/// Dub echo preset - long feedback delay.
const DUB_ECHO_PRESET: &str = r#"
name = "Dub Echo"
description = "Long feedback echo into a dark lowpass"

[params]
delay_time = 0.45
delay_feedback = 0.72
delay_mix = 0.5
filter_cutoff = 900.0
haas_width = 0.25
output_gain = -3.0
"#;

/// Wide sub preset - steep low filter, widener pushed out.
const WIDE_SUB_PRESET: &str = r#"
name = "Wide Sub"
description = "Steep low filter with the widener pushed out"

[params]
filter_cutoff = 250.0
filter_resonance = 0.9
filter_poles = 1.0
haas_width = 0.85
output_gain = 0.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use bajo_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches the internal identifier first, then the preset's display name.
/// Both matches are case-insensitive.
///
/// # Example
///
/// ```rust
/// use bajo_config::get_factory_preset;
///
/// let preset = get_factory_preset("dub_echo").unwrap();
/// assert_eq!(preset.name, "Dub Echo");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    for (_, toml) in FACTORY_PRESETS_TOML {
        if let Ok(preset) = Preset::from_toml(toml)
            && preset.name.to_lowercase() == name_lower
        {
            return Some(preset);
        }
    }

    None
}

/// Check if a preset name is a factory preset.
///
/// Matches internal identifiers and display names, case-insensitively.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
