//! Chain parameters: the typed snapshot, descriptor table, and atomic store.
//!
//! Control surfaces (CLI, presets, a future GUI) and the audio thread never
//! share locks. Writers clamp values against [`DESCRIPTORS`] and publish them
//! into a [`ParamStore`] of atomics; once per block the audio side calls
//! [`ParamStore::snapshot`] to get a plain [`EffectParameters`] value and
//! hands it to the chain. Stages do their own smoothing, so a snapshot is
//! a target, not an instantaneous jump.
//!
//! Selector parameters (filter mode, pole count) travel through the store as
//! float indices and come back out as closed enums, so the audio code never
//! matches on raw floats.

use core::sync::atomic::{AtomicU32, Ordering};

use bajo_core::ParamDescriptor;

/// Mode filter output selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Pass frequencies below the cutoff.
    #[default]
    Lowpass,
    /// Pass frequencies near the cutoff.
    Bandpass,
    /// Pass frequencies above the cutoff.
    Highpass,
}

impl FilterMode {
    /// Convert a stored index to a mode. Unknown indices fall back to
    /// lowpass, matching the chain default.
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => FilterMode::Bandpass,
            2 => FilterMode::Highpass,
            _ => FilterMode::Lowpass,
        }
    }

    /// Index used when storing this mode as a parameter value.
    pub fn as_index(self) -> usize {
        match self {
            FilterMode::Lowpass => 0,
            FilterMode::Bandpass => 1,
            FilterMode::Highpass => 2,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            FilterMode::Lowpass => "lowpass",
            FilterMode::Bandpass => "bandpass",
            FilterMode::Highpass => "highpass",
        }
    }
}

/// Mode filter slope selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPoles {
    /// One 2-pole section, 12 dB/oct.
    #[default]
    One,
    /// Two cascaded sections, 24 dB/oct.
    Two,
}

impl FilterPoles {
    /// Convert a stored index to a pole count. Unknown indices fall back
    /// to the single section.
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => FilterPoles::Two,
            _ => FilterPoles::One,
        }
    }

    /// Index used when storing this selection as a parameter value.
    pub fn as_index(self) -> usize {
        match self {
            FilterPoles::One => 0,
            FilterPoles::Two => 1,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            FilterPoles::One => "12 dB/oct",
            FilterPoles::Two => "24 dB/oct",
        }
    }
}

/// Parameter indices into [`DESCRIPTORS`] and [`ParamStore`], in chain order.
pub mod index {
    /// Input gain in dB.
    pub const INPUT_GAIN: usize = 0;
    /// Waveshaper drive amount.
    pub const SHAPE_AMOUNT: usize = 1;
    /// Waveshaper dry/wet mix.
    pub const SHAPE_MIX: usize = 2;
    /// Foldback drive amount.
    pub const FOLD_AMOUNT: usize = 3;
    /// Foldback dry/wet mix.
    pub const FOLD_MIX: usize = 4;
    /// Bit crusher amount.
    pub const CRUSH_AMOUNT: usize = 5;
    /// Bit crusher dry/wet mix.
    pub const CRUSH_MIX: usize = 6;
    /// Formant vowel morph position.
    pub const FORMANT_MORPH: usize = 7;
    /// Formant dry/wet mix.
    pub const FORMANT_MIX: usize = 8;
    /// Delay time as a fraction of the 1 s maximum.
    pub const DELAY_TIME: usize = 9;
    /// Delay feedback.
    pub const DELAY_FEEDBACK: usize = 10;
    /// Delay dry/wet mix.
    pub const DELAY_MIX: usize = 11;
    /// Mode filter cutoff in Hz.
    pub const FILTER_CUTOFF: usize = 12;
    /// Mode filter resonance.
    pub const FILTER_RESONANCE: usize = 13;
    /// Mode filter output selection.
    pub const FILTER_MODE: usize = 14;
    /// Mode filter slope selection.
    pub const FILTER_POLES: usize = 15;
    /// Haas widener width.
    pub const HAAS_WIDTH: usize = 16;
    /// Output gain in dB.
    pub const OUTPUT_GAIN: usize = 17;
    /// Total parameter count.
    pub const COUNT: usize = 18;
}

/// Descriptor table for every chain parameter, indexed by [`index`].
pub static DESCRIPTORS: [ParamDescriptor; index::COUNT] = [
    ParamDescriptor::gain_db("Input Gain", "InGain", -100.0, 12.0, 0.0).with_key("input_gain"),
    ParamDescriptor::drive("Shape Amount", "ShapeAmt").with_key("shape_amount"),
    ParamDescriptor::mix("Shape Mix", "ShapeMix").with_key("shape_mix"),
    ParamDescriptor::drive("Fold Amount", "FoldAmt").with_key("fold_amount"),
    ParamDescriptor::mix("Fold Mix", "FoldMix").with_key("fold_mix"),
    ParamDescriptor::value("Crush Amount", "CrushAmt", 0.0, 1.0, 0.0).with_key("crush_amount"),
    ParamDescriptor::mix("Crush Mix", "CrushMix").with_key("crush_mix"),
    ParamDescriptor::value("Formant Morph", "Morph", 0.0, 9.0, 5.0)
        .with_step(0.1)
        .with_key("formant_morph"),
    ParamDescriptor::mix("Formant Mix", "FmtMix").with_key("formant_mix"),
    ParamDescriptor::value("Delay Time", "DlyTime", 0.0, 1.0, 0.0).with_key("delay_time"),
    ParamDescriptor::value("Delay Feedback", "DlyFdbk", 0.0, 1.0, 0.0).with_key("delay_feedback"),
    ParamDescriptor::mix("Delay Mix", "DlyMix").with_key("delay_mix"),
    ParamDescriptor::freq_hz("Filter Cutoff", "Cutoff", 20.0, 18000.0, 18000.0)
        .with_key("filter_cutoff"),
    ParamDescriptor::value("Filter Resonance", "Reso", 0.70, 2.5, 0.70)
        .with_key("filter_resonance"),
    ParamDescriptor::value("Filter Mode", "Mode", 0.0, 2.0, 0.0)
        .with_step(1.0)
        .with_key("filter_mode"),
    ParamDescriptor::value("Filter Poles", "Poles", 0.0, 1.0, 0.0)
        .with_step(1.0)
        .with_key("filter_poles"),
    ParamDescriptor::value("Stereo Width", "Width", 0.0, 1.0, 0.0).with_key("haas_width"),
    ParamDescriptor::gain_db("Output Gain", "OutGain", -100.0, 12.0, 0.0).with_key("output_gain"),
];

/// Find a parameter's index by its stable key.
pub fn find_index(key: &str) -> Option<usize> {
    DESCRIPTORS.iter().position(|d| d.key == key)
}

/// A complete, plain-value snapshot of every chain parameter.
///
/// This is what [`BassChain::set_parameters`](crate::BassChain::set_parameters)
/// consumes at block boundaries. Field values are in their natural units;
/// selector parameters are already decoded into enums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParameters {
    /// Input gain in dB.
    pub input_gain_db: f32,
    /// Waveshaper drive amount (1 = unity, up to 200).
    pub waveshaper_amount: f32,
    /// Waveshaper dry/wet mix (0 to 1).
    pub waveshaper_mix: f32,
    /// Foldback drive amount (1 = unity, up to 200).
    pub foldback_amount: f32,
    /// Foldback dry/wet mix (0 to 1).
    pub foldback_mix: f32,
    /// Bit crusher amount (0 = bypass, 1 = maximum crush).
    pub crush_amount: f32,
    /// Bit crusher dry/wet mix (0 to 1).
    pub crush_mix: f32,
    /// Formant vowel morph position (0 to 9 across the vowel table).
    pub formant_morph: f32,
    /// Formant dry/wet mix (0 to 1).
    pub formant_mix: f32,
    /// Delay time as a fraction of the 1 s maximum.
    pub delay_time: f32,
    /// Delay feedback (0 to 1; the stage caps the effective value at 0.95).
    pub delay_feedback: f32,
    /// Delay dry/wet mix (0 to 1).
    pub delay_mix: f32,
    /// Mode filter cutoff in Hz.
    pub filter_cutoff_hz: f32,
    /// Mode filter resonance.
    pub filter_resonance: f32,
    /// Mode filter output selection.
    pub filter_mode: FilterMode,
    /// Mode filter slope selection.
    pub filter_poles: FilterPoles,
    /// Haas widener width (0 = mono passthrough, 1 = full 30 ms offset).
    pub haas_width: f32,
    /// Output gain in dB.
    pub output_gain_db: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            input_gain_db: 0.0,
            waveshaper_amount: 1.0,
            waveshaper_mix: 0.0,
            foldback_amount: 1.0,
            foldback_mix: 0.0,
            crush_amount: 0.0,
            crush_mix: 0.0,
            formant_morph: 5.0,
            formant_mix: 0.0,
            delay_time: 0.0,
            delay_feedback: 0.0,
            delay_mix: 0.0,
            filter_cutoff_hz: 18000.0,
            filter_resonance: 0.70,
            filter_mode: FilterMode::Lowpass,
            filter_poles: FilterPoles::One,
            haas_width: 0.0,
            output_gain_db: 0.0,
        }
    }
}

impl EffectParameters {
    /// Flatten into raw store order, encoding selectors as indices.
    pub fn to_array(&self) -> [f32; index::COUNT] {
        let mut values = [0.0; index::COUNT];
        values[index::INPUT_GAIN] = self.input_gain_db;
        values[index::SHAPE_AMOUNT] = self.waveshaper_amount;
        values[index::SHAPE_MIX] = self.waveshaper_mix;
        values[index::FOLD_AMOUNT] = self.foldback_amount;
        values[index::FOLD_MIX] = self.foldback_mix;
        values[index::CRUSH_AMOUNT] = self.crush_amount;
        values[index::CRUSH_MIX] = self.crush_mix;
        values[index::FORMANT_MORPH] = self.formant_morph;
        values[index::FORMANT_MIX] = self.formant_mix;
        values[index::DELAY_TIME] = self.delay_time;
        values[index::DELAY_FEEDBACK] = self.delay_feedback;
        values[index::DELAY_MIX] = self.delay_mix;
        values[index::FILTER_CUTOFF] = self.filter_cutoff_hz;
        values[index::FILTER_RESONANCE] = self.filter_resonance;
        values[index::FILTER_MODE] = self.filter_mode.as_index() as f32;
        values[index::FILTER_POLES] = self.filter_poles.as_index() as f32;
        values[index::HAAS_WIDTH] = self.haas_width;
        values[index::OUTPUT_GAIN] = self.output_gain_db;
        values
    }

    /// Rebuild from raw store order.
    ///
    /// Selector floats truncate to their index; out-of-range indices fall
    /// back to the enum defaults.
    pub fn from_array(values: &[f32; index::COUNT]) -> Self {
        Self {
            input_gain_db: values[index::INPUT_GAIN],
            waveshaper_amount: values[index::SHAPE_AMOUNT],
            waveshaper_mix: values[index::SHAPE_MIX],
            foldback_amount: values[index::FOLD_AMOUNT],
            foldback_mix: values[index::FOLD_MIX],
            crush_amount: values[index::CRUSH_AMOUNT],
            crush_mix: values[index::CRUSH_MIX],
            formant_morph: values[index::FORMANT_MORPH],
            formant_mix: values[index::FORMANT_MIX],
            delay_time: values[index::DELAY_TIME],
            delay_feedback: values[index::DELAY_FEEDBACK],
            delay_mix: values[index::DELAY_MIX],
            filter_cutoff_hz: values[index::FILTER_CUTOFF],
            filter_resonance: values[index::FILTER_RESONANCE],
            filter_mode: FilterMode::from_index(values[index::FILTER_MODE].max(0.0) as usize),
            filter_poles: FilterPoles::from_index(values[index::FILTER_POLES].max(0.0) as usize),
            haas_width: values[index::HAAS_WIDTH],
            output_gain_db: values[index::OUTPUT_GAIN],
        }
    }
}

/// Lock-free published parameter values.
///
/// Each slot is an `AtomicU32` holding an `f32` bit pattern. Writers clamp
/// against the descriptor range and store with `Release`; the audio thread
/// loads with `Acquire`. A [`snapshot`](Self::snapshot) is therefore always
/// a mix of fully-written values, never a torn one, and every value is in
/// range by construction.
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; index::COUNT],
}

impl ParamStore {
    /// Create a store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(DESCRIPTORS[i].default.to_bits())),
        }
    }

    /// Publish one value, clamped to its descriptor range.
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&self, index: usize, value: f32) {
        if let Some(desc) = DESCRIPTORS.get(index) {
            let clamped = desc.clamp(value);
            self.values[index].store(clamped.to_bits(), Ordering::Release);
        }
    }

    /// Publish one value by key. Returns `false` if the key is unknown.
    pub fn set_by_key(&self, key: &str, value: f32) -> bool {
        match find_index(key) {
            Some(i) => {
                self.set(i, value);
                true
            }
            None => false,
        }
    }

    /// Read one published value. Out-of-range indices read as 0.0.
    pub fn get(&self, index: usize) -> f32 {
        match self.values.get(index) {
            Some(v) => f32::from_bits(v.load(Ordering::Acquire)),
            None => 0.0,
        }
    }

    /// Publish a complete parameter set.
    pub fn store(&self, params: &EffectParameters) {
        let values = params.to_array();
        for (i, &value) in values.iter().enumerate() {
            self.set(i, value);
        }
    }

    /// Read every slot into a typed snapshot.
    pub fn snapshot(&self) -> EffectParameters {
        let mut values = [0.0; index::COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = f32::from_bits(self.values[i].load(Ordering::Acquire));
        }
        EffectParameters::from_array(&values)
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
