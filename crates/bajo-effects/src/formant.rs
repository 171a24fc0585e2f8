//! Vowel formant filter stage.

use bajo_core::{Effect, SmoothedParam, StateVariableFilter, equal_power_mix, lerp};

/// Formant frequency anchors in Hz, one row per vowel, columns F1/F2/F3.
///
/// Peterson-Barney averaged male vowel formants, ordered so neighbouring
/// rows sound like a continuous mouth movement when interpolated.
const ANCHORS: [[f32; 3]; 10] = [
    [570.0, 840.0, 2410.0],  // ow
    [300.0, 870.0, 2240.0],  // oo
    [440.0, 1020.0, 2240.0], // uu
    [730.0, 1090.0, 2440.0], // ah
    [640.0, 1190.0, 2390.0], // uh
    [490.0, 1350.0, 1690.0], // er
    [660.0, 1720.0, 2410.0], // ae
    [530.0, 1840.0, 2480.0], // eh
    [390.0, 1990.0, 2550.0], // ih
    [270.0, 2290.0, 3010.0], // iy
];

/// Assumed formant bandwidth; Q is derived as `frequency / BANDWIDTH_HZ`.
const BANDWIDTH_HZ: f32 = 50.0;

/// Fixed band gains: F1 at unity, F2 at -15 dB, F3 at -9 dB.
///
/// Empirical constants from tuning the stage by ear; kept as literals
/// rather than re-derived from dB.
const BAND2_WEIGHT: f32 = 0.178;
const BAND3_WEIGHT: f32 = 0.355;

/// Target `(frequency_hz, q)` for the three formant bands at a morph
/// position.
///
/// Integer positions land exactly on a vowel's anchors; fractional
/// positions linearly interpolate between the two neighbouring vowels.
/// Positions past the last vowel clamp to it, and anything else out of
/// range (negative, or beyond the table) falls back to the first vowel.
pub fn vowel_targets(morph: f32) -> [(f32, f32); 3] {
    let segment = libm::floorf(morph) as i32;
    let (lo, hi, t) = match segment {
        0..=7 => {
            let k = segment as usize;
            (ANCHORS[k], ANCHORS[k + 1], morph - segment as f32)
        }
        8..=9 => (ANCHORS[8], ANCHORS[9], (morph - 8.0).min(1.0)),
        _ => (ANCHORS[0], ANCHORS[0], 0.0),
    };

    core::array::from_fn(|band| {
        let freq = lerp(lo[band], hi[band], t);
        (freq, freq / BANDWIDTH_HZ)
    })
}

/// Three parallel swept bandpass filters that impose vowel formants.
///
/// One morph scalar sweeps all three bands through the vowel table; the
/// per-band cutoff and Q are what get smoothed, so a morph jump glides
/// each filter straight to its new formant instead of replaying every
/// vowel in between.
///
/// Each band is dry/wet mixed against the full input on its own and the
/// three mixer outputs are summed, so the dry signal contributes three
/// times at `mix = 0`. That gain structure is part of the stage's sound;
/// callers wanting unity bypass should use the mix, not rely on zero.
pub struct FormantFilter {
    bands_l: [StateVariableFilter; 3],
    bands_r: [StateVariableFilter; 3],

    // Per-band sweep targets, shared by both channels.
    freq: [SmoothedParam; 3],
    q: [SmoothedParam; 3],
    mix: SmoothedParam,

    morph: f32,
}

impl FormantFilter {
    /// Create a formant filter at the center of the vowel table, fully dry.
    pub fn new(sample_rate: f32) -> Self {
        let morph = 5.0;
        let targets = vowel_targets(morph);

        let mut filter = Self {
            bands_l: core::array::from_fn(|_| StateVariableFilter::new(sample_rate)),
            bands_r: core::array::from_fn(|_| StateVariableFilter::new(sample_rate)),
            freq: core::array::from_fn(|b| {
                SmoothedParam::with_config(targets[b].0, sample_rate, 10.0)
            }),
            q: core::array::from_fn(|b| {
                SmoothedParam::with_config(targets[b].1, sample_rate, 10.0)
            }),
            mix: SmoothedParam::with_config(0.0, sample_rate, 10.0),
            morph,
        };
        filter.apply_current_targets();
        filter
    }

    /// Set the morph position, clamped to 0..9.
    pub fn set_morph(&mut self, morph: f32) {
        self.morph = morph.clamp(0.0, 9.0);
        let targets = vowel_targets(self.morph);
        for band in 0..3 {
            self.freq[band].set_target(targets[band].0);
            self.q[band].set_target(targets[band].1);
        }
    }

    /// Set the dry/wet mix, clamped to 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.0, 1.0));
    }

    /// Current morph position.
    pub fn morph(&self) -> f32 {
        self.morph
    }

    /// Current mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    fn apply_current_targets(&mut self) {
        for band in 0..3 {
            let freq = self.freq[band].get();
            let q = self.q[band].get();
            self.bands_l[band].set_cutoff(freq);
            self.bands_l[band].set_resonance(q);
            self.bands_r[band].set_cutoff(freq);
            self.bands_r[band].set_resonance(q);
        }
    }

    #[inline]
    fn mix_bands(input: f32, bands: [f32; 3], mix: f32) -> f32 {
        equal_power_mix(input, bands[0], mix)
            + equal_power_mix(input, bands[1] * BAND2_WEIGHT, mix)
            + equal_power_mix(input, bands[2] * BAND3_WEIGHT, mix)
    }
}

impl Effect for FormantFilter {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mix = self.mix.advance();

        for band in 0..3 {
            let settled = self.freq[band].is_settled() && self.q[band].is_settled();
            let freq = self.freq[band].advance();
            let q = self.q[band].advance();
            if !settled {
                self.bands_l[band].set_cutoff(freq);
                self.bands_l[band].set_resonance(q);
                self.bands_r[band].set_cutoff(freq);
                self.bands_r[band].set_resonance(q);
            }
        }

        let wet_l = core::array::from_fn(|b| self.bands_l[b].process(left).bandpass);
        let wet_r = core::array::from_fn(|b| self.bands_r[b].process(right).bandpass);

        (
            Self::mix_bands(left, wet_l, mix),
            Self::mix_bands(right, wet_r, mix),
        )
    }

    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "channel slices must be equal length"
        );

        for i in 0..left.len().min(right.len()) {
            let (l, r) = self.process_stereo(left[i], right[i]);
            left[i] = l;
            right[i] = r;
        }

        // Flush near-zero filter states so morph jumps between blocks do
        // not ring out stale energy.
        for band in 0..3 {
            self.bands_l[band].snap_to_zero();
            self.bands_r[band].snap_to_zero();
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        for band in 0..3 {
            self.bands_l[band].set_sample_rate(sample_rate);
            self.bands_r[band].set_sample_rate(sample_rate);
            self.freq[band].set_sample_rate(sample_rate);
            self.q[band].set_sample_rate(sample_rate);
        }
        self.mix.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        for band in 0..3 {
            self.bands_l[band].reset();
            self.bands_r[band].reset();
            self.freq[band].snap_to_target();
            self.q[band].snap_to_target();
        }
        self.mix.snap_to_target();
        self.apply_current_targets();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_morphs_hit_anchors_exactly() {
        for (vowel, anchors) in ANCHORS.iter().enumerate() {
            let targets = vowel_targets(vowel as f32);
            for band in 0..3 {
                assert_eq!(
                    targets[band].0, anchors[band],
                    "vowel {vowel} band {band}"
                );
                assert_eq!(targets[band].1, anchors[band] / BANDWIDTH_HZ);
            }
        }
    }

    #[test]
    fn fractional_morph_interpolates() {
        let targets = vowel_targets(0.5);
        assert_eq!(targets[0].0, 435.0); // midway 570..300
        assert_eq!(targets[1].0, 855.0); // midway 840..870
        assert_eq!(targets[2].0, 2325.0); // midway 2410..2240
    }

    #[test]
    fn out_of_range_morph_falls_back() {
        let first: Vec<f32> = vowel_targets(0.0).iter().map(|t| t.0).collect();
        let below: Vec<f32> = vowel_targets(-3.0).iter().map(|t| t.0).collect();
        assert_eq!(first, below);

        let last: Vec<f32> = vowel_targets(9.0).iter().map(|t| t.0).collect();
        let past: Vec<f32> = vowel_targets(9.7).iter().map(|t| t.0).collect();
        assert_eq!(last, past);
    }

    #[test]
    fn highest_q_in_table_is_admitted() {
        // iy F3 at 3010 Hz has the sharpest band: Q = 60.2.
        let targets = vowel_targets(9.0);
        assert!((targets[2].1 - 60.2).abs() < 1e-4);
    }

    #[test]
    fn dry_mix_sums_three_dry_paths() {
        let mut filter = FormantFilter::new(48000.0);
        filter.reset();

        let (l, r) = filter.process_stereo(0.25, -0.5);
        assert!((l - 0.75).abs() < 1e-6);
        assert!((r + 1.5).abs() < 1e-6);
    }

    #[test]
    fn wet_output_stays_finite_across_full_sweep() {
        let mut filter = FormantFilter::new(48000.0);
        filter.set_mix(1.0);
        filter.reset();

        for step in 0..=90 {
            filter.set_morph(step as f32 * 0.1);
            for i in 0..64 {
                let x = libm::sinf(i as f32 * 0.3) * 0.5;
                let (l, r) = filter.process_stereo(x, x);
                assert!(l.is_finite() && r.is_finite(), "morph step {step}");
            }
        }
    }

    #[test]
    fn formant_band_passes_its_own_frequency() {
        // Park the filter on vowel "ah" (F1 = 730 Hz) and compare how much
        // of a 730 Hz tone versus a 5 kHz tone survives the first band.
        let sample_rate = 48000.0;
        let rms_at = |freq: f32| -> f32 {
            let mut filter = FormantFilter::new(sample_rate);
            filter.set_morph(3.0);
            filter.set_mix(1.0);
            filter.reset();

            let step = core::f32::consts::TAU * freq / sample_rate;
            let mut sum_sq = 0.0;
            for i in 0..6000 {
                let x = libm::sinf(i as f32 * step) * 0.5;
                let (l, _) = filter.process_stereo(x, x);
                if i >= 2000 {
                    sum_sq += l * l;
                }
            }
            libm::sqrtf(sum_sq / 4000.0)
        };

        let on_formant = rms_at(730.0);
        let off_formant = rms_at(5000.0);
        assert!(
            on_formant > off_formant * 3.0,
            "on {on_formant}, off {off_formant}"
        );
    }

    #[test]
    fn morph_setter_clamps() {
        let mut filter = FormantFilter::new(48000.0);
        filter.set_morph(42.0);
        assert_eq!(filter.morph(), 9.0);
        filter.set_morph(-1.0);
        assert_eq!(filter.morph(), 0.0);
    }
}
