//! The full bass processing chain.

use bajo_core::Effect;

use crate::bitcrusher::Bitcrusher;
use crate::delay::Delay;
use crate::filter::MultiModeFilter;
use crate::foldback::Foldback;
use crate::formant::FormantFilter;
use crate::gain::Gain;
use crate::haas::HaasWidener;
use crate::params::EffectParameters;
use crate::waveshaper::Waveshaper;

/// All nine stages in fixed order:
///
/// input gain, waveshaper, foldback, bit crusher, formant filter, delay,
/// mode filter, Haas widener, output gain.
///
/// The chain itself holds no parameter state beyond what the stages
/// carry. A host publishes values however it likes (see
/// [`ParamStore`](crate::ParamStore)), takes one
/// [`EffectParameters`] snapshot per block, and hands it to
/// [`set_parameters`](Self::set_parameters) before processing. Selector
/// parameters switch outright at that boundary; every continuous
/// parameter glides on its stage's smoothing ramp, so per-block delivery
/// never steps the audio.
///
/// # Example
///
/// ```rust
/// use bajo_core::Effect;
/// use bajo_effects::{BassChain, EffectParameters};
///
/// let mut chain = BassChain::new(48000.0);
/// let params = EffectParameters {
///     foldback_amount: 12.0,
///     foldback_mix: 0.8,
///     ..EffectParameters::default()
/// };
///
/// let mut left = [0.1f32; 256];
/// let mut right = [0.1f32; 256];
/// chain.set_parameters(&params);
/// chain.process_block(&mut left, &mut right);
/// ```
pub struct BassChain {
    input_gain: Gain,
    waveshaper: Waveshaper,
    foldback: Foldback,
    bitcrusher: Bitcrusher,
    formant: FormantFilter,
    delay: Delay,
    filter: MultiModeFilter,
    haas: HaasWidener,
    output_gain: Gain,

    max_block_size: usize,
}

impl BassChain {
    /// Create the chain with every stage at its default setting.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            input_gain: Gain::new(sample_rate),
            waveshaper: Waveshaper::new(sample_rate),
            foldback: Foldback::new(sample_rate),
            bitcrusher: Bitcrusher::new(sample_rate),
            formant: FormantFilter::new(sample_rate),
            delay: Delay::new(sample_rate),
            filter: MultiModeFilter::new(sample_rate),
            haas: HaasWidener::new(sample_rate),
            output_gain: Gain::new(sample_rate),
            max_block_size: 0,
        }
    }

    /// Re-initialize for a new audio configuration.
    ///
    /// Sizes every internal buffer for `sample_rate`, clears all state,
    /// and records the block size the host promises not to exceed.
    /// Allocation happens here and nowhere else.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.set_sample_rate(sample_rate);
        self.reset();
        self.max_block_size = max_block_size;
        #[cfg(feature = "tracing")]
        tracing::debug!("chain prepare: {sample_rate} Hz, max block {max_block_size}");
    }

    /// The block size promised by the last [`prepare`](Self::prepare)
    /// call, or 0 before any.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Apply a parameter snapshot to every stage.
    ///
    /// Call once per block, before processing. Stage setters clamp, so
    /// the snapshot does not need to be pre-validated.
    pub fn set_parameters(&mut self, params: &EffectParameters) {
        self.input_gain.set_gain_db(params.input_gain_db);

        self.waveshaper.set_amount(params.waveshaper_amount);
        self.waveshaper.set_mix(params.waveshaper_mix);

        self.foldback.set_amount(params.foldback_amount);
        self.foldback.set_mix(params.foldback_mix);

        self.bitcrusher.set_amount(params.crush_amount);
        self.bitcrusher.set_mix(params.crush_mix);

        self.formant.set_morph(params.formant_morph);
        self.formant.set_mix(params.formant_mix);

        self.delay.set_time(params.delay_time);
        self.delay.set_feedback(params.delay_feedback);
        self.delay.set_mix(params.delay_mix);

        self.filter.set_cutoff_hz(params.filter_cutoff_hz);
        self.filter.set_resonance(params.filter_resonance);
        self.filter.set_mode(params.filter_mode);
        self.filter.set_poles(params.filter_poles);

        self.haas.set_width(params.haas_width);

        self.output_gain.set_gain_db(params.output_gain_db);
    }
}

impl Effect for BassChain {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (l, r) = self.input_gain.process_stereo(left, right);
        let (l, r) = self.waveshaper.process_stereo(l, r);
        let (l, r) = self.foldback.process_stereo(l, r);
        let (l, r) = self.bitcrusher.process_stereo(l, r);
        let (l, r) = self.formant.process_stereo(l, r);
        let (l, r) = self.delay.process_stereo(l, r);
        let (l, r) = self.filter.process_stereo(l, r);
        let (l, r) = self.haas.process_stereo(l, r);
        self.output_gain.process_stereo(l, r)
    }

    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert!(
            self.max_block_size == 0 || left.len() <= self.max_block_size,
            "block exceeds the prepared maximum"
        );

        // Stage-sequential, so each stage's own block-boundary work (the
        // formant and mode filter state flushes) runs where it belongs.
        self.input_gain.process_block(left, right);
        self.waveshaper.process_block(left, right);
        self.foldback.process_block(left, right);
        self.bitcrusher.process_block(left, right);
        self.formant.process_block(left, right);
        self.delay.process_block(left, right);
        self.filter.process_block(left, right);
        self.haas.process_block(left, right);
        self.output_gain.process_block(left, right);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.input_gain.set_sample_rate(sample_rate);
        self.waveshaper.set_sample_rate(sample_rate);
        self.foldback.set_sample_rate(sample_rate);
        self.bitcrusher.set_sample_rate(sample_rate);
        self.formant.set_sample_rate(sample_rate);
        self.delay.set_sample_rate(sample_rate);
        self.filter.set_sample_rate(sample_rate);
        self.haas.set_sample_rate(sample_rate);
        self.output_gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.input_gain.reset();
        self.waveshaper.reset();
        self.foldback.reset();
        self.bitcrusher.reset();
        self.formant.reset();
        self.delay.reset();
        self.filter.reset();
        self.haas.reset();
        self.output_gain.reset();
    }

    fn latency_samples(&self) -> usize {
        self.input_gain.latency_samples()
            + self.waveshaper.latency_samples()
            + self.foldback.latency_samples()
            + self.bitcrusher.latency_samples()
            + self.formant.latency_samples()
            + self.delay.latency_samples()
            + self.filter.latency_samples()
            + self.haas.latency_samples()
            + self.output_gain.latency_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FilterMode, FilterPoles};

    #[test]
    fn silence_stays_silence_at_defaults() {
        let mut chain = BassChain::new(48000.0);
        chain.set_parameters(&EffectParameters::default());
        chain.reset();

        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        for _ in 0..8 {
            chain.process_block(&mut left, &mut right);
            for (&l, &r) in left.iter().zip(right.iter()) {
                assert_eq!(l, 0.0);
                assert_eq!(r, 0.0);
            }
        }
    }

    #[test]
    fn default_chain_carries_formant_dry_gain() {
        // The formant stage sums three dry paths at mix 0, so the default
        // chain runs about 3x hot. Pinned here so a gain-structure change
        // is a conscious one.
        let sample_rate = 48000.0;
        let mut chain = BassChain::new(sample_rate);
        chain.set_parameters(&EffectParameters::default());
        chain.reset();

        let step = core::f32::consts::TAU * 200.0 / sample_rate;
        let mut in_sq = 0.0;
        let mut out_sq = 0.0;
        for i in 0..8000 {
            let x = libm::sinf(i as f32 * step) * 0.1;
            let (l, _) = chain.process_stereo(x, x);
            if i >= 4000 {
                in_sq += x * x;
                out_sq += l * l;
            }
        }
        let ratio = libm::sqrtf(out_sq / in_sq);
        assert!((ratio - 3.0).abs() < 0.15, "gain ratio {ratio}");
    }

    #[test]
    fn block_path_matches_per_sample_path() {
        let params = EffectParameters {
            waveshaper_amount: 30.0,
            waveshaper_mix: 0.6,
            crush_amount: 0.4,
            crush_mix: 0.5,
            formant_mix: 0.3,
            delay_time: 0.01,
            delay_mix: 0.4,
            haas_width: 0.2,
            ..EffectParameters::default()
        };

        let mut by_block = BassChain::new(48000.0);
        by_block.set_parameters(&params);
        by_block.reset();

        let mut by_frame = BassChain::new(48000.0);
        by_frame.set_parameters(&params);
        by_frame.reset();

        let mut left = [0.0f32; 128];
        let mut right = [0.0f32; 128];
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            *l = libm::sinf(i as f32 * 0.17) * 0.4;
            *r = libm::sinf(i as f32 * 0.11) * 0.4;
        }
        let mut frame_left = left;
        let mut frame_right = right;

        by_block.process_block(&mut left, &mut right);
        for (l, r) in frame_left.iter_mut().zip(frame_right.iter_mut()) {
            (*l, *r) = by_frame.process_stereo(*l, *r);
        }

        assert_eq!(left, frame_left);
        assert_eq!(right, frame_right);
    }

    #[test]
    fn extreme_settings_stay_finite_and_bounded() {
        let params = EffectParameters {
            input_gain_db: 12.0,
            waveshaper_amount: 200.0,
            waveshaper_mix: 1.0,
            foldback_amount: 200.0,
            foldback_mix: 1.0,
            crush_amount: 1.0,
            crush_mix: 1.0,
            formant_morph: 9.0,
            formant_mix: 1.0,
            delay_time: 0.03,
            delay_feedback: 0.95,
            delay_mix: 1.0,
            filter_cutoff_hz: 800.0,
            filter_resonance: 2.5,
            filter_mode: FilterMode::Bandpass,
            filter_poles: FilterPoles::Two,
            haas_width: 1.0,
            output_gain_db: 12.0,
        };

        let mut chain = BassChain::new(48000.0);
        chain.set_parameters(&params);
        chain.reset();

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        let mut phase = 0u32;
        for _ in 0..40 {
            for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                // Cheap deterministic noise.
                phase = phase.wrapping_mul(1664525).wrapping_add(1013904223);
                *l = (phase >> 8) as f32 / 8388608.0 - 1.0;
                *r = -*l;
            }
            chain.process_block(&mut left, &mut right);
            for (&l, &r) in left.iter().zip(right.iter()) {
                assert!(l.is_finite() && r.is_finite());
                // Resonant bands and near-unity feedback legitimately run
                // hot; the bound only has to catch runaway growth.
                assert!(l.abs() < 1e3 && r.abs() < 1e3);
            }
        }
    }

    #[test]
    fn width_offsets_only_the_left_channel() {
        let params = EffectParameters {
            haas_width: 1.0,
            ..EffectParameters::default()
        };

        let mut chain = BassChain::new(48000.0);
        chain.set_parameters(&params);
        chain.reset();

        // The formant dry sum triples both channels and the wide-open
        // lowpass smears the spike a little; what matters is that the
        // right peak stays at frame 0 and the left peak moves 30 ms.
        let mut left_peak_at = 0;
        let mut left_peak = 0.0f32;
        for i in 0..4000 {
            let x = if i == 0 { 1.0 } else { 0.0 };
            let (l, r) = chain.process_stereo(x, x);
            if l.abs() > left_peak {
                left_peak = l.abs();
                left_peak_at = i;
            }
            if i == 0 {
                assert!(r > 1.0, "right impulse should pass immediately, got {r}");
            }
        }
        assert!(
            (1439..=1441).contains(&left_peak_at),
            "left peak at {left_peak_at}"
        );
    }

    #[test]
    fn prepare_resizes_and_clears() {
        let mut chain = BassChain::new(48000.0);
        chain.set_parameters(&EffectParameters {
            delay_time: 0.5,
            delay_mix: 1.0,
            ..EffectParameters::default()
        });
        chain.reset();
        chain.process_stereo(1.0, 1.0);

        chain.prepare(44100.0, 512);
        assert_eq!(chain.max_block_size(), 512);

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        for _ in 0..50 {
            chain.process_block(&mut left, &mut right);
            for &l in &left {
                assert_eq!(l, 0.0, "stale state survived prepare");
            }
        }
    }

    #[test]
    fn reports_zero_latency() {
        let chain = BassChain::new(48000.0);
        assert_eq!(chain.latency_samples(), 0);
    }
}
