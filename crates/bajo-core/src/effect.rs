//! The [`Effect`] trait: the common interface for all chain stages.
//!
//! Every stage in the bass chain processes stereo frames. Even stages whose
//! left and right math is identical (gain, waveshaping) keep independent
//! per-channel state where they have any, so the trait's unit of work is one
//! stereo frame rather than one mono sample.

/// A stereo audio effect processing one frame at a time.
///
/// # Contract
///
/// - [`process_stereo`](Effect::process_stereo) is the per-sample hot path:
///   no allocation, no locking, no panics.
/// - [`set_sample_rate`](Effect::set_sample_rate) is a prepare-time call and
///   may allocate (delay buffers are sized from the rate). It must never be
///   called from the audio callback.
/// - [`reset`](Effect::reset) clears internal state (delay buffers, filter
///   integrators, held samples) and settles parameter ramps at their current
///   targets, as if the effect had just been prepared.
pub trait Effect {
    /// Process one stereo frame, returning the processed `(left, right)`.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of samples in place, one channel slice per side.
    ///
    /// The default implementation loops [`process_stereo`](Self::process_stereo).
    /// Stages with block-boundary work (mode latching, post-block state
    /// flushing) override this.
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
    }

    /// Update the sample rate, re-deriving coefficients and buffer sizes.
    ///
    /// Prepare-time only; may allocate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state without changing parameter targets.
    fn reset(&mut self);

    /// Fixed processing latency introduced by this effect, in samples.
    ///
    /// Zero for every stage in this crate family; kept on the trait so a
    /// host can sum the chain's latency for delay compensation.
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain {
        gain: f32,
        sample_rate: f32,
    }

    impl Gain {
        fn new(gain: f32) -> Self {
            Self {
                gain,
                sample_rate: 48000.0,
            }
        }
    }

    impl Effect for Gain {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.gain, right * self.gain)
        }

        fn set_sample_rate(&mut self, sample_rate: f32) {
            self.sample_rate = sample_rate;
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn default_process_block_loops_frames() {
        let mut gain = Gain::new(2.0);
        let mut left = [1.0, 2.0, 3.0];
        let mut right = [-1.0, -2.0, -3.0];

        gain.process_block(&mut left, &mut right);

        assert_eq!(left, [2.0, 4.0, 6.0]);
        assert_eq!(right, [-2.0, -4.0, -6.0]);
    }

    #[test]
    fn block_matches_per_sample() {
        let mut per_sample = Gain::new(0.5);
        let mut per_block = Gain::new(0.5);

        let input: [f32; 8] = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7, -0.8];
        let mut left = input;
        let mut right = input;
        per_block.process_block(&mut left, &mut right);

        for (i, &x) in input.iter().enumerate() {
            let (l, r) = per_sample.process_stereo(x, x);
            assert_eq!(left[i], l);
            assert_eq!(right[i], r);
        }
    }

    #[test]
    fn latency_defaults_to_zero() {
        let mut gain = Gain::new(1.0);
        gain.set_sample_rate(96000.0);
        assert_eq!(gain.sample_rate, 96000.0);
        assert_eq!(gain.latency_samples(), 0);
    }
}
