//! Smoothed gain stage, used at both ends of the chain.

use bajo_core::{Effect, SmoothedParam, db_to_linear, linear_to_db};

/// Gain range accepted by [`Gain::set_gain_db`], in dB.
pub const GAIN_DB_RANGE: (f32, f32) = (-100.0, 12.0);

/// Stereo gain with a 10 ms linear ramp between settings.
///
/// The ramp runs on the linear gain, not the dB value, so a jump from
/// silence to unity never steps the output.
///
/// # Example
///
/// ```rust
/// use bajo_core::Effect;
/// use bajo_effects::Gain;
///
/// let mut gain = Gain::new(48000.0);
/// gain.set_gain_db(-6.0);
/// let (l, r) = gain.process_stereo(0.5, 0.5);
/// ```
pub struct Gain {
    gain: SmoothedParam,
}

impl Gain {
    /// Create a unity-gain stage.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gain: SmoothedParam::with_config(1.0, sample_rate, 10.0),
        }
    }

    /// Set the gain in decibels, clamped to -100..+12 dB.
    pub fn set_gain_db(&mut self, db: f32) {
        let db = db.clamp(GAIN_DB_RANGE.0, GAIN_DB_RANGE.1);
        self.gain.set_target(db_to_linear(db));
    }

    /// Current gain target in decibels.
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.gain.target())
    }
}

impl Effect for Gain {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain = self.gain.advance();
        (left * gain, right * gain)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_by_default() {
        let mut gain = Gain::new(48000.0);
        let (l, r) = gain.process_stereo(0.25, -0.5);
        assert_eq!(l, 0.25);
        assert_eq!(r, -0.5);
    }

    #[test]
    fn applies_gain_after_settling() {
        let mut gain = Gain::new(48000.0);
        gain.set_gain_db(-6.0);
        gain.reset();

        let (l, _) = gain.process_stereo(1.0, 1.0);
        let expected = db_to_linear(-6.0);
        assert!((l - expected).abs() < 1e-6);
    }

    #[test]
    fn ramp_has_no_steps() {
        let mut gain = Gain::new(48000.0);
        gain.set_gain_db(12.0);

        let span = db_to_linear(12.0) - 1.0;
        let ramp_samples = 0.010 * 48000.0;
        let max_step = span / ramp_samples + 1e-6;

        let mut prev = 1.0;
        for _ in 0..600 {
            let (l, _) = gain.process_stereo(1.0, 1.0);
            assert!((l - prev).abs() <= max_step, "step {} > {}", l - prev, max_step);
            prev = l;
        }
        assert!((prev - db_to_linear(12.0)).abs() < 1e-5);
    }

    #[test]
    fn clamps_out_of_range_settings() {
        let mut gain = Gain::new(48000.0);
        gain.set_gain_db(40.0);
        assert!((gain.gain_db() - 12.0).abs() < 1e-3);

        gain.set_gain_db(-500.0);
        assert!((gain.gain_db() + 100.0).abs() < 1e-3);
    }

    #[test]
    fn floor_is_near_silence() {
        let mut gain = Gain::new(48000.0);
        gain.set_gain_db(-100.0);
        gain.reset();

        let (l, _) = gain.process_stereo(1.0, 1.0);
        assert!(l.abs() < 2e-5);
    }

    #[test]
    fn channels_share_one_ramp() {
        let mut gain = Gain::new(48000.0);
        gain.set_gain_db(6.0);

        for _ in 0..100 {
            let (l, r) = gain.process_stereo(1.0, 1.0);
            assert_eq!(l, r);
        }
    }
}
