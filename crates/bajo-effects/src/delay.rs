//! Feedback delay stage.

use bajo_core::{
    Effect, InterpolatedDelay, Interpolation, SmoothedParam, equal_power_mix, flush_denormal,
};

/// Longest supported delay.
pub const MAX_DELAY_SECONDS: f32 = 1.0;

/// Feedback ceiling; settings above this are capped to keep the loop decaying.
pub const MAX_FEEDBACK: f32 = 0.95;

/// Stereo feedback delay with cubic-interpolated reads.
///
/// Per frame each channel reads the line at the smoothed delay length,
/// writes back `input + delayed * feedback`, and equal-power mixes the
/// delayed read against the dry input. The read happens before the write,
/// so a delay of `d` samples surfaces `d + 1` frames later.
///
/// The delay time is smoothed in samples with a long 100 ms ramp; moving
/// the time therefore tape-slews the pitch briefly instead of jumping,
/// and the cubic read keeps that slew free of zipper grit.
pub struct Delay {
    line_l: InterpolatedDelay,
    line_r: InterpolatedDelay,

    time: SmoothedParam,
    feedback: SmoothedParam,
    mix: SmoothedParam,

    // Normalized setting retained so a sample-rate change can re-derive
    // the smoothed length in samples.
    time_norm: f32,
    sample_rate: f32,
}

impl Delay {
    /// Create a delay at zero length, zero feedback, fully dry.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            line_l: Self::make_line(sample_rate),
            line_r: Self::make_line(sample_rate),
            time: SmoothedParam::with_config(0.0, sample_rate, 100.0),
            feedback: SmoothedParam::with_config(0.0, sample_rate, 10.0),
            mix: SmoothedParam::with_config(0.0, sample_rate, 10.0),
            time_norm: 0.0,
            sample_rate,
        }
    }

    fn make_line(sample_rate: f32) -> InterpolatedDelay {
        let mut line = InterpolatedDelay::from_time(sample_rate, MAX_DELAY_SECONDS);
        line.set_interpolation(Interpolation::Cubic);
        line
    }

    /// Set the delay time as a fraction of [`MAX_DELAY_SECONDS`], clamped
    /// to 0..1.
    pub fn set_time(&mut self, normalized: f32) {
        self.time_norm = normalized.clamp(0.0, 1.0);
        self.time
            .set_target(self.time_norm * MAX_DELAY_SECONDS * self.sample_rate);
    }

    /// Set the feedback amount, clamped to 0..[`MAX_FEEDBACK`].
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback.set_target(feedback.clamp(0.0, MAX_FEEDBACK));
    }

    /// Set the dry/wet mix, clamped to 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.0, 1.0));
    }

    /// Current normalized delay time setting.
    pub fn time(&self) -> f32 {
        self.time_norm
    }

    /// Current feedback target.
    pub fn feedback(&self) -> f32 {
        self.feedback.target()
    }

    /// Current mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }
}

impl Effect for Delay {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let delay_samples = self.time.advance();
        let feedback = self.feedback.advance();
        let mix = self.mix.advance();

        let delayed_l = self.line_l.read(delay_samples);
        let delayed_r = self.line_r.read(delay_samples);

        self.line_l.write(flush_denormal(left + delayed_l * feedback));
        self.line_r.write(flush_denormal(right + delayed_r * feedback));

        (
            equal_power_mix(left, delayed_l, mix),
            equal_power_mix(right, delayed_r, mix),
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.line_l = Self::make_line(sample_rate);
        self.line_r = Self::make_line(sample_rate);
        self.time.set_sample_rate(sample_rate);
        self.feedback.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
        // The smoothed length is in samples of the old rate; snap it to
        // the equivalent length at the new one.
        self.time
            .set_immediate(self.time_norm * MAX_DELAY_SECONDS * sample_rate);
    }

    fn reset(&mut self) {
        self.line_l.clear();
        self.line_r.clear();
        self.time.snap_to_target();
        self.feedback.snap_to_target();
        self.mix.snap_to_target();
    }
}
