//! Haas stereo widener stage.

use bajo_core::{Effect, InterpolatedDelay, SmoothedParam};

/// Longest Haas offset. Past roughly 30 ms the ear stops fusing the two
/// channels into one source and starts hearing a slapback echo instead.
pub const MAX_HAAS_SECONDS: f32 = 0.03;

/// Stereo widener that delays only the left channel.
///
/// The smoothed width maps 0..1 onto a 0..30 ms left-channel delay; the
/// delayed sample replaces the left channel outright, with no crossfade,
/// and the right channel passes through untouched. The interaural offset
/// alone creates the width. The line is written before it is read, so
/// zero width reads back the sample just written and the stage becomes an
/// exact passthrough.
pub struct HaasWidener {
    line_l: InterpolatedDelay,
    width: SmoothedParam,
    sample_rate: f32,
}

impl HaasWidener {
    /// Create a widener at zero width.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            line_l: InterpolatedDelay::from_time(sample_rate, MAX_HAAS_SECONDS),
            width: SmoothedParam::with_config(0.0, sample_rate, 10.0),
            sample_rate,
        }
    }

    /// Set the width, clamped to 0..1.
    pub fn set_width(&mut self, width: f32) {
        self.width.set_target(width.clamp(0.0, 1.0));
    }

    /// Current width target.
    pub fn width(&self) -> f32 {
        self.width.target()
    }
}

impl Effect for HaasWidener {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let width = self.width.advance();
        let delay_samples = width * MAX_HAAS_SECONDS * self.sample_rate;

        self.line_l.write(left);
        (self.line_l.read(delay_samples), right)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.line_l = InterpolatedDelay::from_time(sample_rate, MAX_HAAS_SECONDS);
        self.width.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.line_l.clear();
        self.width.snap_to_target();
    }
}
