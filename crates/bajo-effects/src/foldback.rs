//! Sine foldback distortion stage.

use bajo_core::{Effect, SmoothedParam, equal_power_mix};
use libm::sinf;

/// Drive range accepted by [`Foldback::set_amount`].
pub const AMOUNT_RANGE: (f32, f32) = (1.0, 200.0);

/// Wavefolding distortion: `sin(input * amount)`, equal-power mixed with
/// the dry signal.
///
/// Unlike a clipper, the sine keeps folding the signal back through zero
/// as the drive rises, so each increment of `amount` adds another layer
/// of harmonics instead of flattening the top. The wet path is bounded
/// to ±1 at any drive. Driven arguments reach ±200, well outside a
/// small-angle approximation, so the wet path uses the properly
/// range-reduced [`sinf`].
pub struct Foldback {
    amount: SmoothedParam,
    mix: SmoothedParam,
}

impl Foldback {
    /// Create a foldback stage at minimum drive, fully dry.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            amount: SmoothedParam::with_config(1.0, sample_rate, 10.0),
            mix: SmoothedParam::with_config(0.0, sample_rate, 10.0),
        }
    }

    /// Set the drive amount, clamped to 1..200.
    pub fn set_amount(&mut self, amount: f32) {
        self.amount
            .set_target(amount.clamp(AMOUNT_RANGE.0, AMOUNT_RANGE.1));
    }

    /// Set the dry/wet mix, clamped to 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.0, 1.0));
    }

    /// Current drive target.
    pub fn amount(&self) -> f32 {
        self.amount.target()
    }

    /// Current mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }
}

impl Effect for Foldback {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let amount = self.amount.advance();
        let mix = self.mix.advance();

        let wet_l = sinf(left * amount);
        let wet_r = sinf(right * amount);

        (
            equal_power_mix(left, wet_l, mix),
            equal_power_mix(right, wet_r, mix),
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.amount.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.amount.snap_to_target();
        self.mix.snap_to_target();
    }
}
