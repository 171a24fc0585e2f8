//! Hyperbolic-tangent waveshaper stage.

use bajo_core::{Effect, SmoothedParam, equal_power_mix, fast_tanh};

/// Drive range accepted by [`Waveshaper::set_amount`].
pub const AMOUNT_RANGE: (f32, f32) = (1.0, 200.0);

/// Soft-saturating distortion: `tanh(input * amount)`, equal-power mixed
/// with the dry signal.
///
/// The wet path is bounded to ±1 no matter how hard it is driven, which is
/// what makes this stage safe as the first distortion in the chain. Note
/// that `tanh(x)` is not the identity at `amount = 1`, so full-wet at
/// minimum drive still colors the signal slightly; use the mix to blend
/// back to clean.
///
/// # Example
///
/// ```rust
/// use bajo_core::Effect;
/// use bajo_effects::Waveshaper;
///
/// let mut shaper = Waveshaper::new(48000.0);
/// shaper.set_amount(40.0);
/// shaper.set_mix(1.0);
/// let (l, r) = shaper.process_stereo(0.5, 0.5);
/// assert!(l.abs() <= 1.0);
/// ```
pub struct Waveshaper {
    amount: SmoothedParam,
    mix: SmoothedParam,
}

impl Waveshaper {
    /// Create a waveshaper at minimum drive, fully dry.
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

impl Effect for Waveshaper {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let amount = self.amount.advance();
        let mix = self.mix.advance();

        let wet_l = fast_tanh(left * amount);
        let wet_r = fast_tanh(right * amount);

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
