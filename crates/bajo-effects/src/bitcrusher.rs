//! Sample-and-hold bit crusher stage.

use bajo_core::{Effect, SmoothedParam, SquareWavetable, equal_power_mix, lerp, remap};

/// Downsampling crusher driven by a square-wave latch gate.
///
/// A square oscillator gates a stereo sample-and-hold: while the gate is
/// high every frame latches fresh input, while it is low the held frame
/// repeats. At `amount = 0` the gate runs at the sample rate and latches
/// every frame, so the wet path is a bit-exact passthrough; at `amount = 1`
/// the gate drops to 20 Hz and the output turns into coarse steps.
///
/// `amount` is applied immediately rather than smoothed. The gate keeps
/// its phase across the change, so retuning it mid-stream just stretches
/// or shrinks the current gate cycle and never steps the output.
pub struct Bitcrusher {
    gate: SquareWavetable,
    mix: SmoothedParam,

    amount: f32,
    sample_rate: f32,

    // Sample-and-hold state, latched for both channels by one gate decision.
    held_l: f32,
    held_r: f32,
}

impl Bitcrusher {
    /// Create a crusher at zero amount, fully dry.
    pub fn new(sample_rate: f32) -> Self {
        let mut crusher = Self {
            gate: SquareWavetable::new(sample_rate),
            mix: SmoothedParam::with_config(0.0, sample_rate, 10.0),
            amount: 0.0,
            sample_rate,
            held_l: 0.0,
            held_r: 0.0,
        };
        crusher.update_gate_frequency();
        crusher
    }

    /// Set the crush amount, clamped to 0..1.
    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(0.0, 1.0);
        self.update_gate_frequency();
    }

    /// Set the dry/wet mix, clamped to 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(mix.clamp(0.0, 1.0));
    }

    /// Current crush amount.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Current mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    /// Current latch gate frequency in Hz.
    pub fn gate_frequency(&self) -> f32 {
        self.gate.frequency()
    }

    // Map amount to a gate frequency: the crush factor sweeps 1..sample_rate,
    // and the resulting rate is rescaled so the floor sits at 20 Hz instead
    // of 1 Hz.
    fn update_gate_frequency(&mut self) {
        let crush = lerp(1.0, self.sample_rate, self.amount);
        let freq = remap(
            self.sample_rate / crush,
            1.0,
            self.sample_rate,
            20.0,
            self.sample_rate,
        );
        self.gate.set_frequency(freq);
    }
}

impl Effect for Bitcrusher {
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mix = self.mix.advance();

        // One gate sample per frame; both channels share the latch decision.
        if self.gate.next() >= 0.0 {
            self.held_l = left;
            self.held_r = right;
        }

        (
            equal_power_mix(left, self.held_l, mix),
            equal_power_mix(right, self.held_r, mix),
        )
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.mix.set_sample_rate(sample_rate);
        self.gate.set_sample_rate(sample_rate);
        self.update_gate_frequency();
    }

    fn reset(&mut self) {
        self.held_l = 0.0;
        self.held_r = 0.0;
        self.gate.reset();
        self.mix.snap_to_target();
    }
}
