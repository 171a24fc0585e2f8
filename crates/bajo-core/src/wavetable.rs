//! Square wavetable oscillator.
//!
//! A 1024-entry square table read with a truncating phase accumulator. The
//! bitcrusher uses it as a sample-and-hold gate: the table's sign decides
//! whether the crusher latches a fresh input sample or repeats the held one.
//! The deliberately crude lookup (no interpolation, floor indexing) is part
//! of the sound.

const TABLE_LEN: usize = 1024;

const fn build_table() -> [f32; TABLE_LEN] {
    let mut table = [0.0_f32; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = if i < TABLE_LEN / 2 { 1.0 } else { -1.0 };
        i += 1;
    }
    table
}

static SQUARE_TABLE: [f32; TABLE_LEN] = build_table();

/// Square wave oscillator reading a fixed wavetable.
///
/// The phase accumulates in table-index units (`freq * table_len /
/// sample_rate` per call) and wraps at the table length. At `freq ==
/// sample_rate` the increment equals the table length, so the phase lands on
/// index 0 every sample and the output pins at +1.0.
#[derive(Debug, Clone)]
pub struct SquareWavetable {
    /// Phase in table-index units [0.0, TABLE_LEN)
    phase: f32,
    /// Phase increment per sample, in table-index units
    phase_inc: f32,
    /// Oscillator frequency in Hz
    freq_hz: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl SquareWavetable {
    /// Create a new oscillator at `sample_rate`, initially at 0 Hz.
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            phase: 0.0,
            phase_inc: 0.0,
            freq_hz: 0.0,
            sample_rate,
        };
        osc.set_frequency(0.0);
        osc
    }

    /// Set frequency in Hz, clamped to `[0, sample_rate]`.
    ///
    /// The clamp keeps the per-sample increment at or below the table
    /// length, so a single wrap subtraction is always enough.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.freq_hz = freq_hz.clamp(0.0, self.sample_rate);
        self.phase_inc = self.freq_hz * TABLE_LEN as f32 / self.sample_rate;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.freq_hz
    }

    /// Update the sample rate, preserving the frequency in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_frequency(self.freq_hz);
    }

    /// Reset phase to the start of the table.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Get the next sample and advance the phase.
    ///
    /// Lookup truncates the phase to an integer index.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let output = SQUARE_TABLE[self.phase as usize];

        self.phase += self.phase_inc;
        if self.phase >= TABLE_LEN as f32 {
            self.phase -= TABLE_LEN as f32;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_halves() {
        assert_eq!(SQUARE_TABLE[0], 1.0);
        assert_eq!(SQUARE_TABLE[TABLE_LEN / 2 - 1], 1.0);
        assert_eq!(SQUARE_TABLE[TABLE_LEN / 2], -1.0);
        assert_eq!(SQUARE_TABLE[TABLE_LEN - 1], -1.0);
    }

    #[test]
    fn output_is_full_scale_square() {
        let mut osc = SquareWavetable::new(48000.0);
        osc.set_frequency(1000.0);

        for _ in 0..4096 {
            let v = osc.next();
            assert!(v == 1.0 || v == -1.0, "non-square sample {v}");
        }
    }

    #[test]
    fn frequency_equal_to_sample_rate_pins_high() {
        // Increment equals the table length, so the wrapped phase returns
        // to index 0 on every sample.
        let mut osc = SquareWavetable::new(48000.0);
        osc.set_frequency(48000.0);

        for _ in 0..1000 {
            assert_eq!(osc.next(), 1.0);
        }
    }

    #[test]
    fn half_sample_rate_alternates() {
        let mut osc = SquareWavetable::new(48000.0);
        osc.set_frequency(24000.0);

        for i in 0..100 {
            let expected = if i % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(osc.next(), expected, "sample {i}");
        }
    }

    #[test]
    fn duty_cycle_is_half() {
        let mut osc = SquareWavetable::new(48000.0);
        osc.set_frequency(100.0);

        let n = 48000;
        let mut positive = 0;
        for _ in 0..n {
            if osc.next() > 0.0 {
                positive += 1;
            }
        }

        let duty = positive as f32 / n as f32;
        assert!((duty - 0.5).abs() < 0.01, "duty cycle {duty}");
    }

    #[test]
    fn set_frequency_clamps_above_sample_rate() {
        let mut osc = SquareWavetable::new(48000.0);
        osc.set_frequency(96000.0);
        assert_eq!(osc.frequency(), 48000.0);

        osc.set_frequency(-10.0);
        assert_eq!(osc.frequency(), 0.0);
    }

    #[test]
    fn sample_rate_change_preserves_frequency() {
        let mut osc = SquareWavetable::new(44100.0);
        osc.set_frequency(440.0);
        osc.set_sample_rate(96000.0);
        assert_eq!(osc.frequency(), 440.0);

        // Increment scales with table length over the new rate.
        assert!((osc.phase_inc - 440.0 * 1024.0 / 96000.0).abs() < 1e-4);
    }
}
