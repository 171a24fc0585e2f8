//! Circular-buffer delay line with fractional-delay interpolation.
//!
//! The building block behind the feedback delay stage and the Haas widener.
//! Both need fractional read positions: delay time is a smoothed parameter,
//! so the read head sits between samples while a time change ramps.
//!
//! # Interpolation
//!
//! | Method | Cost | Use |
//! |--------|------|-----|
//! | [`Interpolation::None`] | lowest | fixed integer delays |
//! | [`Interpolation::Linear`] | low | short delays (Haas) |
//! | [`Interpolation::Cubic`] | medium | long modulated delays |

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Interpolation method for fractional delay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// No interpolation (truncate to nearest sample)
    None,
    /// Linear interpolation between two samples
    #[default]
    Linear,
    /// Cubic interpolation (4-point, smoother)
    Cubic,
}

/// Interpolated delay line using a circular buffer (heap-allocated).
///
/// # Memory
///
/// The buffer is heap-allocated during construction but never reallocates.
/// No allocations occur during audio processing.
///
/// # Read/write ordering
///
/// [`read`](Self::read) returns the sample written `delay_samples` writes
/// before the most recent one, counting the most recent write as delay 0.
/// So `write` followed by `read(d)` sees an impulse at exactly `d`, while
/// [`read_write`](Self::read_write) (read first, then write) sees it at
/// `d` counted from one write earlier. Feedback loops need the read-first
/// ordering; plain taps usually want write-first.
///
/// # Example
///
/// ```rust
/// use bajo_core::InterpolatedDelay;
///
/// let mut delay = InterpolatedDelay::new(64);
/// delay.write(1.0);
/// for _ in 0..10 {
///     delay.write(0.0);
/// }
/// assert_eq!(delay.read(10.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Write position in buffer
    write_pos: usize,
    /// Interpolation method for fractional delay reads
    interpolation: Interpolation,
}

impl InterpolatedDelay {
    /// Creates a new delay line with the given maximum delay in samples.
    ///
    /// # Panics
    ///
    /// Panics if `max_delay_samples` is 0.
    pub fn new(max_delay_samples: usize) -> Self {
        assert!(max_delay_samples > 0, "Delay size must be > 0");

        Self {
            buffer: vec![0.0; max_delay_samples],
            write_pos: 0,
            interpolation: Interpolation::Linear,
        }
    }

    /// Creates a delay line from sample rate and max delay time in seconds.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        let max_samples = (sample_rate * max_seconds) as usize + 1;
        Self::new(max_samples)
    }

    /// Sets the interpolation method for fractional delay reads.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
    }

    /// Reads a delayed sample with the configured interpolation method.
    ///
    /// `delay_samples` may be fractional and is clamped to the buffer
    /// capacity minus one.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        debug_assert!(delay_samples >= 0.0);

        let len = self.buffer.len();
        let delay_clamped = delay_samples.min((len - 1) as f32);

        let delay_int = delay_clamped as usize;
        let frac = delay_clamped - delay_int as f32;

        // Points to the sample `delay_int` samples before the last written.
        let read_pos = (self.write_pos + len - delay_int - 1) % len;

        match self.interpolation {
            Interpolation::None => self.buffer[read_pos],

            Interpolation::Linear => {
                let next_pos = (read_pos + len - 1) % len;
                let a = self.buffer[read_pos];
                let b = self.buffer[next_pos];
                a + (b - a) * frac
            }

            Interpolation::Cubic => {
                // 4-point cubic Lagrange interpolation
                let p0 = (read_pos + 1) % len;
                let p1 = read_pos;
                let p2 = (read_pos + len - 1) % len;
                let p3 = (read_pos + len - 2) % len;

                let y0 = self.buffer[p0];
                let y1 = self.buffer[p1];
                let y2 = self.buffer[p2];
                let y3 = self.buffer[p3];

                let t = frac;
                let t2 = t * t;
                let t3 = t2 * t;

                let a0 = y3 - y2 - y0 + y1;
                let a1 = y0 - y1 - a0;
                let a2 = y2 - y0;

                a0 * t3 + a1 * t2 + a2 * t + y1
            }
        }
    }

    /// Writes a sample to the delay line and advances the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Combined read-then-write, the ordering feedback loops need.
    #[inline]
    pub fn read_write(&mut self, sample: f32, delay_samples: f32) -> f32 {
        let output = self.read(delay_samples);
        self.write(sample);
        output
    }

    /// Clears the delay line (sets all samples to 0).
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Returns the maximum delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_delay_is_exact() {
        let mut delay = InterpolatedDelay::new(10);

        for i in 1..=5 {
            delay.write(i as f32);
        }

        delay.write(6.0);
        assert_eq!(delay.read(3.0), 3.0);
        assert_eq!(delay.read(0.0), 6.0);
    }

    #[test]
    fn impulse_round_trip() {
        // Write-then-read places an impulse at exactly its delay.
        let mut delay = InterpolatedDelay::new(512);
        let d = 100;

        for i in 0..400 {
            let input = if i == 0 { 1.0 } else { 0.0 };
            delay.write(input);
            let out = delay.read(d as f32);
            if i == d {
                assert_eq!(out, 1.0, "impulse missing at sample {i}");
            } else {
                assert_eq!(out, 0.0, "leakage at sample {i}");
            }
        }
    }

    #[test]
    fn linear_interpolation_midpoint() {
        let mut delay = InterpolatedDelay::new(10);

        delay.write(0.0);
        delay.write(1.0);
        delay.write(2.0);
        delay.write(3.0);

        let output = delay.read(1.5);
        assert!((output - 1.5).abs() < 0.01, "Expected ~1.5, got {}", output);
    }

    #[test]
    fn read_crosses_wrap_boundary() {
        let mut delay = InterpolatedDelay::new(4);

        delay.write(1.0);
        delay.write(2.0);
        delay.write(3.0);
        delay.write(4.0);
        delay.write(5.0); // write_pos wraps to 0

        assert_eq!(delay.read(3.0), 2.0);
    }

    #[test]
    fn read_clamps_to_capacity() {
        let mut delay = InterpolatedDelay::new(8);
        for i in 0..8 {
            delay.write(i as f32);
        }

        // Requesting more delay than the buffer holds clamps to len - 1.
        assert_eq!(delay.read(100.0), delay.read(7.0));
    }

    #[test]
    fn none_interpolation_truncates() {
        let mut delay = InterpolatedDelay::new(16);
        delay.set_interpolation(Interpolation::None);

        for i in 0..5 {
            delay.write(i as f32);
        }

        // 1.7 truncates to delay 1 = second-to-last written.
        assert_eq!(delay.read(1.7), 3.0);
    }

    #[test]
    fn cubic_exact_at_integer_delay() {
        let mut delay = InterpolatedDelay::new(64);
        delay.set_interpolation(Interpolation::Cubic);

        for i in 0..32 {
            delay.write(libm::sinf(i as f32 * 0.3));
        }

        // frac = 0 collapses the polynomial to the stored sample.
        let mut reference = InterpolatedDelay::new(64);
        reference.set_interpolation(Interpolation::None);
        for i in 0..32 {
            reference.write(libm::sinf(i as f32 * 0.3));
        }

        for d in [2.0, 5.0, 11.0, 20.0] {
            assert_eq!(delay.read(d), reference.read(d));
        }
    }

    #[test]
    fn cubic_beats_linear_on_smooth_signal() {
        let mut delay_lin = InterpolatedDelay::new(64);
        let mut delay_cub = InterpolatedDelay::new(64);
        delay_cub.set_interpolation(Interpolation::Cubic);

        for i in 0..32 {
            let sample = libm::sinf(i as f32 * core::f32::consts::TAU / 32.0);
            delay_lin.write(sample);
            delay_cub.write(sample);
        }

        // delay 5.5 from the last written (sample 31) is position 25.5.
        let true_val = libm::sinf(25.5 * core::f32::consts::TAU / 32.0);

        let lin_err = (delay_lin.read(5.5) - true_val).abs();
        let cub_err = (delay_cub.read(5.5) - true_val).abs();

        assert!(
            cub_err <= lin_err,
            "Cubic error ({cub_err}) should be <= linear error ({lin_err})"
        );
    }

    #[test]
    fn cubic_survives_wrap_around() {
        let mut delay = InterpolatedDelay::new(8);
        delay.set_interpolation(Interpolation::Cubic);

        for i in 0..12 {
            delay.write(i as f32);
        }

        let output = delay.read(6.5);
        assert!(output.is_finite());
    }

    #[test]
    fn clear_zeroes_history() {
        let mut delay = InterpolatedDelay::new(16);
        for _ in 0..16 {
            delay.write(1.0);
        }
        delay.clear();

        for d in 0..15 {
            assert_eq!(delay.read(d as f32), 0.0);
        }
    }

    #[test]
    #[should_panic]
    fn zero_size_panics() {
        let _delay = InterpolatedDelay::new(0);
    }

    #[test]
    fn from_time_rounds_up() {
        let delay = InterpolatedDelay::from_time(48000.0, 1.0);
        assert_eq!(delay.capacity(), 48001);
    }
}
