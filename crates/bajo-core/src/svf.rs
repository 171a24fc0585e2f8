//! State Variable Filter.
//!
//! A 2-pole filter producing lowpass, bandpass, and highpass outputs
//! simultaneously from one state update. The mode filter picks one output
//! (and cascades two instances for the steeper slope); the formant filter
//! runs three of these as bandpass resonators.
//!
//! # Topology
//!
//! Implements the Topology-Preserving Transform (TPT) SVF after Zavalishin,
//! "The Art of VA Filter Design" (2012). The TPT approach uses the
//! trapezoidal integrator discretization, which preserves the analog
//! prototype's frequency response and stays stable under cutoff modulation,
//! which matters here because the formant resonators sweep continuously
//! while the vowel morphs.
//!
//! # Performance
//!
//! [`set_cutoff`](StateVariableFilter::set_cutoff) uses [`fast_tan`] for
//! cutoff frequencies below 10 kHz, falling back to [`libm::tanf`] above
//! 10 kHz where the Padé approximation loses accuracy.

use core::f32::consts::PI;
use libm::tanf;

use crate::fast_math::fast_tan;
use crate::math::flush_denormal;

/// The three simultaneous outputs of one filter tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvfOutputs {
    /// Low-pass output, passes frequencies below the cutoff.
    pub lowpass: f32,
    /// Band-pass output, passes frequencies near the cutoff.
    pub bandpass: f32,
    /// High-pass output, passes frequencies above the cutoff.
    pub highpass: f32,
}

/// State Variable Filter (2-pole, 12 dB/oct per output).
///
/// ## Parameters
///
/// - `cutoff`: cutoff frequency in Hz (20.0 to sr×0.49, default 1000.0)
/// - `resonance`: Q factor (0.5 to 100.0, default 0.707)
///
/// The wide resonance ceiling exists for the formant resonators, whose Q is
/// derived from the formant frequency and reaches the 60s for high vowels.
///
/// # Example
///
/// ```rust
/// use bajo_core::StateVariableFilter;
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_cutoff(1000.0);
/// svf.set_resonance(2.0);
///
/// let outs = svf.process(0.5);
/// let _ = outs.lowpass;
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    // Filter state
    ic1eq: f32,
    ic2eq: f32,

    // Coefficients
    g: f32,
    k: f32,

    // Parameters
    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Create a new SVF with the given sample rate.
    ///
    /// Initialises with cutoff = 1000 Hz, Q = 0.707 (Butterworth).
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff: 1000.0,
            resonance: 0.707,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz.
    ///
    /// Range: 20.0 to `sample_rate × 0.49`. Values are clamped.
    pub fn set_cutoff(&mut self, freq: f32) {
        self.cutoff = freq.clamp(20.0, self.sample_rate * 0.49);
        self.update_coefficients();
    }

    /// Get current cutoff frequency in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (Q factor).
    ///
    /// Range: 0.5 to 100.0. Values are clamped. Q = 0.707 gives a
    /// Butterworth (maximally flat) response.
    pub fn set_resonance(&mut self, q: f32) {
        self.resonance = q.clamp(0.5, 100.0);
        self.update_coefficients();
    }

    /// Get current resonance (Q factor).
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Update the sample rate, re-deriving coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    /// Clear the integrator state.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Flush near-zero integrator state to exactly zero.
    ///
    /// Called once per block by the filter stages. High-Q resonators hold
    /// decaying energy in their state long after the input goes silent;
    /// flushing below 1e-8 ends the tail instead of letting it creep
    /// through the denormal range. Larger state is untouched, so there is
    /// no audible discontinuity.
    pub fn snap_to_zero(&mut self) {
        if self.ic1eq.abs() < 1e-8 {
            self.ic1eq = 0.0;
        }
        if self.ic2eq.abs() < 1e-8 {
            self.ic2eq = 0.0;
        }
    }

    /// Recompute filter coefficients from cutoff and resonance.
    fn update_coefficients(&mut self) {
        let arg = PI * self.cutoff / self.sample_rate;
        self.g = if self.cutoff < 10_000.0 {
            fast_tan(arg)
        } else {
            tanf(arg)
        };
        self.k = 1.0 / self.resonance;
    }

    /// Process one sample, returning all three outputs.
    #[inline]
    pub fn process(&mut self, input: f32) -> SvfOutputs {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        SvfOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: input - self.k * v1 - v2,
        }
    }
}
