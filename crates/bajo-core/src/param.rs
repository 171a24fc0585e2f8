//! Parameter smoothing for zipper-free changes.
//!
//! Audio parameters (gain, mix, delay time) need smooth transitions to avoid
//! audible "zipper noise" when values change. [`SmoothedParam`] ramps
//! linearly from the current value to a new target over a configured
//! transition time, then snaps to the exact target so settled parameters
//! carry no residual error.
//!
//! ## Usage
//!
//! ```rust
//! use bajo_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::with_config(1.0, 48000.0, 10.0);
//!
//! // Set new target - the ramp happens automatically
//! gain.set_target(0.5);
//!
//! // In the audio callback, advance once per frame
//! for _ in 0..480 { // 10ms at 48kHz
//!     let smoothed_gain = gain.advance();
//!     // Use smoothed_gain for processing...
//! }
//! assert_eq!(gain.get(), 0.5);
//! ```

/// A parameter with linear smoothing (constant rate of change).
///
/// Linear smoothing changes at a constant per-sample increment, which gives
/// predictable transition times and a hard bound on the per-sample step: the
/// value never moves by more than `|target - start| / ramp_samples` in one
/// call to [`advance`](Self::advance). On the last ramp sample the value is
/// set to the exact target, so float accumulation error never leaves a
/// parameter hovering near its destination.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current value
    current: f32,
    /// Target value
    target: f32,
    /// Increment per sample (can be positive or negative)
    increment: f32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Transition time in milliseconds
    transition_time_ms: f32,
}

impl SmoothedParam {
    /// Create a new smoothed parameter at `initial`, settled.
    ///
    /// Defaults to 44.1kHz and a 10ms transition; call
    /// [`set_sample_rate`](Self::set_sample_rate) and
    /// [`set_transition_time_ms`](Self::set_transition_time_ms) (or use
    /// [`with_config`](Self::with_config)) to configure.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate: 44100.0,
            transition_time_ms: 10.0,
        }
    }

    /// Create with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Set the target value, starting a ramp from the current value.
    ///
    /// Re-targeting mid-ramp starts a fresh full-length ramp from wherever
    /// the value currently is. Setting the same target again is a no-op and
    /// leaves any in-flight ramp running.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return; // Same target, no change needed
        }

        self.target = target;

        let samples = (self.transition_time_ms / 1000.0 * self.sample_rate) as u32;
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Set value immediately, cancelling any ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Update sample rate. Affects ramps started after this call.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Set transition time in milliseconds.
    ///
    /// Typical values:
    /// - 5-10 ms: gain, mix, drive
    /// - 100+ ms: delay time, where faster ramps audibly pitch-shift
    pub fn set_transition_time_ms(&mut self, time_ms: f32) {
        self.transition_time_ms = time_ms;
    }

    /// Get next smoothed value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target; // Snap to exact target
            }
        }
        self.current
    }

    /// Get current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the transition is complete.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Snap to target immediately, cancelling any ramp.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
