//! Small math utilities shared across the DSP code.

use core::f32::consts::LN_10;

/// Convert decibels to a linear amplitude factor.
///
/// 0 dB maps to 1.0, +6 dB to roughly 2.0, -6 dB to roughly 0.5.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    libm::expf(db * LN_10 / 20.0)
}

/// Convert a linear amplitude factor to decibels.
///
/// Input is floored at 1e-10 so silence maps to -200 dB instead of
/// negative infinity.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    libm::logf(linear.max(1e-10)) * 20.0 / LN_10
}

/// Linear interpolation between `a` and `b` by `t` in [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Remap `value` from the range [`in_min`, `in_max`] to [`out_min`, `out_max`].
///
/// No clamping: values outside the input range extrapolate.
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Flush denormal floats to zero.
///
/// Recursive filter state decays into the denormal range, where arithmetic
/// can be orders of magnitude slower on some CPUs. Feedback paths call this
/// on their state after each update.
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert a duration in milliseconds to a sample count at `sample_rate`.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * 0.001 * sample_rate
}
