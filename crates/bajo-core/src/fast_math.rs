//! Polynomial approximations for transcendental functions on the hot path.
//!
//! `libm` calls are correct everywhere but cost more than the DSP around
//! them. These Padé approximants trade a bounded error for speed inside the
//! argument ranges the effects actually use. Callers outside those ranges
//! (the waveshaper drives its nonlinearity with arguments up to a few
//! hundred) go through the saturating branch or fall back to `libm`.

/// Fast tangent approximation for filter coefficient computation.
///
/// Continued-fraction Padé approximant, accurate to ~0.1% for
/// `|x| < 1.0` (cutoffs below about a quarter of the sample rate).
/// The filter falls back to `libm::tanf` above that.
#[inline]
pub fn fast_tan(x: f32) -> f32 {
    let x2 = x * x;
    x * (15.0 - x2) / (15.0 - 6.0 * x2)
}

/// Fast hyperbolic tangent approximation.
///
/// 7/6-order Padé approximant with hard saturation to +/-1 outside
/// `|x| > 4.95`, where the rational form starts to drift above 1. Within
/// the rational region the error against `tanh` stays below 1e-3, output
/// magnitude never exceeds 1, and the curve is monotone, so waveshaper
/// drive can push arguments arbitrarily high without overshoot.
#[inline]
pub fn fast_tanh(x: f32) -> f32 {
    if x.abs() > 4.95 {
        return 1.0_f32.copysign(x);
    }
    let x2 = x * x;
    let numerator = x * (135135.0 + x2 * (17325.0 + x2 * (378.0 + x2)));
    let denominator = 135135.0 + x2 * (62370.0 + x2 * (3150.0 + 28.0 * x2));
    numerator / denominator
}
