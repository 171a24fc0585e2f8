//! Equal-power dry/wet mixing.
//!
//! Linear crossfades dip by about 3dB at the midpoint for uncorrelated
//! signals. Weighting the two sides by `cos` and `sin` of a quarter-turn
//! keeps the summed power constant across the whole sweep, which is the
//! standard cure for effects whose wet path is decorrelated from the dry
//! (delays, formant resonators).

use core::f32::consts::FRAC_PI_2;

/// Equal-power crossfade gains for a mix position in [0, 1].
///
/// Returns `(dry_gain, wet_gain)`. The endpoints are exact: mix 0 gives
/// `(1.0, 0.0)` and mix 1 gives `(0.0, 1.0)`, rather than the near-values
/// `cosf`/`sinf` produce at the ends of the quarter-turn.
#[inline]
pub fn equal_power_gains(mix: f32) -> (f32, f32) {
    if mix <= 0.0 {
        return (1.0, 0.0);
    }
    if mix >= 1.0 {
        return (0.0, 1.0);
    }
    let angle = mix * FRAC_PI_2;
    (libm::cosf(angle), libm::sinf(angle))
}

/// Blend `dry` and `wet` with equal-power weighting.
///
/// Mix 0 returns `dry` unchanged and mix 1 returns `wet` unchanged, bit for
/// bit. Out-of-range mix values clamp to the nearer endpoint.
#[inline]
pub fn equal_power_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    if mix <= 0.0 {
        return dry;
    }
    if mix >= 1.0 {
        return wet;
    }
    let angle = mix * FRAC_PI_2;
    dry * libm::cosf(angle) + wet * libm::sinf(angle)
}
