//! # bajo-core
//!
//! Core DSP primitives for the bajo bass effects chain.
//!
//! This crate provides the building blocks the effect stages in
//! `bajo-effects` are assembled from:
//!
//! - [`Effect`]: the stereo per-sample processing trait all stages implement
//! - [`SmoothedParam`]: linear parameter ramping for zipper-free control changes
//! - [`equal_power_mix`]: the constant-loudness dry/wet crossfade
//! - [`SquareWavetable`]: phase-accumulator square oscillator (bit crusher gate)
//! - [`InterpolatedDelay`]: circular delay line with fractional-sample reads
//! - [`StateVariableFilter`]: TPT state-variable filter (LP/BP/HP)
//! - [`ParamDescriptor`]: parameter metadata for presets and control surfaces
//! - conversion and guard helpers in [`math`] and [`fast_math`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bajo-core = { version = "0.1", default-features = false }
//! ```
//!
//! All float math goes through [`libm`], so the DSP behaves identically on
//! hosted and embedded targets. Heap allocation is confined to construction;
//! nothing in a per-sample path allocates.
//!
//! # Real-time discipline
//!
//! Everything here is written for an audio callback: no locks, no I/O, no
//! panics on the processing path. Out-of-range control values are clamped at
//! the setter, never rejected.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay_line;
pub mod drywet;
pub mod effect;
pub mod fast_math;
pub mod math;
pub mod param;
pub mod param_info;
pub mod svf;
pub mod wavetable;

pub use delay_line::{InterpolatedDelay, Interpolation};
pub use drywet::{equal_power_gains, equal_power_mix};
pub use effect::Effect;
pub use fast_math::{fast_tan, fast_tanh};
pub use math::{db_to_linear, flush_denormal, lerp, linear_to_db, ms_to_samples, remap};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamUnit};
pub use svf::{StateVariableFilter, SvfOutputs};
pub use wavetable::SquareWavetable;
