//! # bajo-effects
//!
//! The bass effects chain: nine stages in a fixed order, built on the
//! primitives in `bajo-core`.
//!
//! ```text
//! input gain -> waveshaper -> foldback -> bit crusher -> formant filter
//!     -> delay -> mode filter -> haas widener -> output gain
//! ```
//!
//! Each stage is an independent [`Effect`](bajo_core::Effect) and can be used
//! on its own; [`BassChain`] wires them in the order above and applies a full
//! [`EffectParameters`] snapshot at block boundaries. Control values travel
//! from a UI or control thread through the lock-free [`ParamStore`], get
//! snapshotted once per block, and ramp inside the stages, so the audio
//! thread never locks and never hears a parameter jump.
//!
//! ## Example
//!
//! ```rust
//! use bajo_core::Effect;
//! use bajo_effects::{BassChain, EffectParameters};
//!
//! let mut chain = BassChain::new(48000.0);
//! let params = EffectParameters {
//!     waveshaper_amount: 40.0,
//!     waveshaper_mix: 1.0,
//!     ..EffectParameters::default()
//! };
//!
//! let mut left = [0.1_f32; 256];
//! let mut right = [0.1_f32; 256];
//! chain.set_parameters(&params);
//! chain.process_block(&mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bitcrusher;
pub mod chain;
pub mod delay;
pub mod filter;
pub mod foldback;
pub mod formant;
pub mod gain;
pub mod haas;
pub mod params;
pub mod waveshaper;

// Re-export main types at crate root
pub use bitcrusher::Bitcrusher;
pub use chain::BassChain;
pub use delay::Delay;
pub use filter::MultiModeFilter;
pub use foldback::Foldback;
pub use formant::{FormantFilter, vowel_targets};
pub use gain::Gain;
pub use haas::HaasWidener;
pub use params::{DESCRIPTORS, EffectParameters, FilterMode, FilterPoles, ParamStore, index};
pub use waveshaper::Waveshaper;
