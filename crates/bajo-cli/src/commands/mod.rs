//! CLI command implementations.

pub mod common;
pub mod generate;
pub mod presets;
pub mod process;
pub mod stages;
