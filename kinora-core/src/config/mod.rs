//! Configuration types
//!
//! Board-agnostic configuration structures, filled in by the firmware
//! from its embedded TOML file.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
