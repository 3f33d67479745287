//! Board-agnostic core logic for the rotating LED display
//!
//! This crate contains all display logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (rotation clock, step timer, latch)
//! - Rotation synchronization (step grid from the rotation period)
//! - Frame rendering and picture selection
//! - Event mailboxes and the dispatch pass
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod events;
pub mod led;
pub mod picture;
pub mod render;
pub mod sync;
pub mod traits;
