//! Hardware abstraction traits
//!
//! These traits define the interface between the rendering core
//! and hardware-specific implementations.

pub mod latch;
pub mod timer;

pub use latch::LatchDriver;
pub use timer::{RotationClock, StepTimer};
