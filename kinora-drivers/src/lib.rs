//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kinora-core:
//!
//! - Shift-register latch (74HC595 style) bit-banged over GPIO

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod latch;

pub use latch::ShiftRegisterLatch;
