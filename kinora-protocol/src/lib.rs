//! Serial command protocol
//!
//! The display is controlled over a byte-oriented serial link, usually a
//! Bluetooth SPP module. Every command is a single ASCII byte:
//!
//! ```text
//! 'A' -> picture 0 (half wheel)
//! 'B' -> picture 1 (clock face)
//! 'C' -> picture 2 (starburst)
//! ```
//!
//! Further letters decode to higher picture indices, which the display
//! ignores unless it has that many pictures. Line endings and spaces sent
//! by terminal apps are skipped.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;

pub use command::{decode, Command, FIRST_PICTURE_BYTE, LAST_PICTURE_BYTE};
