//! LED latch output trait

use crate::led::LedLatch;

/// Pushes the LED states of one latch out to its shift register
///
/// Implementations shift the eight states in array index order and then
/// strobe the storage register once. The write is open-loop: there is no
/// acknowledgement from the device.
pub trait LatchDriver {
    /// Error raised by the underlying output lines
    type Error;

    /// Shift out and commit the current states of `latch`
    fn latch_data(&mut self, latch: &LedLatch) -> Result<(), Self::Error>;
}
