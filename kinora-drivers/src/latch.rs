//! Bit-banged shift-register latch
//!
//! Drives a 74HC595-style serial-in/parallel-out register with three GPIO
//! lines: serial data, shift clock and latch strobe. Bits are shifted on
//! the rising edge of the shift clock and copied to the outputs on the
//! rising edge of the strobe.
//!
//! The write is open-loop; the only errors are those of the pins.

use embedded_hal::digital::OutputPin;
use kinora_core::led::LedLatch;
use kinora_core::traits::LatchDriver;

/// Shift-register latch on three output pins
pub struct ShiftRegisterLatch<P> {
    data: P,
    clock: P,
    strobe: P,
    /// If true, an LED that is on is shifted as a low bit
    invert_data: bool,
}

impl<P: OutputPin> ShiftRegisterLatch<P> {
    /// Take the three lines and park the clock and strobe low
    pub fn new(data: P, clock: P, strobe: P) -> Result<Self, P::Error> {
        let mut latch = Self {
            data,
            clock,
            strobe,
            invert_data: false,
        };
        latch.clock.set_low()?;
        latch.strobe.set_low()?;
        Ok(latch)
    }

    /// Shift inverted data (for sink-driven LEDs)
    pub fn with_inverted_data(mut self, inverted: bool) -> Self {
        self.invert_data = inverted;
        self
    }

    /// Shift `bits` out in order, then strobe once
    pub fn shift_out(&mut self, bits: &[bool]) -> Result<(), P::Error> {
        for &bit in bits {
            if bit != self.invert_data {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.clock.set_high()?;
            self.clock.set_low()?;
        }

        self.strobe.set_high()?;
        self.strobe.set_low()
    }

    /// Release the pins
    pub fn release(self) -> (P, P, P) {
        (self.data, self.clock, self.strobe)
    }
}

impl<P: OutputPin> LatchDriver for ShiftRegisterLatch<P> {
    type Error = P::Error;

    fn latch_data(&mut self, latch: &LedLatch) -> Result<(), Self::Error> {
        self.shift_out(latch.states())
    }
}
