//! Frame renderer
//!
//! Paints one bitmap column per angular-step tick: the row at the picture
//! cursor is split into its two bank bytes, loaded into the latches and
//! shifted out, upper bank first. The cursor then moves on.

use crate::config::DisplayConfig;
use crate::led::{Bank, LedLatch};
use crate::picture::Picture;
use crate::traits::LatchDriver;

/// Both LED latches and the drivers that push them out
#[derive(Debug)]
pub struct FrameRenderer<L> {
    upper: LedLatch,
    lower: LedLatch,
    upper_driver: L,
    lower_driver: L,
}

impl<L: LatchDriver> FrameRenderer<L> {
    /// Create a renderer; the latches must serve the upper and lower bank
    /// respectively
    pub fn new(upper: LedLatch, lower: LedLatch, upper_driver: L, lower_driver: L) -> Self {
        debug_assert_eq!(upper.bank(), Bank::Upper);
        debug_assert_eq!(lower.bank(), Bank::Lower);
        Self {
            upper,
            lower,
            upper_driver,
            lower_driver,
        }
    }

    /// Create a renderer with the latch wiring from `config`
    pub fn from_config(config: &DisplayConfig, upper_driver: L, lower_driver: L) -> Self {
        Self::new(
            LedLatch::from_config(Bank::Upper, &config.upper),
            LedLatch::from_config(Bank::Lower, &config.lower),
            upper_driver,
            lower_driver,
        )
    }

    /// Latch for a bank
    pub fn latch(&self, bank: Bank) -> &LedLatch {
        match bank {
            Bank::Upper => &self.upper,
            Bank::Lower => &self.lower,
        }
    }

    /// Driver for a bank
    pub fn driver(&self, bank: Bank) -> &L {
        match bank {
            Bank::Upper => &self.upper_driver,
            Bank::Lower => &self.lower_driver,
        }
    }

    /// Show the current column of `picture` and advance its cursor
    ///
    /// Returns the step that was painted. If a latch write fails the
    /// cursor stays put, so the same column is retried on the next tick.
    pub fn update_leds(&mut self, picture: &mut Picture) -> Result<u16, L::Error> {
        let step = picture.step();
        let row = picture.current_row();

        self.upper.load(Bank::Upper.byte(row));
        self.lower.load(Bank::Lower.byte(row));
        self.flush()?;

        picture.advance();
        Ok(step)
    }

    /// Switch every LED off
    pub fn blank(&mut self) -> Result<(), L::Error> {
        self.upper.clear();
        self.lower.clear();
        self.flush()
    }

    fn flush(&mut self) -> Result<(), L::Error> {
        self.upper_driver.latch_data(&self.upper)?;
        self.lower_driver.latch_data(&self.lower)
    }
}
