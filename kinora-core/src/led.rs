//! LED banks and latch state
//!
//! The arm carries two banks of eight LEDs, each behind its own
//! shift-register latch. A [`LedLatch`] holds the wiring of one bank (which
//! bitmap bit feeds each shift position) and the on/off state last loaded
//! into it.

use crate::config::{LatchConfig, LEDS_PER_BANK};
use crate::picture::BankRow;

/// LED bank on the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Outer bank (towards the tip of the arm)
    Upper,
    /// Inner bank (towards the hub)
    Lower,
}

impl Bank {
    /// Both banks, in the order they are latched
    pub const ALL: [Bank; 2] = [Bank::Upper, Bank::Lower];

    /// Index of this bank's byte within a bitmap row
    pub const fn row_index(self) -> usize {
        match self {
            Bank::Upper => 0,
            Bank::Lower => 1,
        }
    }

    /// Extract this bank's byte from a bitmap row
    pub const fn byte(self, row: BankRow) -> u8 {
        row[self.row_index()]
    }
}

/// One physical LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Led {
    /// Bank the LED belongs to
    pub bank: Bank,
    /// Bit of the bank byte that drives this LED (0-7)
    pub pin: u8,
}

/// LED latch: eight LEDs in shift order plus their current states
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLatch {
    bank: Bank,
    leds: [Led; LEDS_PER_BANK],
    states: [bool; LEDS_PER_BANK],
}

impl LedLatch {
    /// Create a latch; `bit_order[i]` is the bank bit shifted at position `i`
    pub fn new(bank: Bank, bit_order: [u8; LEDS_PER_BANK]) -> Self {
        let leds = bit_order.map(|pin| Led { bank, pin: pin & 0x07 });
        Self {
            bank,
            leds,
            states: [false; LEDS_PER_BANK],
        }
    }

    /// Create a latch from its wiring configuration
    pub fn from_config(bank: Bank, config: &LatchConfig) -> Self {
        Self::new(bank, config.bit_order)
    }

    /// Bank served by this latch
    pub fn bank(&self) -> Bank {
        self.bank
    }

    /// LEDs in shift order
    pub fn leds(&self) -> &[Led; LEDS_PER_BANK] {
        &self.leds
    }

    /// LED states in shift order
    pub fn states(&self) -> &[bool; LEDS_PER_BANK] {
        &self.states
    }

    /// Load a bank byte into the LED states
    pub fn load(&mut self, byte: u8) {
        for (state, led) in self.states.iter_mut().zip(self.leds.iter()) {
            *state = byte & (1 << led.pin) != 0;
        }
    }

    /// Switch every LED off
    pub fn clear(&mut self) {
        self.states = [false; LEDS_PER_BANK];
    }

    /// Bank byte represented by the current states
    pub fn byte(&self) -> u8 {
        self.states
            .iter()
            .zip(self.leds.iter())
            .filter(|(on, _)| **on)
            .fold(0, |acc, (_, led)| acc | (1 << led.pin))
    }
}
