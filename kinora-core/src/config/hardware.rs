//! Hardware configuration types
//!
//! These types define the pin-level wiring of the two LED latches, the
//! rotation sensor and the serial command receiver.

use crate::led::Bank;

/// Number of LEDs driven by one latch
pub const LEDS_PER_BANK: usize = 8;

/// MSB-first shift order (74HC595 style: first bit shifted ends on Q7)
pub const MSB_FIRST: [u8; LEDS_PER_BANK] = [7, 6, 5, 4, 3, 2, 1, 0];

/// LSB-first shift order
pub const LSB_FIRST: [u8; LEDS_PER_BANK] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Shift-register latch wiring for one LED bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchConfig {
    /// Serial data line
    pub data_pin: PinConfig,
    /// Shift clock line
    pub clock_pin: PinConfig,
    /// Latch strobe line (storage register clock)
    pub strobe_pin: PinConfig,
    /// Bitmap bit carried by each shift position, position 0 shifted first.
    ///
    /// Fixed by the board wiring; must be a permutation of 0..8.
    pub bit_order: [u8; LEDS_PER_BANK],
}

impl LatchConfig {
    /// Create a latch config with MSB-first bit order
    pub const fn new(data: u8, clock: u8, strobe: u8) -> Self {
        Self {
            data_pin: PinConfig::new(data),
            clock_pin: PinConfig::new(clock),
            strobe_pin: PinConfig::new(strobe),
            bit_order: MSB_FIRST,
        }
    }

    /// Pins used by this latch
    pub const fn pins(&self) -> [u8; 3] {
        [self.data_pin.pin, self.clock_pin.pin, self.strobe_pin.pin]
    }

    /// Check that `bit_order` names every bit exactly once
    pub fn has_valid_bit_order(&self) -> bool {
        let mut seen = 0u8;
        for &bit in &self.bit_order {
            if bit as usize >= LEDS_PER_BANK {
                return false;
            }
            seen |= 1 << bit;
        }
        seen == 0xFF
    }

    /// Default wiring for a bank
    pub const fn default_for(bank: Bank) -> Self {
        match bank {
            Bank::Upper => Self::new(2, 3, 4),
            Bank::Lower => Self::new(5, 6, 7),
        }
    }
}

/// Serial (Bluetooth module) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// UART TX pin
    pub tx_pin: u8,
    /// UART RX pin
    pub rx_pin: u8,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        // HC-05/HC-06 modules ship at 9600 baud
        Self {
            tx_pin: 0,
            rx_pin: 1,
            baud_rate: 9600,
        }
    }
}

/// Rotation sensor input
///
/// An inverted pin marks the rotation on the falling edge (open-collector
/// phototransistor pulled up), otherwise on the rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Sensor input pin
    pub pin: PinConfig,
    /// Enable the internal pull-up
    pub pull_up: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::inverted(15),
            pull_up: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(10);
        assert_eq!(pin.pin, 10);
        assert!(!pin.inverted);

        let inverted = PinConfig::inverted(12);
        assert!(inverted.inverted);
    }

    #[test]
    fn test_bit_order_validation() {
        let mut latch = LatchConfig::new(2, 3, 4);
        assert!(latch.has_valid_bit_order());

        latch.bit_order = LSB_FIRST;
        assert!(latch.has_valid_bit_order());

        // Duplicate bit
        latch.bit_order = [0, 0, 2, 3, 4, 5, 6, 7];
        assert!(!latch.has_valid_bit_order());

        // Out of range
        latch.bit_order = [8, 1, 2, 3, 4, 5, 6, 7];
        assert!(!latch.has_valid_bit_order());
    }

    #[test]
    fn test_default_banks_do_not_share_pins() {
        let upper = LatchConfig::default_for(Bank::Upper).pins();
        let lower = LatchConfig::default_for(Bank::Lower).pins();
        for pin in upper {
            assert!(!lower.contains(&pin));
        }
    }
}
