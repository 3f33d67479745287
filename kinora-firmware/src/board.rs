//! Board wiring
//!
//! GPIOs are bound to typed peripherals in `main`, so the pin numbers in
//! display.toml must match the board. Inversion, pull-ups, bit order,
//! baud rate and timing are taken from the configuration.

use defmt::*;

use kinora_core::config::DisplayConfig;
use kinora_core::led::Bank;

/// Upper latch data, clock, strobe
pub const UPPER_LATCH_PINS: [u8; 3] = [2, 3, 4];

/// Lower latch data, clock, strobe
pub const LOWER_LATCH_PINS: [u8; 3] = [5, 6, 7];

/// Rotation sensor input
pub const SENSOR_PIN: u8 = 15;

/// UART0 TX, RX (Bluetooth module)
pub const SERIAL_PINS: [u8; 2] = [0, 1];

/// Compare the configured pins against the board; returns true if they match
pub fn check_wiring(config: &DisplayConfig) -> bool {
    let mut ok = true;

    for (bank, board) in [(Bank::Upper, UPPER_LATCH_PINS), (Bank::Lower, LOWER_LATCH_PINS)] {
        let latch = config.latch(bank);
        if latch.pins() != board {
            warn!("{:?} latch configured on {}, board uses {}", bank, latch.pins(), board);
            ok = false;
        }
        if latch.clock_pin.inverted || latch.strobe_pin.inverted {
            warn!("{:?} latch: clock/strobe inversion not supported, ignored", bank);
        }
    }

    if config.sensor.pin.pin != SENSOR_PIN {
        warn!(
            "Sensor configured on gpio{}, board uses gpio{}",
            config.sensor.pin.pin, SENSOR_PIN
        );
        ok = false;
    }

    if [config.serial.tx_pin, config.serial.rx_pin] != SERIAL_PINS {
        warn!("Serial pins differ from board, using gpio{}", SERIAL_PINS);
        ok = false;
    }

    ok
}
