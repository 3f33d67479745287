//! Display configuration
//!
//! Timing parameters and the top-level configuration structure.

use super::hardware::{LatchConfig, SensorConfig, SerialConfig};
use crate::led::Bank;
use crate::picture::PictureId;

/// Current configuration version
pub const CONFIG_VERSION: u8 = 1;

/// Rotation and step timer parameters
///
/// The rotation sensor is timed on the engine clock; the angular-step
/// timer counts in its own (usually finer) tick domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Engine (rotation measurement) clock rate in Hz
    pub engine_tick_hz: u32,
    /// Angular-step timer clock rate in Hz
    pub step_tick_hz: u32,
    /// Shortest plausible rotation period, in engine ticks
    pub min_rotation_ticks: u32,
    /// Longest plausible rotation period, in engine ticks
    pub max_rotation_ticks: u32,
    /// Rotation period assumed before the first valid measurement
    pub initial_rotation_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        // 10 kHz engine clock, 1 MHz step clock.
        // Plausible range 6000 rpm (10 ms) down to 12 rpm (5 s).
        Self {
            engine_tick_hz: 10_000,
            step_tick_hz: 1_000_000,
            min_rotation_ticks: 100,
            max_rotation_ticks: 50_000,
            initial_rotation_ticks: 1_000,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unsupported configuration version
    VersionMismatch,
    /// A tick rate is zero
    ZeroTickRate,
    /// Minimum rotation period is zero or above the maximum
    InvalidRotationWindow,
    /// Initial rotation period is outside the plausible window
    InitialPeriodOutOfRange,
    /// Latch bit order is not a permutation of 0..8
    InvalidBitOrder(Bank),
    /// The same GPIO is assigned twice
    PinConflict(u8),
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Rotation/step timing
    pub timing: TimingConfig,
    /// Upper bank latch wiring
    pub upper: LatchConfig,
    /// Lower bank latch wiring
    pub lower: LatchConfig,
    /// Rotation sensor
    pub sensor: SensorConfig,
    /// Serial command receiver
    pub serial: SerialConfig,
    /// Picture shown after power-up
    pub default_picture: PictureId,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            timing: TimingConfig::default(),
            upper: LatchConfig::default_for(Bank::Upper),
            lower: LatchConfig::default_for(Bank::Lower),
            sensor: SensorConfig::default(),
            serial: SerialConfig::default(),
            default_picture: PictureId::HalfWheel,
        }
    }
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch wiring for a bank
    pub fn latch(&self, bank: Bank) -> &LatchConfig {
        match bank {
            Bank::Upper => &self.upper,
            Bank::Lower => &self.lower,
        }
    }

    /// Check the configuration for consistency
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }

        let timing = &self.timing;
        if timing.engine_tick_hz == 0 || timing.step_tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if timing.min_rotation_ticks == 0 || timing.min_rotation_ticks > timing.max_rotation_ticks
        {
            return Err(ConfigError::InvalidRotationWindow);
        }
        if timing.initial_rotation_ticks < timing.min_rotation_ticks
            || timing.initial_rotation_ticks > timing.max_rotation_ticks
        {
            return Err(ConfigError::InitialPeriodOutOfRange);
        }

        for bank in [Bank::Upper, Bank::Lower] {
            if !self.latch(bank).has_valid_bit_order() {
                return Err(ConfigError::InvalidBitOrder(bank));
            }
        }

        let upper = self.upper.pins();
        let lower = self.lower.pins();
        let pins = [
            upper[0],
            upper[1],
            upper[2],
            lower[0],
            lower[1],
            lower[2],
            self.sensor.pin.pin,
            self.serial.tx_pin,
            self.serial.rx_pin,
        ];
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(DisplayConfig::new().validate(), Ok(()));
    }

    #[test]
    fn test_version_mismatch() {
        let config = DisplayConfig {
            version: 2,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch));
    }

    #[test]
    fn test_zero_tick_rate() {
        let mut config = DisplayConfig::new();
        config.timing.step_tick_hz = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn test_rotation_window() {
        let mut config = DisplayConfig::new();
        config.timing.min_rotation_ticks = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRotationWindow));

        let mut config = DisplayConfig::new();
        config.timing.min_rotation_ticks = 60_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRotationWindow));

        let mut config = DisplayConfig::new();
        config.timing.initial_rotation_ticks = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialPeriodOutOfRange)
        );
    }

    #[test]
    fn test_bad_bit_order() {
        let mut config = DisplayConfig::new();
        config.lower.bit_order = [0; 8];
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBitOrder(Bank::Lower))
        );
    }

    #[test]
    fn test_pin_conflict() {
        let mut config = DisplayConfig::new();
        config.lower.strobe_pin.pin = config.upper.strobe_pin.pin;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(4)));

        let mut config = DisplayConfig::new();
        config.serial.rx_pin = 6;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(6)));

        let mut config = DisplayConfig::new();
        config.sensor.pin.pin = config.serial.tx_pin;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(0)));
    }
}
