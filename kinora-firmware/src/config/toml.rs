//! Simple TOML parser for the display configuration
//!
//! This is a minimal TOML parser that handles only the subset used by
//! display.toml. It does NOT support full TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - Single-line integer arrays: bit_order = [7, 6, 5, 4, 3, 2, 1, 0]
//! - [section] and [section.subsection] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys outside section headers

use heapless::Vec;

use kinora_core::config::{ConfigError, DisplayConfig, LatchConfig, PinConfig, LEDS_PER_BANK};
use kinora_core::led::Bank;
use kinora_core::picture::PictureId;
use kinora_protocol::Command;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Bit order is not eight integers
    InvalidBitOrder,
    /// Picture letter with no built-in picture
    UnknownPicture,
    /// Parsed but inconsistent
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Latch(Bank),
    Sensor,
    Serial,
}

/// Pin string with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PinEntry {
    config: PinConfig,
    pull_up: bool,
}

/// Parse TOML configuration into a validated DisplayConfig
///
/// Keys left out keep their defaults.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "timing" or "latch.upper"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "latch.upper" => Ok(Section::Latch(Bank::Upper)),
        "latch.lower" => Ok(Section::Latch(Bank::Lower)),
        "sensor" => Ok(Section::Sensor),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split a line into key and value, dropping inline comments
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio2", "!gpio15" or "^!gpio15"
fn parse_pin(value: &str) -> Result<PinEntry, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin: u8 = s
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse()
        .map_err(|_| ParseError::InvalidPin)?;
    if pin > 29 {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinEntry {
        config: PinConfig { pin, inverted },
        pull_up,
    })
}

/// Parse a bit order array like "[7, 6, 5, 4, 3, 2, 1, 0]"
fn parse_bit_order(value: &str) -> Result<[u8; LEDS_PER_BANK], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidBitOrder)?;

    let mut bits: Vec<u8, LEDS_PER_BANK> = Vec::new();
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let bit = item.parse().map_err(|_| ParseError::InvalidBitOrder)?;
        bits.push(bit).map_err(|_| ParseError::InvalidBitOrder)?;
    }

    bits.as_slice()
        .try_into()
        .map_err(|_| ParseError::InvalidBitOrder)
}

/// Parse a picture letter like "A"
fn parse_picture(value: &str) -> Result<PictureId, ParseError> {
    match parse_string(value).as_bytes() {
        [byte] => match Command::from_byte(*byte) {
            Some(Command::SelectPicture(index)) => {
                PictureId::from_index(index).ok_or(ParseError::UnknownPicture)
            }
            _ => Err(ParseError::UnknownPicture),
        },
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a key/value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => config.version = parse_int(value)?,
            "default_picture" => config.default_picture = parse_picture(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "engine_tick_hz" => t.engine_tick_hz = parse_int(value)?,
                "step_tick_hz" => t.step_tick_hz = parse_int(value)?,
                "min_rotation_ticks" => t.min_rotation_ticks = parse_int(value)?,
                "max_rotation_ticks" => t.max_rotation_ticks = parse_int(value)?,
                "initial_rotation_ticks" => t.initial_rotation_ticks = parse_int(value)?,
                _ => {}
            }
        }
        Section::Latch(bank) => {
            let latch: &mut LatchConfig = match bank {
                Bank::Upper => &mut config.upper,
                Bank::Lower => &mut config.lower,
            };
            match key {
                "data_pin" => latch.data_pin = parse_pin(value)?.config,
                "clock_pin" => latch.clock_pin = parse_pin(value)?.config,
                "strobe_pin" => latch.strobe_pin = parse_pin(value)?.config,
                "bit_order" => latch.bit_order = parse_bit_order(value)?,
                _ => {}
            }
        }
        Section::Sensor => {
            if key == "pin" {
                let entry = parse_pin(value)?;
                config.sensor.pin = entry.config;
                config.sensor.pull_up = entry.pull_up;
            }
        }
        Section::Serial => match key {
            "tx_pin" => config.serial.tx_pin = parse_pin(value)?.config.pin,
            "rx_pin" => config.serial.rx_pin = parse_pin(value)?.config.pin,
            "baud" | "baud_rate" => config.serial.baud_rate = parse_int(value)?,
            _ => {}
        },
    }

    Ok(())
}
