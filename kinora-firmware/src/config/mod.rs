//! Configuration loading and parsing
//!
//! The display configuration is compiled in from display.toml and parsed
//! at boot by a custom no_std parser.

pub mod toml;

use defmt::*;

use kinora_core::config::DisplayConfig;

pub use toml::{parse_config, ParseError};

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../display.toml");

/// Parse the embedded configuration
///
/// Falls back to the built-in defaults if display.toml does not parse,
/// which build.rs should already have caught.
pub fn load_config() -> DisplayConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            DisplayConfig::default()
        }
    }
}
