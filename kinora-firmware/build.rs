//! Build script for kinora-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest GPIO number on the RP2040
const MAX_GPIO: i64 = 29;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a display.toml configuration file.          ║\n\
            ║  Please create one in the kinora-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_root(&config, &mut errors);
    validate_timing(&config, &mut errors);
    let mut pins = Vec::new();
    validate_latches(&config, &mut pins, &mut errors);
    validate_sensor(&config, &mut pins, &mut errors);
    validate_serial(&config, &mut pins, &mut errors);
    validate_pin_conflicts(&pins, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate top-level keys
fn validate_root(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("version") {
        Some(toml::Value::Integer(1)) => {}
        Some(_) => errors.push("version must be 1".to_string()),
        None => errors.push("missing 'version'".to_string()),
    }

    if let Some(picture) = config.get("default_picture") {
        match picture.as_str() {
            Some("A" | "B" | "C") => {}
            _ => errors.push("default_picture must be \"A\", \"B\" or \"C\"".to_string()),
        }
    }
}

/// Validate the [timing] section
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = match config.get("timing") {
        Some(toml::Value::Table(t)) => t,
        _ => {
            errors.push("missing [timing] section".to_string());
            return;
        }
    };

    let get = |key: &str| timing.get(key).and_then(|v| v.as_integer());

    for key in ["engine_tick_hz", "step_tick_hz"] {
        match get(key) {
            Some(hz) if hz > 0 && hz <= u32::MAX as i64 => {}
            Some(_) => errors.push(format!("[timing] {} must be 1-{}", key, u32::MAX)),
            None => errors.push(format!("[timing] missing '{}'", key)),
        }
    }

    let min = get("min_rotation_ticks");
    let max = get("max_rotation_ticks");
    let initial = get("initial_rotation_ticks");

    match (min, max) {
        (Some(min), Some(max)) => {
            if min <= 0 || min > max || max > u32::MAX as i64 {
                errors.push("[timing] need 0 < min_rotation_ticks <= max_rotation_ticks".to_string());
            }
            if let Some(initial) = initial {
                if initial < min || initial > max {
                    errors.push("[timing] initial_rotation_ticks outside min..max".to_string());
                }
            }
        }
        _ => errors.push("[timing] missing rotation window".to_string()),
    }
}

/// Validate [latch.upper] and [latch.lower]
fn validate_latches(config: &toml::Value, pins: &mut Vec<(String, i64)>, errors: &mut Vec<String>) {
    for bank in ["upper", "lower"] {
        let latch = match config.get("latch").and_then(|l| l.get(bank)) {
            Some(toml::Value::Table(t)) => t,
            _ => {
                errors.push(format!("missing [latch.{}] section", bank));
                continue;
            }
        };

        for key in ["data_pin", "clock_pin", "strobe_pin"] {
            let name = format!("latch.{}.{}", bank, key);
            check_pin(latch.get(key), &name, pins, errors);
        }

        // bit_order is optional (defaults to MSB first)
        if let Some(order) = latch.get("bit_order").and_then(|v| v.as_array()) {
            let mut seen = [false; 8];
            let valid = order.len() == 8
                && order.iter().all(|bit| match bit.as_integer() {
                    Some(b @ 0..=7) if !seen[b as usize] => {
                        seen[b as usize] = true;
                        true
                    }
                    _ => false,
                });
            if !valid {
                errors.push(format!(
                    "[latch.{}] bit_order must be a permutation of 0-7",
                    bank
                ));
            }
        }
    }
}

/// Validate the [sensor] section
fn validate_sensor(config: &toml::Value, pins: &mut Vec<(String, i64)>, errors: &mut Vec<String>) {
    match config.get("sensor") {
        Some(toml::Value::Table(sensor)) => {
            check_pin(sensor.get("pin"), "sensor.pin", pins, errors);
        }
        _ => errors.push("missing [sensor] section".to_string()),
    }
}

/// Validate the [serial] section
fn validate_serial(config: &toml::Value, pins: &mut Vec<(String, i64)>, errors: &mut Vec<String>) {
    let serial = match config.get("serial") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    for key in ["tx_pin", "rx_pin"] {
        if serial.contains_key(key) {
            check_pin(serial.get(key), &format!("serial.{}", key), pins, errors);
        }
    }

    if let Some(baud) = serial.get("baud_rate") {
        match baud.as_integer() {
            Some(1200..=921_600) => {}
            _ => errors.push("[serial] baud_rate must be 1200-921600".to_string()),
        }
    }
}

/// Check a pin string like "gpio2", "!gpio15" or "^!gpio15"
fn check_pin(
    value: Option<&toml::Value>,
    name: &str,
    pins: &mut Vec<(String, i64)>,
    errors: &mut Vec<String>,
) {
    let value = match value.and_then(|v| v.as_str()) {
        Some(v) => v,
        None => {
            errors.push(format!("{} missing or not a string", name));
            return;
        }
    };

    let number = value
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")
        .and_then(|n| n.parse::<i64>().ok());

    match number {
        Some(n) if (0..=MAX_GPIO).contains(&n) => pins.push((name.to_string(), n)),
        _ => errors.push(format!("{} = '{}' is not gpio0-gpio{}", name, value, MAX_GPIO)),
    }
}

/// Check that no GPIO is used twice
fn validate_pin_conflicts(pins: &[(String, i64)], errors: &mut Vec<String>) {
    for (i, (name, pin)) in pins.iter().enumerate() {
        if let Some((other, _)) = pins[i + 1..].iter().find(|(_, p)| p == pin) {
            errors.push(format!("gpio{} used by both {} and {}", pin, name, other));
        }
    }
}
