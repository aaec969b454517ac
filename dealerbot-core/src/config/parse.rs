//! Simple TOML parser for machine configuration
//!
//! This is a minimal TOML parser that handles only the subset used by
//! `machine.toml`. It does NOT support the full TOML language. The
//! firmware's `build.rs` checks the same keys and value types on the host.
//!
//! Supported features:
//! - `[section]` headers (one level, no dotted names)
//! - Key = value pairs (string, integer, float, boolean)
//! - Hex integers (`0x70`)
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Datetime values

use super::types::MachineConfig;
use crate::motion::DriveMode;
use crate::traits::Direction;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key not known in its section
    UnknownKey,
    /// Key = value line before the first section header
    KeyOutsideSection,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Stepper,
    Flipper,
    HallSensor,
    LightSensor,
    Button,
    Potentiometer,
    Display,
    War,
    Poker,
    Safety,
}

/// Parse TOML configuration into MachineConfig
///
/// Keys that are not present keep their defaults.
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let end = line.find(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&line[1..end])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse section header like "stepper" or "hall_sensor"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "stepper" => Ok(Section::Stepper),
        "flipper" => Ok(Section::Flipper),
        "hall_sensor" => Ok(Section::HallSensor),
        "light_sensor" => Ok(Section::LightSensor),
        "button" => Ok(Section::Button),
        "potentiometer" => Ok(Section::Potentiometer),
        "display" => Ok(Section::Display),
        "war" => Ok(Section::War),
        "poker" => Ok(Section::Poker),
        "safety" => Ok(Section::Safety),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
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
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an unsigned integer, decimal or `0x` hex
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a float, integers are accepted too
fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse drive mode
fn parse_drive_mode(value: &str) -> Result<DriveMode, ParseError> {
    match parse_string(value) {
        "wave" | "WaveDrive" => Ok(DriveMode::WaveDrive),
        "full" | "FullStep" => Ok(DriveMode::FullStep),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse rotation direction
fn parse_direction(value: &str) -> Result<Direction, ParseError> {
    match parse_string(value) {
        "cw" | "clockwise" | "Clockwise" => Ok(Direction::Clockwise),
        "ccw" | "counterclockwise" | "CounterClockwise" => Ok(Direction::CounterClockwise),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MachineConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::KeyOutsideSection),
        Section::Stepper => {
            let s = &mut config.stepper;
            match key {
                "steps_per_rev" => s.steps_per_rev = parse_int(value)?,
                "rpm" => s.rpm = parse_int(value)?,
                "homing_rpm" => s.homing_rpm = parse_int(value)?,
                "drive_mode" => s.drive_mode = parse_drive_mode(value)?,
                "homing_direction" => s.homing_direction = parse_direction(value)?,
                "max_homing_steps" => s.max_homing_steps = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Flipper => {
            let f = &mut config.flipper;
            match key {
                "pulse_ms" => f.pulse_ms = parse_int(value)?,
                "settle_ms" => f.settle_ms = parse_int(value)?,
                "inverted" => f.inverted = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::HallSensor | Section::LightSensor => {
            let s = if section == Section::HallSensor {
                &mut config.hall_sensor
            } else {
                &mut config.light_sensor
            };
            match key {
                "inverted" => s.inverted = parse_bool(value)?,
                "pull_up" => s.pull_up = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Button => {
            let b = &mut config.button;
            match key {
                "inverted" => b.inverted = parse_bool(value)?,
                "pull_up" => b.pull_up = parse_bool(value)?,
                "debounce_ms" => b.debounce_ms = parse_int(value)?,
                "long_press_ms" => b.long_press_ms = parse_int(value)?,
                "poll_ms" => b.poll_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Potentiometer => {
            let p = &mut config.potentiometer;
            match key {
                "adc_max" => p.adc_max = parse_int(value)?,
                "hysteresis" => p.hysteresis = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "i2c_address" => d.i2c_address = parse_int(value)?,
                "brightness" => d.brightness = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::War => {
            let w = &mut config.war;
            match key {
                "cards" => w.cards = parse_int(value)?,
                "first_pile_deg" => w.first_pile_deg = parse_float(value)?,
                "pile_spacing_deg" => w.pile_spacing_deg = parse_float(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Poker => {
            let p = &mut config.poker;
            match key {
                "min_players" => p.min_players = parse_int(value)?,
                "max_players" => p.max_players = parse_int(value)?,
                "hole_cards" => p.hole_cards = parse_int(value)?,
                "flop_cards" => p.flop_cards = parse_int(value)?,
                "flop_spacing_deg" => p.flop_spacing_deg = parse_float(value)?,
                "turn_deg" => p.turn_deg = parse_float(value)?,
                "river_deg" => p.river_deg = parse_float(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Safety => match key {
            "max_missed_deals" => config.safety.max_missed_deals = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u16>("2048"), Ok(2048));
        assert_eq!(parse_int::<u8>("0x70"), Ok(0x70));
        assert_eq!(parse_int::<u8>("300"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("rpm = 15"), Some(("rpm", "15")));
        assert_eq!(
            parse_key_value("drive_mode = \"full\"   # or wave"),
            Some(("drive_mode", "\"full\""))
        );
        assert_eq!(parse_key_value("rpm ="), None);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("hall_sensor"), Ok(Section::HallSensor));
        assert_eq!(parse_section_header(" poker "), Ok(Section::Poker));
        assert_eq!(parse_section_header("shuffler"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_config() {
        let input = r#"
            # comment
            [stepper]
            steps_per_rev = 4096
            drive_mode = "wave"
            homing_direction = "ccw"

            [display]
            i2c_address = 0x71  # second backpack

            [poker]
            max_players = 6
            turn_deg = 100
        "#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.stepper.steps_per_rev, 4096);
        assert_eq!(config.stepper.drive_mode, DriveMode::WaveDrive);
        assert_eq!(config.stepper.homing_direction, Direction::CounterClockwise);
        assert_eq!(config.stepper.rpm, 15);
        assert_eq!(config.display.i2c_address, 0x71);
        assert_eq!(config.poker.max_players, 6);
        assert_eq!(config.poker.turn_deg, 100.0);
        assert_eq!(config.war, MachineConfig::default().war);
    }

    #[test]
    fn test_parse_config_errors() {
        assert_eq!(
            parse_config("rpm = 15").unwrap_err(),
            ParseError::KeyOutsideSection
        );
        assert_eq!(
            parse_config("[stepper]\nspeed = 15").unwrap_err(),
            ParseError::UnknownKey
        );
        assert_eq!(
            parse_config("[flipper]\ninverted = yes").unwrap_err(),
            ParseError::InvalidValue
        );
        assert_eq!(
            parse_config("[stepper\nrpm = 15").unwrap_err(),
            ParseError::InvalidSection
        );
    }

    #[test]
    fn test_every_section_rejects_typos() {
        for input in [
            "[flipper]\npulse = 500",
            "[hall_sensor]\npullup = true",
            "[button]\nlong_press = 900",
            "[potentiometer]\nmax = 1023",
            "[war]\ndeck = 52",
            "[safety]\nmissed = 2",
        ] {
            assert_eq!(parse_config(input), Err(ParseError::UnknownKey), "{}", input);
        }
        for input in [
            "[flipper]\npulse_ms = 0.5",
            "[light_sensor]\ninverted = 1",
            "[button]\npoll_ms = \"10\"",
            "[potentiometer]\nadc_max = 70000",
            "[stepper]\ndrive_mode = \"half\"",
            "[safety]\nmax_missed_deals = -1",
        ] {
            assert_eq!(parse_config(input), Err(ParseError::InvalidValue), "{}", input);
        }
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = parse_config(include_str!("../../../dealerbot-firmware/machine.toml")).unwrap();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.hall_sensor.inverted);
    }
}
