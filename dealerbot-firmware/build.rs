//! Build script for dealerbot-firmware
//!
//! - Copies memory.x next to the linker
//! - Rejects a machine.toml the firmware would not accept at boot

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

fn main() {
    setup_linker();
    validate_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(include_bytes!("memory.x")).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Expected value of a key
#[derive(Clone, Copy)]
enum Kind {
    /// Integer within the inclusive range
    Int(i64, i64),
    /// Float or integer literal within `[0, 360)`
    Angle,
    Bool,
    /// One of the listed strings
    Choice(&'static [&'static str]),
}

const U8: Kind = Kind::Int(0, u8::MAX as i64);
const U16: Kind = Kind::Int(0, u16::MAX as i64);
const U32: Kind = Kind::Int(0, u32::MAX as i64);

const DRIVE_MODES: &[&str] = &["wave", "WaveDrive", "full", "FullStep"];
const DIRECTIONS: &[&str] = &[
    "cw",
    "clockwise",
    "Clockwise",
    "ccw",
    "counterclockwise",
    "CounterClockwise",
];

const SENSOR_KEYS: &[(&str, Kind)] = &[("inverted", Kind::Bool), ("pull_up", Kind::Bool)];

/// Every section and key the firmware's parser knows, with the value
/// ranges `MachineConfig::validate` accepts
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "stepper",
        &[
            ("steps_per_rev", Kind::Int(1, u16::MAX as i64)),
            ("rpm", Kind::Int(1, u16::MAX as i64)),
            ("homing_rpm", Kind::Int(1, u16::MAX as i64)),
            ("drive_mode", Kind::Choice(DRIVE_MODES)),
            ("homing_direction", Kind::Choice(DIRECTIONS)),
            ("max_homing_steps", Kind::Int(1, u32::MAX as i64)),
        ],
    ),
    (
        "flipper",
        &[
            ("pulse_ms", U32),
            ("settle_ms", U32),
            ("inverted", Kind::Bool),
        ],
    ),
    ("hall_sensor", SENSOR_KEYS),
    ("light_sensor", SENSOR_KEYS),
    (
        "button",
        &[
            ("inverted", Kind::Bool),
            ("pull_up", Kind::Bool),
            ("debounce_ms", U32),
            ("long_press_ms", U32),
            ("poll_ms", U32),
        ],
    ),
    (
        "potentiometer",
        &[("adc_max", Kind::Int(1, u16::MAX as i64)), ("hysteresis", U16)],
    ),
    (
        "display",
        &[("i2c_address", Kind::Int(0x08, 0x77)), ("brightness", Kind::Int(0, 15))],
    ),
    (
        "war",
        &[
            ("cards", U16),
            ("first_pile_deg", Kind::Angle),
            ("pile_spacing_deg", Kind::Angle),
        ],
    ),
    (
        "poker",
        &[
            ("min_players", Kind::Int(2, 9)),
            ("max_players", Kind::Int(2, 9)),
            ("hole_cards", Kind::Int(1, u8::MAX as i64)),
            ("flop_cards", Kind::Int(1, u8::MAX as i64)),
            ("flop_spacing_deg", Kind::Angle),
            ("turn_deg", Kind::Angle),
            ("river_deg", Kind::Angle),
        ],
    ),
    ("safety", &[("max_missed_deals", U8)]),
];

fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");

    let content = fs::read_to_string("machine.toml")
        .unwrap_or_else(|e| panic!("\nmachine.toml: cannot read: {}\n", e));
    let config: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("\nmachine.toml: invalid TOML:\n{}\n", e));

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_relations(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\nmachine.toml is not a valid DealerBot configuration:\n{}\n",
            errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Reject unknown sections and keys, and values of the wrong type or range
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, section) in root {
        let Some(table) = section.as_table() else {
            errors.push(format!("'{}' must be inside a section", name));
            continue;
        };
        let Some((_, keys)) = SCHEMA.iter().find(|(s, _)| *s == name.as_str()) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        for (key, value) in table {
            match keys.iter().find(|(k, _)| *k == key.as_str()) {
                Some((_, kind)) => {
                    if let Err(msg) = check_value(*kind, value) {
                        errors.push(format!("[{}] {} {}", name, key, msg));
                    }
                }
                None => errors.push(format!("[{}] unknown key '{}'", name, key)),
            }
        }
    }
}

fn check_value(kind: Kind, value: &toml::Value) -> Result<(), String> {
    match kind {
        Kind::Int(min, max) => match value.as_integer() {
            Some(v) if (min..=max).contains(&v) => Ok(()),
            Some(_) => Err(format!("must be {}-{}", min, max)),
            None => Err("must be an integer".to_string()),
        },
        Kind::Angle => {
            let deg = value
                .as_float()
                .or_else(|| value.as_integer().map(|i| i as f64))
                .ok_or("must be a number")?;
            if (0.0..360.0).contains(&deg) {
                Ok(())
            } else {
                Err("must be in [0, 360)".to_string())
            }
        }
        Kind::Bool => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| "must be true or false".to_string()),
        Kind::Choice(options) => match value.as_str() {
            Some(s) if options.contains(&s) => Ok(()),
            _ => Err(format!("must be one of {}", options.join(", "))),
        },
    }
}

fn int_field(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Checks spanning several keys
fn validate_relations(config: &toml::Value, errors: &mut Vec<String>) {
    let min = int_field(config, "poker", "min_players").unwrap_or(2);
    let max = int_field(config, "poker", "max_players").unwrap_or(5);
    if max < min {
        errors.push("[poker] max_players must not be below min_players".to_string());
    }

    if let Some(cards) = int_field(config, "war", "cards") {
        if cards % 2 != 0 {
            errors.push("[war] cards must be even".to_string());
        }
    }
}
