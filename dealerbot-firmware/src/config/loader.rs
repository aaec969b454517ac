//! Configuration loading
//!
//! Parses the embedded `machine.toml` and falls back to built-in defaults
//! if it does not parse or does not validate. A broken config never stops
//! the machine from booting.

use defmt::*;

use dealerbot_core::config::{parse_config, MachineConfig};

/// Embedded default configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../machine.toml");

/// Load the machine configuration
pub fn load_config() -> MachineConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // build.rs rejects the same keys and value types
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            return MachineConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Config: {} steps/rev at {} rpm, {:?}",
                config.stepper.steps_per_rev, config.stepper.rpm, config.stepper.drive_mode
            );
            config
        }
        Err(e) => {
            error!("Invalid configuration: {:?}", e);
            error!("Using built-in defaults");
            MachineConfig::default()
        }
    }
}
