//! Configuration type definitions
//!
//! These types represent the machine configuration. The firmware fills
//! them from `machine.toml`; every field has a default matching the stock
//! DealerBot build (28BYJ-48 stepper, HT16K33 backpack at 0x70).

use crate::motion::DriveMode;
use crate::traits::Direction;

/// Stepper configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    /// Full steps per output shaft revolution
    pub steps_per_rev: u16,
    /// Speed for dealing moves
    pub rpm: u16,
    /// Speed while searching for the home sensor
    pub homing_rpm: u16,
    /// Coil excitation scheme
    pub drive_mode: DriveMode,
    /// Direction to search for the home sensor
    pub homing_direction: Direction,
    /// Give up homing after this many steps
    pub max_homing_steps: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            steps_per_rev: 2048,
            rpm: 15,
            homing_rpm: 15,
            drive_mode: DriveMode::FullStep,
            homing_direction: Direction::Clockwise,
            max_homing_steps: 2 * 2048,
        }
    }
}

/// Card flipper configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlipperConfig {
    /// How long the motor runs per card
    pub pulse_ms: u32,
    /// Pause after each card before the head moves again
    pub settle_ms: u32,
    /// Motor output is active-low
    pub inverted: bool,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            pulse_ms: 1000,
            settle_ms: 0,
            inverted: false,
        }
    }
}

/// Proximity sensor input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Input reads low when the object is in position
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

/// Push button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Button pulls the input low when pressed
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
    /// Level must be stable this long to count
    pub debounce_ms: u32,
    /// Hold time for a long press
    pub long_press_ms: u32,
    /// Input sampling period
    pub poll_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            inverted: true,
            pull_up: true,
            debounce_ms: 30,
            long_press_ms: 1500,
            poll_ms: 10,
        }
    }
}

/// Potentiometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PotConfig {
    /// Largest raw reading (4095 for a 12-bit ADC)
    pub adc_max: u16,
    /// Minimum change before a new reading is reported
    pub hysteresis: u16,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            adc_max: 4095,
            hysteresis: 32,
        }
    }
}

/// Segment display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the HT16K33
    pub i2c_address: u8,
    /// Brightness (0-15)
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x70,
            brightness: 15,
        }
    }
}

/// War dealing layout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarConfig {
    /// Cards in the deck, split evenly between two piles
    pub cards: u16,
    /// Angle from home to the first pile
    pub first_pile_deg: f32,
    /// Angle from the first pile to the second
    pub pile_spacing_deg: f32,
}

impl Default for WarConfig {
    fn default() -> Self {
        Self {
            cards: 52,
            first_pile_deg: 60.0,
            pile_spacing_deg: 60.0,
        }
    }
}

/// Poker dealing layout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PokerConfig {
    /// Fewest players selectable
    pub min_players: u8,
    /// Most players selectable
    pub max_players: u8,
    /// Cards dealt to each player in the hole-card round
    pub hole_cards: u8,
    /// Community cards in the flop
    pub flop_cards: u8,
    /// Angle between flop cards
    pub flop_spacing_deg: f32,
    /// Angle from home to the turn card
    pub turn_deg: f32,
    /// Angle from home to the river card
    pub river_deg: f32,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 5,
            hole_cards: 1,
            flop_cards: 3,
            flop_spacing_deg: 30.0,
            turn_deg: 120.0,
            river_deg: 150.0,
        }
    }
}

impl PokerConfig {
    /// Number of selectable player counts
    pub fn player_choices(&self) -> u8 {
        self.max_players.saturating_sub(self.min_players) + 1
    }
}

/// Safety limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyConfig {
    /// Consecutive empty deals before reporting the deck empty (0 = never)
    pub max_missed_deals: u8,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self { max_missed_deals: 3 }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    pub stepper: StepperConfig,
    pub flipper: FlipperConfig,
    pub hall_sensor: SensorConfig,
    pub light_sensor: SensorConfig,
    pub button: ButtonConfig,
    pub potentiometer: PotConfig,
    pub display: DisplayConfig,
    pub war: WarConfig,
    pub poker: PokerConfig,
    pub safety: SafetyConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Steps per revolution is zero
    ZeroStepsPerRev,
    /// A speed is zero
    ZeroSpeed,
    /// Player range is empty, below two or above nine
    InvalidPlayerRange,
    /// A poker round would deal no cards
    ZeroRoundCards,
    /// War deck cannot be split into two equal piles
    OddWarDeck,
    /// Brightness above 15
    InvalidBrightness,
    /// ADC range is zero
    InvalidAdcRange,
    /// Homing travel limit is zero
    ZeroHomingTravel,
    /// I2C address outside the 7-bit range 0x08..=0x77
    InvalidI2cAddress,
    /// Layout angle not within [0, 360)
    InvalidAngle,
}

/// Most players the single-digit player menu can show
pub const MAX_PLAYERS: u8 = 9;

fn angle_ok(degrees: f32) -> bool {
    (0.0..360.0).contains(&degrees)
}

impl MachineConfig {
    /// Check the configuration for values the machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stepper.steps_per_rev == 0 {
            return Err(ConfigError::ZeroStepsPerRev);
        }
        if self.stepper.rpm == 0 || self.stepper.homing_rpm == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.stepper.max_homing_steps == 0 {
            return Err(ConfigError::ZeroHomingTravel);
        }
        let poker = &self.poker;
        if poker.min_players < 2
            || poker.max_players < poker.min_players
            || poker.max_players > MAX_PLAYERS
        {
            return Err(ConfigError::InvalidPlayerRange);
        }
        if poker.hole_cards == 0 || poker.flop_cards == 0 {
            return Err(ConfigError::ZeroRoundCards);
        }
        let angles = [
            self.war.first_pile_deg,
            self.war.pile_spacing_deg,
            poker.flop_spacing_deg,
            poker.turn_deg,
            poker.river_deg,
        ];
        if !angles.into_iter().all(angle_ok) {
            return Err(ConfigError::InvalidAngle);
        }
        if self.war.cards % 2 != 0 {
            return Err(ConfigError::OddWarDeck);
        }
        if self.display.brightness > 15 {
            return Err(ConfigError::InvalidBrightness);
        }
        if self.potentiometer.adc_max == 0 {
            return Err(ConfigError::InvalidAdcRange);
        }
        if !(0x08..=0x77).contains(&self.display.i2c_address) {
            return Err(ConfigError::InvalidI2cAddress);
        }
        Ok(())
    }
}
