//! Card flipper motor trait
//!
//! The flipper is a small DC motor with a rubber wheel that pushes the top
//! card off the deck. It is pulsed for a fixed time per card and gated by
//! the light sensor that sees whether a card is sitting under the wheel.

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Motor output could not be driven
    Pin,
    /// Card sensor could not be read
    Sensor,
}

/// Result of a single deal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DealOutcome {
    /// A card was in position and the motor was pulsed
    Dealt,
    /// No card was in position, the motor was left off
    Skipped,
}

/// Trait for the card flipper
#[allow(async_fn_in_trait)]
pub trait CardFlipper {
    /// Deal one card if one is in position
    async fn deal(&mut self) -> Result<DealOutcome, MotorError>;

    /// Force the motor off
    fn stop(&mut self) -> Result<(), MotorError>;
}
