//! User input conditioning
//!
//! Turns raw button levels and knob readings into [`InputEvent`]s.
//!
//! [`InputEvent`]: dealerbot_core::input::InputEvent

pub mod button;
pub mod potentiometer;

pub use button::{ButtonDebouncer, ButtonEvent};
pub use potentiometer::{AdcReader, Potentiometer};
