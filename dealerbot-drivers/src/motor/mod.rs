//! Motor driver implementations
//!
//! The dealer has one DC motor, the card flipper, switched on and off
//! for a fixed time per card.

pub mod flipper;

pub use flipper::GpioFlipper;
