//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dealerbot-core for the dealer's hardware, written against the
//! `embedded-hal` 1.0 traits:
//!
//! - Stepper driver (4-coil unipolar via ULN2003)
//! - Card flipper (DC motor on a GPIO, gated by the card sensor)
//! - Proximity sensors (hall-effect home, light card sensor)
//! - HT16K33 4-digit 7-segment display
//! - Input conditioning (button debouncing, potentiometer hysteresis)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod motor;
pub mod sensor;
pub mod stepper;
