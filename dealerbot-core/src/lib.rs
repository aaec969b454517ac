//! Board-agnostic core logic for the card dealing robot
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (stepper, flipper, sensor, display)
//! - Stepper motion math (angle tracking, step timing, coil phases)
//! - Game definitions and deal plans
//! - Knob menus
//! - State machine and controller
//! - Round executor and deal monitoring
//! - Configuration types and the `machine.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod game;
pub mod input;
pub mod menu;
pub mod motion;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;
