//! Round scheduler
//!
//! Turns deal plans into stepper and flipper calls.

pub mod executor;

pub use executor::{run_plan, RoundReport};
