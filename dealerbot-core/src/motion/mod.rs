//! Stepper motion math
//!
//! Step counts, step timing and coil phase sequencing for the dealing head.

pub mod phase;
pub mod position;

pub use phase::{pattern_for, DriveMode, PhaseSequencer, COIL_COUNT};
pub use position::{step_interval_us, AngleTracker};
