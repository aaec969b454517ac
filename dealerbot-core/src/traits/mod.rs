//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod motor;
pub mod sensor;
pub mod stepper;

pub use display::{DisplayError, DisplayExt, SegmentDisplay, DISPLAY_DIGITS};
pub use motor::{CardFlipper, DealOutcome, MotorError};
pub use sensor::{ProximitySensor, SensorError};
pub use stepper::{Direction, StepperDriver, StepperError};
