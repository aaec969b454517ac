//! Stepper motor driver trait
//!
//! This trait abstracts over the dealing head's stepper. The reference
//! implementation drives a 4-coil unipolar motor (28BYJ-48 on a ULN2003
//! board) directly from GPIO, but anything that can turn by a number of
//! degrees and find its home sensor fits.

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise rotation (positive degrees)
    #[default]
    Clockwise,
    /// Counter-clockwise rotation (negative degrees)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Direction implied by the sign of a requested rotation
    pub fn from_degrees(degrees: f32) -> Self {
        if degrees < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }

    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Coil output could not be driven
    Pin,
    /// Home sensor could not be read
    Sensor,
    /// Speed of zero or a step interval that does not fit
    InvalidSpeed,
    /// Home sensor never triggered within the homing travel limit
    HomeNotFound,
}

/// Trait for the dealing head stepper
///
/// Angles are in degrees. The driver tracks the head angle in `[0, 360)`
/// relative to the last time it was zeroed.
#[allow(async_fn_in_trait)]
pub trait StepperDriver {
    /// Rotate by `degrees` at `rpm`
    ///
    /// Negative degrees rotate counter-clockwise. The coils are released
    /// once the move is complete.
    async fn rotate(&mut self, degrees: f32, rpm: u16) -> Result<(), StepperError>;

    /// Rotate until the home sensor triggers, then zero the angle
    async fn go_to_initial_position(&mut self) -> Result<(), StepperError>;

    /// Current head angle in degrees, always in `[0, 360)`
    fn angle(&self) -> f32;

    /// Declare the current position to be angle 0
    fn zero_angle(&mut self);

    /// De-energize all coils
    fn release(&mut self) -> Result<(), StepperError>;
}
