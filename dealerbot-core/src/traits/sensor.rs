//! Binary proximity sensor trait

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The input could not be read
    ReadFailed,
}

/// Trait for on/off position sensors
///
/// Used for the hall-effect sensor at the stepper home position and the
/// light sensor under the card flipper.
pub trait ProximitySensor {
    /// Check if the sensed object is in position
    ///
    /// Polarity is handled by the implementation: `true` always means
    /// "home magnet present" or "card ready", whatever the wiring.
    fn in_position(&mut self) -> Result<bool, SensorError>;
}

impl<T: ProximitySensor + ?Sized> ProximitySensor for &mut T {
    fn in_position(&mut self) -> Result<bool, SensorError> {
        (**self).in_position()
    }
}
