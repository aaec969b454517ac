//! GPIO proximity sensor
//!
//! Digital hall-effect and light sensors both present as a single input
//! line. Whether "in position" reads high or low depends on the module,
//! so the polarity is configurable.

use dealerbot_core::config::SensorConfig;
use dealerbot_core::traits::{ProximitySensor, SensorError};
use embedded_hal::digital::InputPin;

/// Proximity sensor on a GPIO input
pub struct GpioProximity<I> {
    pin: I,
    /// If true, in position = pin LOW
    inverted: bool,
}

impl<I: InputPin> GpioProximity<I> {
    /// Create a new sensor
    ///
    /// # Arguments
    /// - `pin`: The GPIO input the sensor drives
    /// - `inverted`: If true, the sensor pulls the line low when triggered
    pub fn new(pin: I, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Create a sensor from its configuration section
    pub fn from_config(pin: I, config: &SensorConfig) -> Self {
        Self::new(pin, config.inverted)
    }
}

impl<I: InputPin> ProximitySensor for GpioProximity<I> {
    fn in_position(&mut self) -> Result<bool, SensorError> {
        let high = self.pin.is_high().map_err(|_| SensorError::ReadFailed)?;
        Ok(high != self.inverted)
    }
}
