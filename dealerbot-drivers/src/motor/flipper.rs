//! Card flipper on a GPIO-switched DC motor
//!
//! The motor is switched through a transistor or MOSFET with no speed
//! control: on for a fixed pulse, then off. One pulse moves one card. The
//! light sensor under the wheel gates the pulse so the motor never runs
//! with nothing to push.

use dealerbot_core::config::FlipperConfig;
use dealerbot_core::traits::{CardFlipper, DealOutcome, MotorError, ProximitySensor};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// GPIO card flipper
///
/// - `P`: motor enable pin
/// - `L`: card (light) sensor
/// - `D`: async delay provider
pub struct GpioFlipper<P, L, D> {
    motor: P,
    card_sensor: L,
    delay: D,
    config: FlipperConfig,
    /// Current logical state (true = motor running)
    running: bool,
}

impl<P, L, D> GpioFlipper<P, L, D>
where
    P: OutputPin,
    L: ProximitySensor,
    D: DelayNs,
{
    /// Create a new flipper with the motor off
    pub fn new(
        motor: P,
        card_sensor: L,
        delay: D,
        config: FlipperConfig,
    ) -> Result<Self, MotorError> {
        let mut flipper = Self {
            motor,
            card_sensor,
            delay,
            config,
            running: false,
        };
        flipper.set_running(false)?;
        Ok(flipper)
    }

    /// Check if a card is sitting under the wheel
    pub fn card_ready(&mut self) -> Result<bool, MotorError> {
        self.card_sensor.in_position().map_err(|_| MotorError::Sensor)
    }

    /// Check if the motor is currently on
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, on: bool) -> Result<(), MotorError> {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        let result = if on != self.config.inverted {
            self.motor.set_high()
        } else {
            self.motor.set_low()
        };
        result.map_err(|_| MotorError::Pin)?;
        self.running = on;
        Ok(())
    }
}

impl<P, L, D> CardFlipper for GpioFlipper<P, L, D>
where
    P: OutputPin,
    L: ProximitySensor,
    D: DelayNs,
{
    async fn deal(&mut self) -> Result<DealOutcome, MotorError> {
        if !self.card_ready()? {
            return Ok(DealOutcome::Skipped);
        }

        self.set_running(true)?;
        self.delay.delay_ms(self.config.pulse_ms).await;
        self.set_running(false)?;

        if self.config.settle_ms > 0 {
            self.delay.delay_ms(self.config.settle_ms).await;
        }
        Ok(DealOutcome::Dealt)
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        self.set_running(false)
    }
}
