//! Board pin map and hardware construction
//!
//! Raspberry Pi Pico wiring:
//!
//! | Function            | Pin            |
//! |---------------------|----------------|
//! | Stepper coils 1-4   | GPIO2..GPIO5   |
//! | Hall sensor (home)  | GPIO6          |
//! | Light sensor (card) | GPIO7          |
//! | Flipper motor       | GPIO8          |
//! | Button              | GPIO9          |
//! | Potentiometer       | GPIO26 (ADC0)  |
//! | HT16K33 SDA / SCL   | GPIO16 / GPIO17 (I2C0) |
//!
//! Polarity and pull-ups come from the configuration.

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::Peripherals;
use embassy_time::Delay;

use dealerbot_core::config::MachineConfig;
use dealerbot_core::traits::{MotorError, StepperError};
use dealerbot_drivers::display::Ht16k33;
use dealerbot_drivers::input::{AdcReader, Potentiometer};
use dealerbot_drivers::motor::GpioFlipper;
use dealerbot_drivers::sensor::GpioProximity;
use dealerbot_drivers::stepper::UnipolarStepper;

/// Dealing head stepper
pub type Stepper = UnipolarStepper<Output<'static>, GpioProximity<Input<'static>>, Delay>;

/// Card flipper
pub type Flipper = GpioFlipper<Output<'static>, GpioProximity<Input<'static>>, Delay>;

/// 7-segment display
pub type Display = Ht16k33<I2c<'static, I2C0, i2c::Blocking>>;

/// Menu knob
pub type Knob = Potentiometer<KnobAdc>;

/// Potentiometer wiper on an ADC channel
pub struct KnobAdc {
    adc: Adc<'static, adc::Blocking>,
    channel: adc::Channel<'static>,
}

impl AdcReader for KnobAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

/// Board hardware, built from the configuration
pub struct Board {
    pub stepper: Stepper,
    pub flipper: Flipper,
    pub knob: Knob,
    pub button: Input<'static>,
    pub display: Display,
}

/// Hardware construction errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    Stepper(StepperError),
    Flipper(MotorError),
}

fn pull(pull_up: bool) -> Pull {
    if pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

impl Board {
    /// Claim the peripherals and drive every output to its idle level
    pub fn new(p: Peripherals, config: &MachineConfig) -> Result<Self, BoardError> {
        let coils = [
            Output::new(p.PIN_2, Level::Low),
            Output::new(p.PIN_3, Level::Low),
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
        ];
        let hall = Input::new(p.PIN_6, pull(config.hall_sensor.pull_up));
        let stepper = UnipolarStepper::new(
            coils,
            GpioProximity::from_config(hall, &config.hall_sensor),
            Delay,
            config.stepper,
        )
        .map_err(BoardError::Stepper)?;

        // Idle level of an active-low motor output is high
        let motor_idle = if config.flipper.inverted {
            Level::High
        } else {
            Level::Low
        };
        let motor = Output::new(p.PIN_8, motor_idle);
        let light = Input::new(p.PIN_7, pull(config.light_sensor.pull_up));
        let flipper = GpioFlipper::new(
            motor,
            GpioProximity::from_config(light, &config.light_sensor),
            Delay,
            config.flipper,
        )
        .map_err(BoardError::Flipper)?;

        let adc = Adc::new_blocking(p.ADC, adc::Config::default());
        let channel = adc::Channel::new_pin(p.PIN_26, Pull::None);
        let knob = Potentiometer::new(KnobAdc { adc, channel }, &config.potentiometer);

        let button = Input::new(p.PIN_9, pull(config.button.pull_up));

        let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c::Config::default());
        let display = Ht16k33::new(i2c, config.display.i2c_address);

        Ok(Self {
            stepper,
            flipper,
            knob,
            button,
            display,
        })
    }
}
