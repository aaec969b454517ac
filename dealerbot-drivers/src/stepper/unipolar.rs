//! 4-coil unipolar stepper driven directly from GPIO
//!
//! Targets the 28BYJ-48 geared stepper on a ULN2003 darlington board: four
//! GPIO outputs, one per coil, no step/dir driver in between. The firmware
//! does the phase sequencing itself.
//!
//! # Timing
//!
//! Each step energizes the next coil pattern and then waits a fixed
//! interval of `60 / (steps_per_rev * rpm)` seconds. There is no ramping;
//! the 28BYJ-48's gearbox is slow enough to start at full speed.
//!
//! # Position
//!
//! The head angle is tracked in whole steps and wraps at one revolution.
//! Coils are released after every move so the motor does not heat up
//! while idle. The gearbox holds the head in place.

use dealerbot_core::config::StepperConfig;
use dealerbot_core::motion::{step_interval_us, AngleTracker, PhaseSequencer, COIL_COUNT};
use dealerbot_core::traits::{Direction, ProximitySensor, StepperDriver, StepperError};
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

/// Unipolar stepper driver
///
/// - `P`: coil output pins, in winding order (IN1..IN4 on the ULN2003)
/// - `H`: home sensor
/// - `D`: async delay provider
pub struct UnipolarStepper<P, H, D> {
    coils: [P; COIL_COUNT],
    home: H,
    delay: D,
    config: StepperConfig,
    tracker: AngleTracker,
    sequencer: PhaseSequencer,
}

impl<P, H, D> UnipolarStepper<P, H, D>
where
    P: OutputPin,
    H: ProximitySensor,
    D: DelayNs,
{
    /// Create a new driver with all coils released and the angle at 0
    pub fn new(
        coils: [P; COIL_COUNT],
        home: H,
        delay: D,
        config: StepperConfig,
    ) -> Result<Self, StepperError> {
        let mut stepper = Self {
            coils,
            home,
            delay,
            tracker: AngleTracker::new(config.steps_per_rev),
            sequencer: PhaseSequencer::new(config.drive_mode),
            config,
        };
        stepper.set_all_pins_low()?;
        Ok(stepper)
    }

    /// Head position in steps from home
    pub fn position_steps(&self) -> u16 {
        self.tracker.position()
    }

    /// Check if the home sensor currently sees the magnet
    pub fn at_home(&mut self) -> Result<bool, StepperError> {
        self.home.in_position().map_err(|_| StepperError::Sensor)
    }

    /// Drive every coil low
    fn set_all_pins_low(&mut self) -> Result<(), StepperError> {
        self.write_coils([false; COIL_COUNT])
    }

    /// Apply one coil pattern
    fn write_coils(&mut self, pattern: [bool; COIL_COUNT]) -> Result<(), StepperError> {
        for (pin, on) in self.coils.iter_mut().zip(pattern) {
            pin.set_state(PinState::from(on))
                .map_err(|_| StepperError::Pin)?;
        }
        Ok(())
    }

    /// Take one step: energize the next phase, wait, then record it
    async fn step(&mut self, direction: Direction, interval_us: u32) -> Result<(), StepperError> {
        let pattern = self.sequencer.step(direction);
        self.write_coils(pattern)?;
        self.delay.delay_us(interval_us).await;
        self.tracker.advance(direction);
        Ok(())
    }

    async fn run_steps(
        &mut self,
        direction: Direction,
        steps: u32,
        interval_us: u32,
    ) -> Result<(), StepperError> {
        for _ in 0..steps {
            self.step(direction, interval_us).await?;
        }
        Ok(())
    }

    /// Step towards home until the sensor triggers or travel runs out
    async fn seek_home(&mut self, interval_us: u32) -> Result<(), StepperError> {
        let direction = self.config.homing_direction;
        for _ in 0..self.config.max_homing_steps {
            if self.at_home()? {
                return Ok(());
            }
            self.step(direction, interval_us).await?;
        }
        if self.at_home()? {
            Ok(())
        } else {
            Err(StepperError::HomeNotFound)
        }
    }
}

impl<P, H, D> StepperDriver for UnipolarStepper<P, H, D>
where
    P: OutputPin,
    H: ProximitySensor,
    D: DelayNs,
{
    async fn rotate(&mut self, degrees: f32, rpm: u16) -> Result<(), StepperError> {
        let interval_us =
            step_interval_us(self.config.steps_per_rev, rpm).ok_or(StepperError::InvalidSpeed)?;
        let direction = Direction::from_degrees(degrees);
        let steps = self.tracker.steps_for(degrees);

        let moved = self.run_steps(direction, steps, interval_us).await;
        // Release even when the move failed part way
        let released = self.release();
        moved.and(released)
    }

    async fn go_to_initial_position(&mut self) -> Result<(), StepperError> {
        let interval_us = step_interval_us(self.config.steps_per_rev, self.config.homing_rpm)
            .ok_or(StepperError::InvalidSpeed)?;

        let found = self.seek_home(interval_us).await;
        let released = self.release();
        found.and(released)?;

        self.zero_angle();
        Ok(())
    }

    fn angle(&self) -> f32 {
        self.tracker.angle()
    }

    fn zero_angle(&mut self) {
        self.tracker.zero();
    }

    fn release(&mut self) -> Result<(), StepperError> {
        self.set_all_pins_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use dealerbot_core::motion::DriveMode;
    use dealerbot_core::traits::SensorError;
    use embassy_futures::block_on;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    /// Pin that refuses to go high once its budget is spent
    ///
    /// Going low always works, so a release after the fault can be seen.
    struct FailingPin {
        high: bool,
        highs_left: u32,
    }

    impl ErrorType for FailingPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for FailingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.highs_left == 0 {
                return Err(embedded_hal::digital::ErrorKind::Other);
            }
            self.highs_left -= 1;
            self.high = true;
            Ok(())
        }
    }

    fn failing(highs: u32) -> UnipolarStepper<FailingPin, ScriptedSensor, MockDelay> {
        let pins = [0, 1, 2, 3].map(|_| FailingPin {
            high: false,
            highs_left: highs,
        });
        UnipolarStepper::new(
            pins,
            ScriptedSensor::never(),
            MockDelay::default(),
            StepperConfig::default(),
        )
        .unwrap()
    }

    /// Delay that only accumulates the requested time
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    /// Home sensor that triggers after a number of polls
    struct ScriptedSensor {
        polls_until_home: Option<u32>,
        polls: u32,
    }

    impl ScriptedSensor {
        fn after(polls: u32) -> Self {
            Self {
                polls_until_home: Some(polls),
                polls: 0,
            }
        }

        fn never() -> Self {
            Self {
                polls_until_home: None,
                polls: 0,
            }
        }
    }

    impl ProximitySensor for ScriptedSensor {
        fn in_position(&mut self) -> Result<bool, SensorError> {
            let hit = matches!(self.polls_until_home, Some(n) if self.polls >= n);
            self.polls += 1;
            Ok(hit)
        }
    }

    fn pins() -> [MockPin; 4] {
        [
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
        ]
    }

    fn levels(stepper: &UnipolarStepper<MockPin, ScriptedSensor, MockDelay>) -> [bool; 4] {
        [
            stepper.coils[0].high,
            stepper.coils[1].high,
            stepper.coils[2].high,
            stepper.coils[3].high,
        ]
    }

    fn make(
        mode: DriveMode,
        home: ScriptedSensor,
    ) -> UnipolarStepper<MockPin, ScriptedSensor, MockDelay> {
        let config = StepperConfig {
            drive_mode: mode,
            ..Default::default()
        };
        UnipolarStepper::new(pins(), home, MockDelay::default(), config).unwrap()
    }

    #[test]
    fn test_new_releases_coils() {
        let stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        assert_eq!(levels(&stepper), [false; 4]);
        assert!(stepper.coils.iter().all(|p| p.writes == 1));
        assert_eq!(stepper.angle(), 0.0);
    }

    #[test]
    fn test_fullstep_sequence() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        let mut seen = [[false; 4]; 4];
        for pattern in seen.iter_mut() {
            block_on(stepper.step(Direction::Clockwise, 0)).unwrap();
            *pattern = levels(&stepper);
        }
        assert_eq!(
            seen,
            [
                [true, true, false, false],
                [false, true, true, false],
                [false, false, true, true],
                [true, false, false, true],
            ]
        );
    }

    #[test]
    fn test_wavedrive_reverse_sequence() {
        let mut stepper = make(DriveMode::WaveDrive, ScriptedSensor::never());
        let mut seen = [[false; 4]; 4];
        for pattern in seen.iter_mut() {
            block_on(stepper.step(Direction::CounterClockwise, 0)).unwrap();
            *pattern = levels(&stepper);
        }
        assert_eq!(
            seen,
            [
                [false, false, false, true],
                [false, false, true, false],
                [false, true, false, false],
                [true, false, false, false],
            ]
        );
    }

    #[test]
    fn test_rotate_tracks_angle_and_releases() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        block_on(stepper.rotate(90.0, 15)).unwrap();
        assert_eq!(stepper.position_steps(), 512);
        assert_eq!(stepper.angle(), 90.0);
        assert_eq!(levels(&stepper), [false; 4]);
        // 512 steps at 1953 us each
        assert_eq!(stepper.delay.total_ns, 512 * 1_953_000);
    }

    #[test]
    fn test_rotate_runs_whole_cycles() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        block_on(stepper.rotate(30.0, 15)).unwrap();
        assert_eq!(stepper.position_steps(), 172);
        assert_eq!(stepper.delay.total_ns, 172 * 1_953_000);

        block_on(stepper.rotate(0.5, 15)).unwrap();
        assert_eq!(stepper.position_steps(), 176);
        assert_eq!(levels(&stepper), [false; 4]);
    }

    #[test]
    fn test_negative_rotation_wraps() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        block_on(stepper.rotate(-90.0, 15)).unwrap();
        assert_eq!(stepper.angle(), 270.0);
        block_on(stepper.rotate(450.0, 15)).unwrap();
        assert_eq!(stepper.angle(), 0.0);
    }

    #[test]
    fn test_rotate_zero_rpm_rejected() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        assert_eq!(
            block_on(stepper.rotate(90.0, 0)),
            Err(StepperError::InvalidSpeed)
        );
        assert_eq!(stepper.angle(), 0.0);
    }

    #[test]
    fn test_rotate_zero_degrees_is_noop() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        block_on(stepper.rotate(0.0, 15)).unwrap();
        assert_eq!(stepper.position_steps(), 0);
        assert_eq!(stepper.delay.total_ns, 0);
    }

    #[test]
    fn test_homing_zeroes_angle() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::after(0));
        block_on(stepper.rotate(45.0, 15)).unwrap();
        stepper.home = ScriptedSensor::after(100);

        block_on(stepper.go_to_initial_position()).unwrap();
        assert_eq!(stepper.angle(), 0.0);
        assert_eq!(levels(&stepper), [false; 4]);
        // One poll per step plus the poll that found home
        assert_eq!(stepper.home.polls, 101);
    }

    #[test]
    fn test_homing_already_home() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::after(0));
        block_on(stepper.go_to_initial_position()).unwrap();
        assert_eq!(stepper.delay.total_ns, 0);
    }

    #[test]
    fn test_homing_gives_up() {
        let mut stepper = make(DriveMode::FullStep, ScriptedSensor::never());
        stepper.config.max_homing_steps = 10;
        assert_eq!(
            block_on(stepper.go_to_initial_position()),
            Err(StepperError::HomeNotFound)
        );
        assert_eq!(stepper.position_steps(), 10);
        assert_eq!(levels(&stepper), [false; 4]);
    }

    #[test]
    fn test_rotate_pin_fault_still_releases() {
        let mut stepper = failing(3);
        assert_eq!(
            block_on(stepper.rotate(90.0, 15)),
            Err(StepperError::Pin)
        );
        // Coil 2 refuses its fourth high on step 6
        assert_eq!(stepper.position_steps(), 5);
        assert!(stepper.coils.iter().all(|pin| !pin.high));
    }

    #[test]
    fn test_homing_pin_fault_still_releases() {
        let mut stepper = failing(3);
        assert_eq!(
            block_on(stepper.go_to_initial_position()),
            Err(StepperError::Pin)
        );
        assert!(stepper.coils.iter().all(|pin| !pin.high));
        assert!(stepper.home.polls > 0);
    }
}
