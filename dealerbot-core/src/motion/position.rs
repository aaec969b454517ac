//! Angle tracking for the dealing head
//!
//! The head position is kept as a whole number of steps so that repeated
//! moves never accumulate floating point drift. The angle in degrees is
//! derived from it on demand.

use super::phase::COIL_COUNT;
use crate::traits::Direction;

/// Microseconds per minute, the numerator of the step interval
const US_PER_MINUTE: u64 = 60_000_000;

/// Slack removed before rounding a step count up, absorbs f32 rounding
/// of requests that land exactly on a step boundary
const STEP_EPSILON: f32 = 1e-3;

/// Delay between steps for the given speed
///
/// `60 / (steps_per_rev * rpm)` seconds, in microseconds. Returns `None`
/// for a zero speed or zero steps per revolution.
pub fn step_interval_us(steps_per_rev: u16, rpm: u16) -> Option<u32> {
    let steps_per_minute = steps_per_rev as u64 * rpm as u64;
    if steps_per_minute == 0 {
        return None;
    }
    u32::try_from(US_PER_MINUTE / steps_per_minute).ok()
}

/// Head angle tracker
///
/// Position is in steps, always in `0..steps_per_rev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleTracker {
    steps_per_rev: u16,
    position: u16,
}

impl AngleTracker {
    /// Create a tracker at angle 0
    ///
    /// A zero `steps_per_rev` is treated as one step per revolution.
    pub fn new(steps_per_rev: u16) -> Self {
        Self {
            steps_per_rev: steps_per_rev.max(1),
            position: 0,
        }
    }

    /// Current position in steps
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Current angle in degrees, in `[0, 360)`
    pub fn angle(&self) -> f32 {
        self.position as f32 * 360.0 / self.steps_per_rev as f32
    }

    /// Record one step in the given direction
    pub fn advance(&mut self, direction: Direction) {
        let spr = self.steps_per_rev as i32;
        let next = (self.position as i32 + direction.sign()).rem_euclid(spr);
        self.position = next as u16;
    }

    /// Reset the angle to 0
    pub fn zero(&mut self) {
        self.position = 0;
    }

    /// Number of steps for a rotation of `degrees`
    ///
    /// The sign is ignored. Moves always run whole coil cycles, so the
    /// count is rounded up to a multiple of [`COIL_COUNT`] and any
    /// non-zero request takes at least one cycle.
    pub fn steps_for(&self, degrees: f32) -> u32 {
        let magnitude = if degrees < 0.0 { -degrees } else { degrees };
        let exact = magnitude * self.steps_per_rev as f32 / 360.0;
        if exact.is_nan() || exact <= 0.0 {
            return 0;
        }
        // `as` saturates, so absurd requests are bounded by u32::MAX
        let floor = (exact - STEP_EPSILON) as u32;
        let steps = if (floor as f32) < exact - STEP_EPSILON {
            floor.saturating_add(1)
        } else {
            floor
        };
        let cycle = COIL_COUNT as u32;
        steps.max(1).div_ceil(cycle).saturating_mul(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_interval() {
        // 28BYJ-48 at its default speed: 60 / (2048 * 15) s
        assert_eq!(step_interval_us(2048, 15), Some(1953));
        assert_eq!(step_interval_us(200, 60), Some(5000));
        assert_eq!(step_interval_us(2048, 0), None);
        assert_eq!(step_interval_us(0, 15), None);
    }

    #[test]
    fn test_steps_for() {
        let tracker = AngleTracker::new(2048);
        assert_eq!(tracker.steps_for(360.0), 2048);
        assert_eq!(tracker.steps_for(90.0), 512);
        assert_eq!(tracker.steps_for(-90.0), 512);
        assert_eq!(tracker.steps_for(0.0), 0);
    }

    #[test]
    fn test_steps_for_rounds_up_to_whole_cycles() {
        let tracker = AngleTracker::new(2048);
        // 170.67 exact steps, 171 whole, 172 in full cycles
        assert_eq!(tracker.steps_for(30.0), 172);
        assert_eq!(tracker.steps_for(-30.0), 172);
        assert_eq!(tracker.steps_for(0.5), 4);
        assert_eq!(tracker.steps_for(0.1), 4);
        // 100 exact steps is already whole cycles
        assert_eq!(AngleTracker::new(200).steps_for(180.0), 100);
        assert_eq!(AngleTracker::new(200).steps_for(f32::NAN), 0);
    }

    #[test]
    fn test_advance_wraps() {
        let mut tracker = AngleTracker::new(4);
        tracker.advance(Direction::CounterClockwise);
        assert_eq!(tracker.position(), 3);
        assert_eq!(tracker.angle(), 270.0);

        tracker.advance(Direction::Clockwise);
        tracker.advance(Direction::Clockwise);
        assert_eq!(tracker.position(), 1);
        assert_eq!(tracker.angle(), 90.0);
    }

    #[test]
    fn test_full_revolution_returns_to_zero() {
        let mut tracker = AngleTracker::new(2048);
        for _ in 0..tracker.steps_for(360.0) {
            tracker.advance(Direction::Clockwise);
        }
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.angle(), 0.0);
    }

    #[test]
    fn test_zero() {
        let mut tracker = AngleTracker::new(2048);
        for _ in 0..100 {
            tracker.advance(Direction::Clockwise);
        }
        assert!(tracker.angle() > 0.0);
        tracker.zero();
        assert_eq!(tracker.angle(), 0.0);
    }

    #[test]
    fn test_zero_steps_per_rev_is_clamped() {
        let mut tracker = AngleTracker::new(0);
        tracker.advance(Direction::Clockwise);
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.angle(), 0.0);
    }
}
