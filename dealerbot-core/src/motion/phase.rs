//! Coil phase sequencing for 4-coil unipolar steppers
//!
//! Two excitation schemes are supported:
//!
//! - Wavedrive: one coil energized at a time. Lower torque and current.
//! - Fullstep: two adjacent coils energized at a time. More torque.
//!
//! Both have four phases per electrical cycle. The phase index is kept
//! across moves so consecutive moves never skip or repeat a phase.

use crate::traits::Direction;

/// Number of coils (and phases) driven by the sequencer
pub const COIL_COUNT: usize = 4;

/// Coil excitation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Single coil at a time
    WaveDrive,
    /// Two overlapped coils at a time
    #[default]
    FullStep,
}

/// Phase sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseSequencer {
    mode: DriveMode,
    phase: u8,
}

impl PhaseSequencer {
    /// Create a sequencer at phase 0
    pub const fn new(mode: DriveMode) -> Self {
        Self { mode, phase: 0 }
    }

    /// Current phase index (0-3)
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Move to the next phase in the given direction
    pub fn advance(&mut self, direction: Direction) {
        self.phase = match direction {
            Direction::Clockwise => (self.phase + 1) % COIL_COUNT as u8,
            Direction::CounterClockwise => (self.phase + COIL_COUNT as u8 - 1) % COIL_COUNT as u8,
        };
    }

    /// Advance one phase and return the coil levels to apply
    pub fn step(&mut self, direction: Direction) -> [bool; COIL_COUNT] {
        self.advance(direction);
        self.pattern()
    }

    /// Coil levels for the current phase
    pub fn pattern(&self) -> [bool; COIL_COUNT] {
        pattern_for(self.mode, self.phase as usize)
    }
}

/// Coil levels for `phase` in the given mode
///
/// Wavedrive energizes coil `phase` only. Fullstep energizes coil `phase`
/// together with the coil before it, `(phase + 3) % 4`.
pub fn pattern_for(mode: DriveMode, phase: usize) -> [bool; COIL_COUNT] {
    let lead = phase % COIL_COUNT;
    let mut coils = [false; COIL_COUNT];
    coils[lead] = true;
    if mode == DriveMode::FullStep {
        coils[(lead + COIL_COUNT - 1) % COIL_COUNT] = true;
    }
    coils
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavedrive_patterns() {
        assert_eq!(pattern_for(DriveMode::WaveDrive, 0), [true, false, false, false]);
        assert_eq!(pattern_for(DriveMode::WaveDrive, 1), [false, true, false, false]);
        assert_eq!(pattern_for(DriveMode::WaveDrive, 2), [false, false, true, false]);
        assert_eq!(pattern_for(DriveMode::WaveDrive, 3), [false, false, false, true]);
    }

    #[test]
    fn test_fullstep_patterns() {
        assert_eq!(pattern_for(DriveMode::FullStep, 0), [true, false, false, true]);
        assert_eq!(pattern_for(DriveMode::FullStep, 1), [true, true, false, false]);
        assert_eq!(pattern_for(DriveMode::FullStep, 2), [false, true, true, false]);
        assert_eq!(pattern_for(DriveMode::FullStep, 3), [false, false, true, true]);
    }

    #[test]
    fn test_fullstep_always_two_coils() {
        for phase in 0..COIL_COUNT {
            let on = pattern_for(DriveMode::FullStep, phase)
                .iter()
                .filter(|c| **c)
                .count();
            assert_eq!(on, 2);
        }
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        let mut seq = PhaseSequencer::new(DriveMode::WaveDrive);
        seq.advance(Direction::CounterClockwise);
        assert_eq!(seq.phase(), 3);
        seq.advance(Direction::Clockwise);
        seq.advance(Direction::Clockwise);
        assert_eq!(seq.phase(), 1);
    }

    #[test]
    fn test_reversal_retraces_phases() {
        let mut seq = PhaseSequencer::new(DriveMode::FullStep);
        let forward: [[bool; 4]; 3] = [
            seq.step(Direction::Clockwise),
            seq.step(Direction::Clockwise),
            seq.step(Direction::Clockwise),
        ];
        // Stepping back lands on the previously energized phases in reverse
        assert_eq!(seq.step(Direction::CounterClockwise), forward[1]);
        assert_eq!(seq.step(Direction::CounterClockwise), forward[0]);
    }
}
