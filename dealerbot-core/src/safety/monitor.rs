//! Deal monitor implementation
//!
//! Watches the outcome of every deal. The light sensor reports no card
//! both for an empty deck and for a jammed card, so a run of skipped
//! deals is treated as a fault instead of silently dealing air.

use crate::state::ErrorKind;
use crate::traits::DealOutcome;

/// Deal condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(ErrorKind),
}

/// Counts consecutive skipped deals
#[derive(Debug, Clone)]
pub struct DealMonitor {
    /// Skips in a row that trip the monitor (0 = disabled)
    max_missed: u8,
    /// Current run of skipped deals
    missed: u8,
    /// Cards dealt since the last reset
    dealt: u16,
}

impl DealMonitor {
    /// Create a new monitor
    pub fn new(max_missed: u8) -> Self {
        Self {
            max_missed,
            missed: 0,
            dealt: 0,
        }
    }

    /// Record the outcome of one deal
    pub fn record(&mut self, outcome: DealOutcome) {
        match outcome {
            DealOutcome::Dealt => {
                self.missed = 0;
                self.dealt = self.dealt.saturating_add(1);
            }
            DealOutcome::Skipped => {
                self.missed = self.missed.saturating_add(1);
            }
        }
    }

    /// Check the deal history
    pub fn check(&self) -> SafetyStatus {
        if self.max_missed > 0 && self.missed >= self.max_missed {
            return SafetyStatus::Fault(ErrorKind::OutOfCards);
        }
        SafetyStatus::Ok
    }

    /// Forget all history, called when a new game starts
    pub fn reset(&mut self) {
        self.missed = 0;
        self.dealt = 0;
    }

    /// Current run of skipped deals
    pub fn missed(&self) -> u8 {
        self.missed
    }

    /// Cards dealt since the last reset
    pub fn dealt(&self) -> u16 {
        self.dealt
    }
}
