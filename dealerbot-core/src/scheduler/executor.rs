//! Round executor
//!
//! Runs a [`DealPlan`] against a stepper and a flipper. On any failure the
//! coils are released and the flipper is stopped before the error is
//! returned, so a fault never leaves a motor energized.

use crate::game::{DealAction, DealPlan};
use crate::safety::{DealMonitor, SafetyStatus};
use crate::state::ErrorKind;
use crate::traits::{CardFlipper, DealOutcome, StepperDriver};

/// Summary of a completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundReport {
    /// Cards that left the deck
    pub dealt: u16,
    /// Deal requests that found no card
    pub skipped: u16,
}

/// Execute every action of `plan` in order
///
/// `on_action` is called before each action with its index, mainly for
/// logging.
pub async fn run_plan<S, F>(
    plan: DealPlan,
    stepper: &mut S,
    flipper: &mut F,
    monitor: &mut DealMonitor,
    rpm: u16,
    mut on_action: impl FnMut(usize, DealAction),
) -> Result<RoundReport, ErrorKind>
where
    S: StepperDriver,
    F: CardFlipper,
{
    let mut report = RoundReport::default();

    for (index, action) in plan.enumerate() {
        on_action(index, action);
        if let Err(kind) = execute(action, stepper, flipper, monitor, rpm, &mut report).await {
            let _ = flipper.stop();
            let _ = stepper.release();
            return Err(kind);
        }
    }

    Ok(report)
}

async fn execute<S, F>(
    action: DealAction,
    stepper: &mut S,
    flipper: &mut F,
    monitor: &mut DealMonitor,
    rpm: u16,
    report: &mut RoundReport,
) -> Result<(), ErrorKind>
where
    S: StepperDriver,
    F: CardFlipper,
{
    match action {
        DealAction::Home => stepper.go_to_initial_position().await?,
        DealAction::Rotate(degrees) => stepper.rotate(degrees, rpm).await?,
        DealAction::Deal => {
            let outcome = flipper.deal().await?;
            match outcome {
                DealOutcome::Dealt => report.dealt = report.dealt.saturating_add(1),
                DealOutcome::Skipped => report.skipped = report.skipped.saturating_add(1),
            }
            monitor.record(outcome);
            if let SafetyStatus::Fault(kind) = monitor.check() {
                return Err(kind);
            }
        }
    }
    Ok(())
}
