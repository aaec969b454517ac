//! Dealer task
//!
//! Owns the stepper and the flipper. Homes the head at power-on, then
//! runs each round the controller requests and reports the result.

use defmt::*;

use dealerbot_core::config::MachineConfig;
use dealerbot_core::safety::DealMonitor;
use dealerbot_core::scheduler::run_plan;
use dealerbot_core::state::ErrorKind;
use dealerbot_core::traits::StepperDriver;

use crate::board::{Flipper, Stepper};
use crate::channels::{BOOT_HOMED, ROUND_CMD, ROUND_DONE};

/// Dealer task - executes rounds
#[embassy_executor::task]
pub async fn dealer_task(
    mut stepper: Stepper,
    mut flipper: Flipper,
    config: &'static MachineConfig,
) {
    info!("Dealer task started, homing head");

    let homed = stepper.go_to_initial_position().await.map_err(ErrorKind::from);
    match homed {
        Ok(()) => info!("Head homed"),
        Err(kind) => error!("Homing failed: {:?}", kind),
    }
    BOOT_HOMED.signal(homed);

    let mut monitor = DealMonitor::new(config.safety.max_missed_deals);

    loop {
        let request = ROUND_CMD.wait().await;
        if request.starts_game() {
            monitor.reset();
        }

        let plan = request.plan(config);
        info!(
            "Dealing {:?} (#{}): {} cards, {} actions",
            request.round,
            request.id,
            plan.cards(),
            plan.total()
        );

        let result = run_plan(
            plan,
            &mut stepper,
            &mut flipper,
            &mut monitor,
            config.stepper.rpm,
            |index, action| trace!("Action {}: {:?}", index, action),
        )
        .await;

        match result {
            Ok(report) => info!(
                "Round done: {} dealt, {} skipped, {} cards this game, head at step {}",
                report.dealt,
                report.skipped,
                monitor.dealt(),
                stepper.position_steps()
            ),
            Err(kind) => error!("Round failed: {:?}", kind),
        }
        ROUND_DONE.signal((request.id, result));
    }
}
