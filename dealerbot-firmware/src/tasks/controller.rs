//! Main controller task
//!
//! Feeds input events, round results and faults into the controller,
//! hands new rounds to the dealer and keeps the display current.

use defmt::*;
use embassy_futures::select::{select3, Either3};

use dealerbot_core::config::MachineConfig;
use dealerbot_core::controller::Controller;
use dealerbot_core::state::Event;

use crate::channels::{BOOT_HOMED, DISPLAY_TEXT, FAULT, INPUT_CHANNEL, ROUND_CMD, ROUND_DONE};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: &'static MachineConfig) {
    info!("Controller task started");

    let mut controller = Controller::new(*config);
    DISPLAY_TEXT.signal(controller.display_text());

    // Boot ends once the dealer has tried to home the head
    match BOOT_HOMED.wait().await {
        Ok(()) => {
            controller.boot_complete();
            info!("Boot complete, entering game selection");
        }
        Err(kind) => {
            controller.fault(kind);
        }
    }
    DISPLAY_TEXT.signal(controller.display_text());

    loop {
        let event = match select3(INPUT_CHANNEL.receive(), ROUND_DONE.wait(), FAULT.wait()).await
        {
            Either3::First(input) => {
                trace!("Input: {:?}", input);
                controller.process_input(input)
            }
            Either3::Second((id, result)) => {
                let event = controller.round_finished(id, result);
                if event.is_none() {
                    warn!("Dropping stale result of round #{}", id);
                }
                event
            }
            Either3::Third(kind) => Some(controller.fault(kind)),
        };

        if let Some(event) = event {
            debug!("Event: {:?} -> {:?}", event, controller.state());
            if let (Event::RoundFinished, Some(report)) = (event, controller.last_report()) {
                debug!("Last round: {:?}", report);
            }
        }

        if let Some(request) = controller.take_round_request() {
            info!("Starting round {:?}", request.round);
            ROUND_CMD.signal(request);
        }

        DISPLAY_TEXT.signal(controller.display_text());
    }
}
