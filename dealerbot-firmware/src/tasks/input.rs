//! Input polling task
//!
//! Samples the knob and the button on a fixed period and forwards
//! conditioned events to the controller.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use dealerbot_core::config::ButtonConfig;
use dealerbot_core::input::InputEvent;
use dealerbot_drivers::input::ButtonDebouncer;

use crate::board::Knob;
use crate::channels::INPUT_CHANNEL;

/// Input task - knob and button sampling
#[embassy_executor::task]
pub async fn input_task(mut knob: Knob, button: Input<'static>, config: ButtonConfig) {
    info!("Input task started");

    let mut debouncer = ButtonDebouncer::from_config(&config);
    let poll_ms = config.poll_ms.max(1);
    let mut ticker = Ticker::every(Duration::from_millis(poll_ms as u64));
    let mut knob_failed = false;

    loop {
        match knob.poll() {
            Ok(Some(raw)) => {
                trace!("Knob: {}", raw);
                INPUT_CHANNEL.send(InputEvent::Knob(raw)).await;
                knob_failed = false;
            }
            Ok(None) => knob_failed = false,
            Err(e) => {
                // Log once per failure run, not every sample
                if !knob_failed {
                    warn!("Knob read failed: {:?}", e);
                    knob_failed = true;
                }
            }
        }

        let pressed = button.is_high() != config.inverted;
        if let Some(event) = debouncer.update(pressed, poll_ms) {
            debug!("Button: {:?}", event);
            INPUT_CHANNEL.send(event.into()).await;
        }

        ticker.next().await;
    }
}
