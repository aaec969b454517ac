//! Display task
//!
//! Shows whatever text the controller last published. Writes to the
//! HT16K33 are blocking I2C and take well under a millisecond.

use defmt::*;

use dealerbot_core::state::ErrorKind;
use dealerbot_core::traits::{DisplayError, SegmentDisplay};

use crate::board::Display;
use crate::channels::{DISPLAY_TEXT, FAULT};

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut display: Display, brightness: u8) {
    info!("Display task started");

    let mut healthy = match display.init(brightness) {
        Ok(()) => true,
        Err(e) => {
            report(e);
            false
        }
    };

    loop {
        let text = DISPLAY_TEXT.wait().await;
        match display.show(&text) {
            Ok(()) => {
                if !healthy {
                    info!("Display recovered");
                    healthy = true;
                }
            }
            Err(e) => {
                if healthy {
                    report(e);
                    healthy = false;
                }
            }
        }
    }
}

fn report(error: DisplayError) {
    match error {
        DisplayError::Bus => {
            error!("Display not responding");
            FAULT.signal(ErrorKind::DisplayFault);
        }
        // A label the font cannot draw is a firmware bug, not a hardware fault
        other => warn!("Cannot show text: {:?}", other),
    }
}
