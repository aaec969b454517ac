//! DealerBot - Card Dealing Robot Firmware
//!
//! Main firmware binary for the RP2040-based card dealer. A stepper turns
//! the dealing head, a DC motor flips cards out of the deck, and a knob,
//! a button and a 4-digit display drive the menus.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dealerbot_core::config::MachineConfig;

use crate::board::Board;
use crate::config::load_config;

mod board;
mod channels;
mod config;
mod tasks;

// Configuration must live forever for task references
static MACHINE_CONFIG: StaticCell<MachineConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DealerBot firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static MachineConfig = MACHINE_CONFIG.init(load_config());
    info!("Configuration loaded");

    // Every output is driven to its idle level here, before any task runs
    let board = match Board::new(p, config) {
        Ok(board) => board,
        Err(e) => {
            // GPIO writes on the RP2040 cannot fail, so this is unreachable
            // with the stock board
            error!("Hardware init failed: {:?}", e);
            loop {
                embassy_time::Timer::after_secs(60).await;
            }
        }
    };
    info!("Hardware initialized");

    spawner
        .spawn(tasks::display_task(board.display, config.display.brightness))
        .unwrap();
    spawner
        .spawn(tasks::input_task(board.knob, board.button, config.button))
        .unwrap();
    spawner
        .spawn(tasks::dealer_task(board.stepper, board.flipper, config))
        .unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
