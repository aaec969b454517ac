//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use dealerbot_core::controller::{DisplayText, RoundRequest};
use dealerbot_core::input::InputEvent;
use dealerbot_core::scheduler::RoundReport;
use dealerbot_core::state::ErrorKind;

/// Channel capacity for input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Knob and button events for the controller
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Text the display should show (latest wins)
pub static DISPLAY_TEXT: Signal<CriticalSectionRawMutex, DisplayText> = Signal::new();

/// Result of the homing run at power-on
pub static BOOT_HOMED: Signal<CriticalSectionRawMutex, Result<(), ErrorKind>> = Signal::new();

/// Round for the dealer to run (set by controller)
pub static ROUND_CMD: Signal<CriticalSectionRawMutex, RoundRequest> = Signal::new();

/// Result of the last round, tagged with its request id (set by dealer)
pub static ROUND_DONE: Signal<
    CriticalSectionRawMutex,
    (u16, Result<RoundReport, ErrorKind>),
> = Signal::new();

/// Faults detected outside a round, e.g. the display stopped answering
pub static FAULT: Signal<CriticalSectionRawMutex, ErrorKind> = Signal::new();
