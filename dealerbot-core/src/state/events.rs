//! Events that trigger state transitions

use super::machine::ErrorKind;
use crate::game::Game;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Boot sequence completed successfully
    BootComplete,

    // UI navigation events
    /// User confirmed a game with the button
    ChooseGame(Game),
    /// User confirmed the number of players
    ChoosePlayers,
    /// User wants to go back (long press while selecting)
    Back,
    /// User pressed the button to deal the next round
    Continue,
    /// User abandoned the hand (long press between rounds)
    Abort,

    // Dealer events
    /// The current round's plan ran to completion
    RoundFinished,

    // Safety events
    /// Error detected by the dealer or the safety monitor
    ErrorDetected(ErrorKind),
    /// User acknowledged error
    AcknowledgeError,
}
