//! State machine definition
//!
//! All motor and display behavior is a function of the current state
//! and an event.

use super::events::Event;
use crate::game::Round;
use crate::traits::{MotorError, StepperError};

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on initialization, config loading, head homing
    Boot,
    /// Knob picks the game
    SelectGame,
    /// Knob picks the number of poker players
    SelectPlayers,
    /// Round in progress, input ignored
    Dealing(Round),
    /// Poker hand paused until the button is pressed for the next round
    AwaitingRound(Round),
    /// Fault detected; motors released
    Error(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Hall sensor never found while homing
    HomingFailed,
    /// Stepper coil or speed fault
    StepperFault,
    /// Flipper motor or card sensor fault
    FlipperFault,
    /// Several deals in a row found no card
    OutOfCards,
    /// Display did not respond
    DisplayFault,
    /// Configuration error
    ConfigError,
}

impl ErrorKind {
    /// Numeric code shown on the display as `Er<n>`
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::HomingFailed => 1,
            ErrorKind::StepperFault => 2,
            ErrorKind::FlipperFault => 3,
            ErrorKind::OutOfCards => 4,
            ErrorKind::DisplayFault => 5,
            ErrorKind::ConfigError => 6,
        }
    }
}

impl From<StepperError> for ErrorKind {
    fn from(err: StepperError) -> Self {
        match err {
            StepperError::HomeNotFound => ErrorKind::HomingFailed,
            StepperError::Pin | StepperError::Sensor | StepperError::InvalidSpeed => {
                ErrorKind::StepperFault
            }
        }
    }
}

impl From<MotorError> for ErrorKind {
    fn from(_: MotorError) -> Self {
        ErrorKind::FlipperFault
    }
}

impl State {
    /// Check if a round is being dealt
    pub fn is_dealing(&self) -> bool {
        matches!(self, State::Dealing(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Boot transitions
            (Boot, BootComplete) => SelectGame,

            // Game selection
            (SelectGame, ChooseGame(game)) => {
                if game.needs_players() {
                    SelectPlayers
                } else {
                    Dealing(game.first_round())
                }
            }

            // Player selection
            (SelectPlayers, ChoosePlayers) => Dealing(Round::HoleCards),
            (SelectPlayers, Back | Abort) => SelectGame,

            // Dealing: poker rounds pause for the button, the last round ends the game
            (Dealing(round), RoundFinished) => match round.next() {
                Some(next) => AwaitingRound(next),
                None => SelectGame,
            },

            // Between poker rounds
            (AwaitingRound(round), Continue) => Dealing(round),
            (AwaitingRound(_), Abort) => SelectGame,

            // Any fault outside the error state
            (Error(_), AcknowledgeError) => SelectGame,
            (Error(_), _) => self,
            (_, ErrorDetected(kind)) => Error(kind),

            // Default: stay in current state
            _ => self,
        }
    }
}
