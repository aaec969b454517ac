//! State machine
//!
//! Explicit finite state machine for the dealer: game selection, player
//! selection, dealing and the pauses between poker rounds.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
