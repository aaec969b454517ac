//! Card games
//!
//! A game is a fixed sequence of rounds. Each round expands into a
//! [`DealPlan`], the list of head moves and card pulses the dealer runs
//! without stopping for input.

pub mod plan;

pub use plan::{DealAction, DealPlan};

/// Games the dealer knows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Game {
    /// Hold'em style: hole cards, flop, turn, river
    Poker,
    /// Whole deck split into two face-down piles
    War,
}

impl Game {
    /// Menu label shown on the 7-segment display
    pub fn label(&self) -> &'static str {
        match self {
            Game::Poker => "po",
            // No W on seven segments, two U's stand in for it
            Game::War => "UUar",
        }
    }

    /// First round dealt after the game is chosen
    pub fn first_round(&self) -> Round {
        match self {
            Game::Poker => Round::HoleCards,
            Game::War => Round::War,
        }
    }

    /// Check if the player count must be chosen before dealing
    pub fn needs_players(&self) -> bool {
        matches!(self, Game::Poker)
    }
}

/// A single uninterrupted dealing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Round {
    /// Entire War deck into two piles
    War,
    /// Poker hole cards around the table
    HoleCards,
    /// Burn plus three community cards
    Flop,
    /// Burn plus the fourth community card
    Turn,
    /// Burn plus the fifth community card
    River,
}

impl Round {
    /// Round that follows this one in the same hand, if any
    pub fn next(&self) -> Option<Round> {
        match self {
            Round::HoleCards => Some(Round::Flop),
            Round::Flop => Some(Round::Turn),
            Round::Turn => Some(Round::River),
            Round::River | Round::War => None,
        }
    }

    /// Label shown while the round is dealt or waiting to be dealt
    pub fn label(&self) -> &'static str {
        match self {
            Round::War => "UUar",
            Round::HoleCards => "deal",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "ri",
        }
    }
}
