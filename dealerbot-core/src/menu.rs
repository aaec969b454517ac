//! Knob selection menus
//!
//! The potentiometer is split into equal ranges, one per menu entry.
//! Turning the knob fully counter-clockwise selects the first entry.

use crate::config::{PokerConfig, PotConfig};
use crate::game::Game;

/// Games in knob order
pub const GAMES: [Game; 2] = [Game::Poker, Game::War];

/// Maps raw knob readings onto equal-width buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeTable {
    adc_max: u16,
    count: u16,
}

impl RangeTable {
    /// Split `0..=adc_max` into `count` equal ranges
    pub fn evenly(adc_max: u16, count: u16) -> Self {
        Self {
            adc_max,
            count: count.max(1),
        }
    }

    /// Bucket index for a raw reading, readings past `adc_max` clamp
    pub fn index_for(&self, raw: u16) -> u16 {
        let raw = raw.min(self.adc_max) as u32;
        let span = self.adc_max as u32 + 1;
        (raw * self.count as u32 / span) as u16
    }
}

/// Game highlighted by a knob reading
pub fn game_for(raw: u16, pot: &PotConfig) -> Game {
    let table = RangeTable::evenly(pot.adc_max, GAMES.len() as u16);
    GAMES[table.index_for(raw) as usize]
}

/// Player count highlighted by a knob reading
pub fn players_for(raw: u16, pot: &PotConfig, poker: &PokerConfig) -> u8 {
    let table = RangeTable::evenly(pot.adc_max, poker.player_choices() as u16);
    poker.min_players + table.index_for(raw) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_ranges() {
        let pot = PotConfig::default();
        assert_eq!(game_for(0, &pot), Game::Poker);
        assert_eq!(game_for(2047, &pot), Game::Poker);
        assert_eq!(game_for(2048, &pot), Game::War);
        assert_eq!(game_for(4095, &pot), Game::War);
    }

    #[test]
    fn test_player_ranges() {
        let pot = PotConfig::default();
        let poker = PokerConfig::default();
        assert_eq!(players_for(0, &pot, &poker), 2);
        assert_eq!(players_for(1023, &pot, &poker), 2);
        assert_eq!(players_for(1024, &pot, &poker), 3);
        assert_eq!(players_for(2047, &pot, &poker), 3);
        assert_eq!(players_for(2048, &pot, &poker), 4);
        assert_eq!(players_for(3071, &pot, &poker), 4);
        assert_eq!(players_for(3072, &pot, &poker), 5);
        assert_eq!(players_for(4095, &pot, &poker), 5);
    }

    #[test]
    fn test_reading_above_max_clamps() {
        let table = RangeTable::evenly(1023, 4);
        assert_eq!(table.index_for(1023), 3);
        assert_eq!(table.index_for(u16::MAX), 3);
    }

    #[test]
    fn test_single_bucket() {
        let table = RangeTable::evenly(4095, 0);
        assert_eq!(table.index_for(0), 0);
        assert_eq!(table.index_for(4095), 0);
    }
}
