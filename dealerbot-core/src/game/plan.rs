//! Deal plans
//!
//! A plan is generated lazily from a few layout numbers, so even a full
//! War deck needs no buffer. Every plan starts by homing the head so
//! angles are measured from the hall sensor, and ends back at home.

use super::Round;
use crate::config::MachineConfig;

/// Primitive dealer action
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DealAction {
    /// Return the head to the hall sensor and zero the angle
    Home,
    /// Rotate the head by this many degrees (negative = counter-clockwise)
    Rotate(f32),
    /// Flip one card
    Deal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Layout {
    /// Alternate between two piles
    TwoPiles { pairs: u16, first_deg: f32, spacing_deg: f32 },
    /// One card per player per lap, players spread over a half circle
    AroundTable { players: u8, laps: u8, step_deg: f32 },
    /// Burn card, then community cards in a row
    CommunityRow { cards: u8, spacing_deg: f32 },
    /// Burn card, then a single card at a fixed angle
    Single { angle_deg: f32 },
}

/// Lazily generated sequence of [`DealAction`]s for one round
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DealPlan {
    layout: Layout,
    index: usize,
}

impl DealPlan {
    /// Build the plan for `round`
    ///
    /// `players` only matters for the hole-card round and is clamped to
    /// the configured range.
    pub fn for_round(round: Round, players: u8, config: &MachineConfig) -> Self {
        let poker = &config.poker;
        let layout = match round {
            Round::War => Layout::TwoPiles {
                pairs: config.war.cards / 2,
                first_deg: config.war.first_pile_deg,
                spacing_deg: config.war.pile_spacing_deg,
            },
            Round::HoleCards => {
                let max = poker.max_players.max(poker.min_players);
                let players = players.clamp(poker.min_players, max);
                Layout::AroundTable {
                    players,
                    laps: poker.hole_cards,
                    step_deg: 180.0 / (players as f32 + 1.0),
                }
            }
            Round::Flop => Layout::CommunityRow {
                cards: poker.flop_cards,
                spacing_deg: poker.flop_spacing_deg,
            },
            Round::Turn => Layout::Single {
                angle_deg: poker.turn_deg,
            },
            Round::River => Layout::Single {
                angle_deg: poker.river_deg,
            },
        };
        Self { layout, index: 0 }
    }

    /// Total number of actions in the plan
    pub fn total(&self) -> usize {
        match self.layout {
            // Home, first pile, 4 per pair, home
            Layout::TwoPiles { pairs, .. } => 3 + 4 * pairs as usize,
            // Home, then per lap: rotate+deal per player, home
            Layout::AroundTable { players, laps, .. } => {
                1 + laps as usize * (2 * players as usize + 1)
            }
            // Home, burn, rotate+deal per card, home
            Layout::CommunityRow { cards, .. } => 3 + 2 * cards as usize,
            // Home, burn, rotate, deal, home
            Layout::Single { .. } => 5,
        }
    }

    /// Number of cards the plan deals
    pub fn cards(&self) -> usize {
        match self.layout {
            Layout::TwoPiles { pairs, .. } => 2 * pairs as usize,
            Layout::AroundTable { players, laps, .. } => players as usize * laps as usize,
            Layout::CommunityRow { cards, .. } => 1 + cards as usize,
            Layout::Single { .. } => 2,
        }
    }

    /// Action at position `index`, or `None` past the end
    pub fn action_at(&self, index: usize) -> Option<DealAction> {
        let total = self.total();
        if index >= total {
            return None;
        }
        if index == 0 || index == total - 1 {
            return Some(DealAction::Home);
        }

        let action = match self.layout {
            Layout::TwoPiles {
                first_deg,
                spacing_deg,
                ..
            } => {
                if index == 1 {
                    DealAction::Rotate(first_deg)
                } else {
                    match (index - 2) % 4 {
                        0 | 2 => DealAction::Deal,
                        1 => DealAction::Rotate(spacing_deg),
                        _ => DealAction::Rotate(-spacing_deg),
                    }
                }
            }
            Layout::AroundTable {
                players, step_deg, ..
            } => {
                let lap_len = 2 * players as usize + 1;
                let offset = (index - 1) % lap_len;
                if offset == lap_len - 1 {
                    DealAction::Home
                } else if offset % 2 == 0 {
                    DealAction::Rotate(step_deg)
                } else {
                    DealAction::Deal
                }
            }
            // Burn at 1, then rotate on even and deal on odd indices
            Layout::CommunityRow { spacing_deg, .. } => {
                if index % 2 == 0 {
                    DealAction::Rotate(spacing_deg)
                } else {
                    DealAction::Deal
                }
            }
            Layout::Single { angle_deg } => match index {
                2 => DealAction::Rotate(angle_deg),
                _ => DealAction::Deal,
            },
        };
        Some(action)
    }
}

impl Iterator for DealPlan {
    type Item = DealAction;

    fn next(&mut self) -> Option<Self::Item> {
        let action = self.action_at(self.index)?;
        self.index += 1;
        Some(action)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DealPlan {}
