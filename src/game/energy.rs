//! Player and card energy bookkeeping

use crate::core::{CardInstance, PlayerId, PlayerState};
use crate::game::Match;
use crate::journal::MatchEvent;
use crate::{DuelError, Result};

pub struct EnergySystem;

impl EnergySystem {
    /// +1 player energy, capped at the configured maximum
    ///
    /// Returns an event only when energy actually rose.
    pub fn regenerate(state: &mut Match, player: PlayerId) -> Option<MatchEvent> {
        let max = state.config.max_energy;
        let p = state.player_mut(player);
        let before = p.energy;
        p.energy = p.energy.saturating_add(1).min(max);
        let gained = p.energy.saturating_sub(before);
        (gained > 0).then_some(MatchEvent::EnergyGained {
            player,
            amount: gained,
            total: p.energy,
        })
    }

    /// +1 card energy for every card on the player's field
    pub fn accrue_card_energy(state: &mut Match, player: PlayerId) -> Vec<MatchEvent> {
        state
            .player_mut(player)
            .field
            .iter_mut()
            .map(|card| {
                card.card_energy += 1;
                MatchEvent::CardEnergyGained {
                    card: card.id,
                    total: card.card_energy,
                }
            })
            .collect()
    }

    pub fn spend(player: &mut PlayerState, cost: u8) -> Result<()> {
        if player.energy < cost {
            return Err(DuelError::InsufficientEnergy {
                required: cost,
                available: player.energy,
            });
        }
        player.energy -= cost;
        Ok(())
    }

    pub fn spend_card_energy(card: &mut CardInstance, amount: u32) -> Result<()> {
        if card.card_energy < amount {
            return Err(DuelError::InsufficientCardEnergy {
                card: card.id,
                required: amount,
                available: card.card_energy,
            });
        }
        card.card_energy -= amount;
        Ok(())
    }
}
