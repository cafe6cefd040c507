//! Field placement, ageing and destruction

use crate::core::{CardId, CardInstance, CardRegistry, PlayerId};
use crate::game::{EnergySystem, Match};
use crate::journal::MatchEvent;
use crate::{DuelError, Result};

pub struct FieldManager;

impl FieldManager {
    /// Check that a hand card could be placed right now; returns its cost
    ///
    /// Checks run in order: card in hand, free field slot, placement limit,
    /// energy.
    pub fn check_placement(state: &Match, registry: &CardRegistry, player: PlayerId, card: CardId) -> Result<u8> {
        let p = state.player(player);
        if !p.hand.contains(card) {
            return Err(DuelError::CardNotInHand(card));
        }
        if p.field.len() >= state.config.field_limit {
            return Err(DuelError::FieldFull);
        }
        if let Some(limit) = state.config.max_plays_per_turn {
            if p.plays_this_turn >= u32::from(limit) {
                return Err(DuelError::PlacementLimitReached { limit });
            }
        }

        let definition = state.definition_of(card).ok_or(DuelError::CardNotInHand(card))?;
        let cost = registry.get(definition)?.cost;
        if p.energy < cost {
            return Err(DuelError::InsufficientEnergy {
                required: cost,
                available: p.energy,
            });
        }
        Ok(cost)
    }

    /// Move a card from hand to field, paying its cost
    pub fn place_card(
        state: &mut Match,
        registry: &CardRegistry,
        player: PlayerId,
        card: CardId,
    ) -> Result<Vec<MatchEvent>> {
        let cost = Self::check_placement(state, registry, player, card)?;
        let definition_id = state.definition_of(card).ok_or(DuelError::CardNotInHand(card))?;
        let definition = registry.get(definition_id)?;

        let p = state.player_mut(player);
        EnergySystem::spend(p, cost)?;
        p.hand.remove(card);
        p.field.push(CardInstance::from_definition(card, player, definition));
        p.plays_this_turn = p.plays_this_turn.saturating_add(1);

        Ok(vec![MatchEvent::CardPlayed {
            player,
            card,
            definition: definition_id,
            cost,
        }])
    }

    /// Destroy a card at 0 DEF: off the field and into its owner's graveyard
    pub fn remove_destroyed(state: &mut Match, owner: PlayerId, card: CardId, by: Option<CardId>) -> Option<MatchEvent> {
        let p = state.player_mut(owner);
        let pos = p.field.iter().position(|c| c.id == card)?;
        let mut removed = p.field.remove(pos);
        // Marked for the record only; the graveyard keeps just the id
        removed.is_destroyed = true;
        p.graveyard.add(removed.id);
        Some(MatchEvent::CardDestroyed { card, owner, by })
    }

    /// Reset DEF to base for the player's surviving cards
    pub fn restore_defense(state: &mut Match, player: PlayerId) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        for card in state.player_mut(player).field.iter_mut() {
            if card.current_def != card.base_def {
                card.restore_defense();
                events.push(MatchEvent::DefenseRestored {
                    card: card.id,
                    def: card.current_def,
                });
            }
        }
        events
    }

    /// Every surviving field card on both sides ages by one turn
    pub fn age_cards(state: &mut Match) {
        for player in state.players.iter_mut() {
            for card in player.field.iter_mut() {
                card.turns_on_field += 1;
            }
        }
    }

    /// Clear per-turn action flags and placement counters
    pub fn reset_turn_flags(state: &mut Match) {
        for player in state.players.iter_mut() {
            player.plays_this_turn = 0;
            for card in player.field.iter_mut() {
                card.has_acted = false;
            }
        }
    }
}
