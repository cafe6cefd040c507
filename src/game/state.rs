//! The match aggregate

use crate::core::{
    CardId, CardInstance, CardRegistry, DefinitionId, EntityStore, PlayerId, PlayerName, PlayerState,
};
use crate::game::{EndReason, MatchConfig, MatchResult, Phase, TurnStructure};
use crate::zones::{CardZone, Zone};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Where a physical card came from: assigned once at deck load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub definition: DefinitionId,
    pub owner: PlayerId,
}

/// Complete state of one match
///
/// Plain owned data: cloning it gives an independent working copy, which is
/// how actions are applied atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Seat A at index 0, seat B at index 1
    pub players: [PlayerState; 2],

    pub turn: TurnStructure,

    pub result: MatchResult,

    pub end_reason: Option<EndReason>,

    /// Player who was required to draw from an empty deck
    pub deck_out: Option<PlayerId>,

    pub config: MatchConfig,

    /// Every physical card in the match, by id
    pub cards: EntityStore<CardRecord>,
}

impl Match {
    /// Create an empty match; decks are loaded separately
    pub fn new(config: MatchConfig, name_a: impl Into<PlayerName>, name_b: impl Into<PlayerName>) -> Self {
        let player_a = PlayerState::new(PlayerId::A, name_a, config.starting_life, config.starting_energy);
        let player_b = PlayerState::new(PlayerId::B, name_b, config.starting_life, config.starting_energy);

        Match {
            players: [player_a, player_b],
            turn: TurnStructure::new(PlayerId::A),
            result: MatchResult::Pending,
            end_reason: None,
            deck_out: None,
            config,
            cards: EntityStore::new(),
        }
    }

    /// Assign card ids to an ordered deck and make it the player's deck
    ///
    /// The first definition becomes the first card drawn.
    pub fn load_deck(&mut self, player: PlayerId, deck: &[DefinitionId], registry: &CardRegistry) -> Result<()> {
        let mut ids = Vec::with_capacity(deck.len());
        for &definition in deck {
            registry.get(definition)?;
            let id = self.cards.next_id();
            self.cards.insert(
                id,
                CardRecord {
                    id,
                    definition,
                    owner: player,
                },
            );
            ids.push(id);
        }
        self.player_mut(player).deck = CardZone::from_ordered(Zone::Deck, player, ids);
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number
    }

    pub fn is_over(&self) -> bool {
        self.result.is_terminal()
    }

    pub fn definition_of(&self, id: CardId) -> Option<DefinitionId> {
        self.cards.get(id).map(|r| r.definition)
    }

    /// Locate a card on either field
    pub fn find_field_card(&self, id: CardId) -> Option<&CardInstance> {
        self.players.iter().find_map(|p| p.field_card(id))
    }
}
