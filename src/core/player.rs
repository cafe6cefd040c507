//! Player battle state

use crate::core::{CardId, CardInstance, PlayerId, PlayerName};
use crate::zones::{CardZone, Zone};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Field storage; the default field limit fits inline
pub type Field = SmallVec<[CardInstance; 5]>;

/// A player's live battle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,

    pub name: PlayerName,

    /// Life points, floored at 0
    pub life_points: u32,

    /// Player energy used to place cards
    pub energy: u8,

    /// Remaining deck, front = next draw
    pub deck: CardZone,

    pub hand: CardZone,

    /// Destroyed cards, in order of destruction
    pub graveyard: CardZone,

    /// Cards in play, in placement order
    pub field: Field,

    /// Cards placed during the current turn
    pub plays_this_turn: u32,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, life_points: u32, energy: u8) -> Self {
        PlayerState {
            id,
            name: name.into(),
            life_points,
            energy,
            deck: CardZone::new(Zone::Deck, id),
            hand: CardZone::new(Zone::Hand, id),
            graveyard: CardZone::new(Zone::Graveyard, id),
            field: SmallVec::new(),
            plays_this_turn: 0,
        }
    }

    /// Lose life, flooring at 0. Returns the life actually lost.
    pub fn lose_life(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.life_points);
        self.life_points -= lost;
        lost
    }

    pub fn is_defeated(&self) -> bool {
        self.life_points == 0
    }

    pub fn field_card(&self, id: CardId) -> Option<&CardInstance> {
        self.field.iter().find(|c| c.id == id)
    }

    pub fn field_card_mut(&mut self, id: CardId) -> Option<&mut CardInstance> {
        self.field.iter_mut().find(|c| c.id == id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.field.iter().map(|c| c.id)
    }
}
