//! Card zones (Deck, Hand, Graveyard)
//!
//! The field is not a zone of ids: cards on the field carry live battle state
//! and are held as `CardInstance`s on the player.

use crate::core::{CardId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Different zones where card ids can sit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Graveyard,
}

/// An ordered zone of card ids
///
/// For the deck the front is the next card drawn. Hand and graveyard keep
/// insertion order so iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    /// Owner of this zone (each player has their own zones)
    pub owner: PlayerId,

    pub cards: VecDeque<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerId) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: VecDeque::new(),
        }
    }

    /// Build a zone from an ordered sequence, first element at the front
    pub fn from_ordered(zone_type: Zone, owner: PlayerId, ids: impl IntoIterator<Item = CardId>) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: ids.into_iter().collect(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push_back(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        // Order-preserving removal; hand order feeds legal-action enumeration
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from the front (for Deck)
    pub fn draw_front(&mut self) -> Option<CardId> {
        self.cards.pop_front()
    }

    /// Look at the next card without removing it
    pub fn peek_front(&self) -> Option<CardId> {
        self.cards.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_zone() {
        let mut zone = CardZone::new(Zone::Hand, PlayerId::A);

        assert_eq!(zone.len(), 0);
        assert!(zone.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);

        zone.add(card1);
        zone.add(card2);

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(card1));
        assert!(zone.remove(card1));
        assert!(!zone.remove(card1));
        assert_eq!(zone.iter().collect::<Vec<_>>(), vec![card2]);
    }

    #[test]
    fn test_deck_draws_from_front() {
        let ids = [3, 1, 2].map(CardId::new);
        let mut deck = CardZone::from_ordered(Zone::Deck, PlayerId::B, ids);

        assert_eq!(deck.peek_front(), Some(CardId::new(3)));
        assert_eq!(deck.draw_front(), Some(CardId::new(3)));
        assert_eq!(deck.draw_front(), Some(CardId::new(1)));
        assert_eq!(deck.draw_front(), Some(CardId::new(2)));
        assert_eq!(deck.draw_front(), None);
        assert!(deck.is_empty());
    }
}
