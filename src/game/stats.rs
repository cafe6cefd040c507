//! Per-card and per-player statistics folded from a match journal

use crate::core::{CardId, DefinitionId, PlayerId};
use crate::journal::MatchEvent;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics for one card definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub times_played: u32,
    pub damage_to_cards: u64,
    pub damage_to_players: u64,
    pub kills: u32,
    pub ultimates_used: u32,
    /// Copies of this card destroyed
    pub times_destroyed: u32,
}

impl CardStats {
    pub fn total_damage(&self) -> u64 {
        self.damage_to_cards + self.damage_to_players
    }

    pub fn merge(&mut self, other: &CardStats) {
        self.times_played += other.times_played;
        self.damage_to_cards += other.damage_to_cards;
        self.damage_to_players += other.damage_to_players;
        self.kills += other.kills;
        self.ultimates_used += other.ultimates_used;
        self.times_destroyed += other.times_destroyed;
    }
}

/// Totals for one seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub cards_played: u32,
    pub energy_spent: u32,
    pub damage_dealt: u64,
    pub life_lost: u64,
    pub cards_lost: u32,
}

/// Statistics for a whole match (or many merged matches)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Keyed by definition; BTreeMap keeps reports in a stable order
    pub cards: BTreeMap<DefinitionId, CardStats>,
    pub players: [PlayerTotals; 2],
}

impl MatchStats {
    /// Fold a journal into statistics
    ///
    /// Only played cards can deal damage, so `CardPlayed` events are enough to
    /// map card ids back to their definitions and owners.
    pub fn from_events(events: &[MatchEvent]) -> Self {
        let mut stats = MatchStats::default();
        let mut played: FxHashMap<CardId, (DefinitionId, PlayerId)> = FxHashMap::default();

        for event in events {
            match event {
                MatchEvent::CardPlayed {
                    player,
                    card,
                    definition,
                    cost,
                } => {
                    played.insert(*card, (*definition, *player));
                    stats.cards.entry(*definition).or_default().times_played += 1;
                    let totals = &mut stats.players[player.index()];
                    totals.cards_played += 1;
                    totals.energy_spent += u32::from(*cost);
                }
                MatchEvent::CardDamaged {
                    source: Some(source),
                    amount,
                    ..
                } => {
                    if let Some(&(definition, owner)) = played.get(source) {
                        stats.cards.entry(definition).or_default().damage_to_cards += u64::from(*amount);
                        stats.players[owner.index()].damage_dealt += u64::from(*amount);
                    }
                }
                MatchEvent::LifeLost {
                    player,
                    source,
                    amount,
                    ..
                } => {
                    stats.players[player.index()].life_lost += u64::from(*amount);
                    if let Some(&(definition, owner)) = source.as_ref().and_then(|s| played.get(s)) {
                        stats.cards.entry(definition).or_default().damage_to_players += u64::from(*amount);
                        stats.players[owner.index()].damage_dealt += u64::from(*amount);
                    }
                }
                MatchEvent::CardDestroyed { card, owner, by } => {
                    stats.players[owner.index()].cards_lost += 1;
                    if let Some(&(definition, _)) = played.get(card) {
                        stats.cards.entry(definition).or_default().times_destroyed += 1;
                    }
                    if let Some(&(definition, _)) = by.as_ref().and_then(|b| played.get(b)) {
                        stats.cards.entry(definition).or_default().kills += 1;
                    }
                }
                MatchEvent::UltimateActivated { card, .. } => {
                    if let Some(&(definition, _)) = played.get(card) {
                        stats.cards.entry(definition).or_default().ultimates_used += 1;
                    }
                }
                _ => {}
            }
        }
        stats
    }

    pub fn merge(&mut self, other: &MatchStats) {
        for (definition, card) in &other.cards {
            self.cards.entry(*definition).or_default().merge(card);
        }
        for (mine, theirs) in self.players.iter_mut().zip(other.players.iter()) {
            mine.cards_played += theirs.cards_played;
            mine.energy_spent += theirs.energy_spent;
            mine.damage_dealt += theirs.damage_dealt;
            mine.life_lost += theirs.life_lost;
            mine.cards_lost += theirs.cards_lost;
        }
    }

    pub fn card(&self, definition: DefinitionId) -> CardStats {
        self.cards.get(&definition).copied().unwrap_or_default()
    }

    /// Definitions ordered by total damage dealt, highest first
    pub fn top_damage_dealers(&self) -> Vec<(DefinitionId, u64)> {
        let mut ranked: Vec<_> = self.cards.iter().map(|(id, s)| (*id, s.total_damage())).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}
