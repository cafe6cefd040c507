//! Match journal: the auditable record of everything that happened
//!
//! Every accepted action produces a list of `MatchEvent`s. The controller
//! appends them to an `EventLog`, which remembers where each turn began so a
//! single turn can be sliced back out for replays and statistics.

use crate::core::{CardId, DefinitionId, PlayerId, Target};
use crate::game::{EndReason, MatchResult, Phase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic state changes, in the order they were applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A player's turn began
    TurnStarted { turn: u32, player: PlayerId },

    /// Forced or opening draw
    CardDrawn { player: PlayerId, card: CardId },

    /// A draw was required from an empty deck
    DeckOut { player: PlayerId },

    /// Player energy regenerated (after capping)
    EnergyGained { player: PlayerId, amount: u8, total: u8 },

    CardEnergyGained { card: CardId, total: u32 },

    /// Card defense reset to base at its owner's turn start
    DefenseRestored { card: CardId, def: u32 },

    PhaseChanged { from: Phase, to: Phase },

    /// A card moved from hand to field, paying `cost` energy
    CardPlayed {
        player: PlayerId,
        card: CardId,
        definition: DefinitionId,
        cost: u8,
    },

    AttackDeclared { attacker: CardId, target: Target },

    /// A field card lost defense
    CardDamaged {
        source: Option<CardId>,
        card: CardId,
        amount: u32,
        remaining: u32,
    },

    /// A field card reached 0 defense and moved to the graveyard
    CardDestroyed {
        card: CardId,
        owner: PlayerId,
        by: Option<CardId>,
    },

    LifeLost {
        player: PlayerId,
        source: Option<CardId>,
        amount: u32,
        remaining: u32,
    },

    UltimateActivated {
        card: CardId,
        name: String,
        target: Option<Target>,
    },

    MatchEnded { result: MatchResult, reason: EndReason },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::TurnStarted { turn, player } => write!(f, "Turn {turn} begins for player {player}"),
            MatchEvent::CardDrawn { player, card } => write!(f, "Player {player} draws card #{card}"),
            MatchEvent::DeckOut { player } => write!(f, "Player {player} cannot draw: deck is empty"),
            MatchEvent::EnergyGained { player, amount, total } => {
                write!(f, "Player {player} gains {amount} energy ({total})")
            }
            MatchEvent::CardEnergyGained { card, total } => write!(f, "Card #{card} card energy now {total}"),
            MatchEvent::DefenseRestored { card, def } => write!(f, "Card #{card} DEF restored to {def}"),
            MatchEvent::PhaseChanged { from, to } => write!(f, "{from:?} -> {to:?}"),
            MatchEvent::CardPlayed { player, card, cost, .. } => {
                write!(f, "Player {player} plays card #{card} for {cost} energy")
            }
            MatchEvent::AttackDeclared { attacker, target } => write!(f, "Card #{attacker} attacks {target}"),
            MatchEvent::CardDamaged { card, amount, remaining, .. } => {
                write!(f, "Card #{card} takes {amount} damage ({remaining} DEF left)")
            }
            MatchEvent::CardDestroyed { card, owner, .. } => {
                write!(f, "Card #{card} (player {owner}) is destroyed")
            }
            MatchEvent::LifeLost { player, amount, remaining, .. } => {
                write!(f, "Player {player} loses {amount} life ({remaining} left)")
            }
            MatchEvent::UltimateActivated { card, name, .. } => write!(f, "Card #{card} unleashes {name}"),
            MatchEvent::MatchEnded { result, reason } => write!(f, "Match over: {result} ({reason})"),
        }
    }
}

/// Append-only log of match events with per-turn checkpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    /// Events in application order
    events: Vec<MatchEvent>,

    /// (turn number, index of the turn's first event)
    turn_starts: Vec<(u32, usize)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events, marking a checkpoint at every turn start
    pub fn extend(&mut self, events: impl IntoIterator<Item = MatchEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn record(&mut self, event: MatchEvent) {
        if let MatchEvent::TurnStarted { turn, .. } = event {
            self.turn_starts.push((turn, self.events.len()));
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Events belonging to one turn, from its `TurnStarted` up to the next
    pub fn turn_events(&self, turn: u32) -> &[MatchEvent] {
        let Some(pos) = self.turn_starts.iter().position(|&(t, _)| t == turn) else {
            return &[];
        };
        let start = self.turn_starts[pos].1;
        let end = self
            .turn_starts
            .get(pos + 1)
            .map(|&(_, idx)| idx)
            .unwrap_or(self.events.len());
        &self.events[start..end]
    }

    /// Number of turns that have started
    pub fn turns_recorded(&self) -> usize {
        self.turn_starts.len()
    }

    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.turn_starts.clear();
    }
}
