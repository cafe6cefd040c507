//! Card definitions and live card instances

use crate::core::{CardId, CardName, DefinitionId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in ultimate move descriptions
///
/// These cover the common shapes of ultimate moves so a card set can be
/// written entirely in JSON. Anything more exotic is registered as a custom
/// hook on the registry instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UltimateSpec {
    /// Deals `ATK * multiplier_pct / 100` to one opposing card or to the
    /// opposing player when no card is targeted
    Strike { name: String, multiplier_pct: u32 },

    /// Deals a flat amount to one opposing card or the opposing player
    Blast { name: String, amount: u32 },

    /// Deals a flat amount to every opposing field card
    Sweep { name: String, amount: u32 },
}

impl UltimateSpec {
    pub fn name(&self) -> &str {
        match self {
            UltimateSpec::Strike { name, .. }
            | UltimateSpec::Blast { name, .. }
            | UltimateSpec::Sweep { name, .. } => name,
        }
    }
}

/// Immutable card definition, shared by every copy of the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: DefinitionId,

    /// Card name (e.g., "Ember Drake")
    pub name: CardName,

    /// Optional variant label distinguishing printings of the same monster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Base attack
    pub atk: u32,

    /// Base defense; doubles as hit points on the field
    pub def: u32,

    /// Player energy required to place the card
    pub cost: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimate: Option<UltimateSpec>,
}

impl CardDefinition {
    pub fn new(id: DefinitionId, name: impl Into<CardName>, atk: u32, def: u32, cost: u8) -> Self {
        CardDefinition {
            id,
            name: name.into(),
            variant: None,
            atk,
            def,
            cost,
            ultimate: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_ultimate(mut self, ultimate: UltimateSpec) -> Self {
        self.ultimate = Some(ultimate);
        self
    }

    /// Name including the variant, e.g. "Ember Drake (Elder)"
    pub fn display_name(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} ({variant})", self.name),
            None => self.name.to_string(),
        }
    }
}

/// A card's live battle state while it sits on a field
///
/// This is a plain data record; all rules that touch it live in `game/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Per-match card id, stable from deck to graveyard
    pub id: CardId,

    pub definition: DefinitionId,

    pub owner: PlayerId,

    /// Attack copied from the definition at placement
    pub atk: u32,

    /// Base defense the card resets to at its owner's turn start
    pub base_def: u32,

    /// Current defense; the card is destroyed when this reaches 0
    pub current_def: u32,

    /// Accumulated card energy spent on ultimate moves
    pub card_energy: u32,

    /// Number of turn starts survived on the field
    pub turns_on_field: u32,

    pub is_destroyed: bool,

    /// Has this card attacked or used its ultimate this turn?
    pub has_acted: bool,
}

impl CardInstance {
    /// Fresh instance for a card entering the field
    pub fn from_definition(id: CardId, owner: PlayerId, definition: &CardDefinition) -> Self {
        CardInstance {
            id,
            definition: definition.id,
            owner,
            atk: definition.atk,
            base_def: definition.def,
            current_def: definition.def,
            card_energy: 0,
            turns_on_field: 0,
            is_destroyed: false,
            has_acted: false,
        }
    }

    /// Summoning sickness: a card must survive one turn start before acting
    pub fn is_ready(&self) -> bool {
        self.turns_on_field >= 1
    }

    /// Apply damage to current defense, flooring at 0
    ///
    /// Returns the amount of defense actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_def);
        self.current_def -= dealt;
        dealt
    }

    pub fn restore_defense(&mut self) {
        if !self.is_destroyed {
            self.current_def = self.base_def;
        }
    }
}

/// What an attack or ultimate is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// An opposing field card
    Card(CardId),
    /// The opposing player's life points
    Direct,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Card(id) => write!(f, "card #{id}"),
            Target::Direct => write!(f, "direct"),
        }
    }
}
