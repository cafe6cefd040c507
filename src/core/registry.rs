//! Card-definition registry and ultimate-move hooks
//!
//! The registry is the engine's view of the external card catalogue: it maps
//! definition ids to stats and to the effect that runs when a card's
//! ultimate move is activated.

use crate::core::{CardDefinition, CardId, CardInstance, DefinitionId, PlayerId, Target, UltimateSpec};
use crate::game::{CombatResolver, Match};
use crate::journal::MatchEvent;
use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Behaviour of an ultimate move, keyed by card definition
///
/// Implementations receive an [`UltimateContext`] after the activation has
/// been validated and the card energy has been paid. They report what they
/// changed as events. Returning an error rejects the whole activation.
pub trait UltimateEffect: fmt::Debug + Send + Sync {
    /// Display name of the move
    fn name(&self) -> &str;

    fn resolve(&self, ctx: &mut UltimateContext<'_>) -> Result<Vec<MatchEvent>>;
}

/// Mutable access to the match for an ultimate effect
pub struct UltimateContext<'a> {
    pub state: &'a mut Match,
    /// Card whose ultimate is being resolved
    pub source: CardId,
    pub controller: PlayerId,
    pub target: Option<Target>,
}

impl<'a> UltimateContext<'a> {
    pub fn new(state: &'a mut Match, source: CardId, controller: PlayerId, target: Option<Target>) -> Self {
        UltimateContext {
            state,
            source,
            controller,
            target,
        }
    }

    pub fn opponent(&self) -> PlayerId {
        self.controller.opponent()
    }

    pub fn source_card(&self) -> Option<&CardInstance> {
        self.state.player(self.controller).field_card(self.source)
    }

    /// Damage an opposing field card through the combat damage path
    pub fn damage_card(&mut self, card: CardId, amount: u32) -> Result<Vec<MatchEvent>> {
        CombatResolver::damage_opposing_card(self.state, self.source, self.controller, card, amount)
    }

    /// Damage the opposing player's life points
    pub fn damage_opponent(&mut self, amount: u32) -> Vec<MatchEvent> {
        let opponent = self.opponent();
        CombatResolver::damage_player(self.state, Some(self.source), opponent, amount)
    }

    /// Ids of every card on the opposing field, in field order
    pub fn opposing_field(&self) -> Vec<CardId> {
        self.state.player(self.opponent()).field_ids().collect()
    }

    fn single_target(&mut self, amount: u32) -> Result<Vec<MatchEvent>> {
        match self.target {
            Some(Target::Card(card)) => self.damage_card(card, amount),
            Some(Target::Direct) | None => Ok(self.damage_opponent(amount)),
        }
    }
}

impl UltimateEffect for UltimateSpec {
    fn name(&self) -> &str {
        UltimateSpec::name(self)
    }

    fn resolve(&self, ctx: &mut UltimateContext<'_>) -> Result<Vec<MatchEvent>> {
        match self {
            UltimateSpec::Strike { multiplier_pct, .. } => {
                let atk = ctx.source_card().map(|c| c.atk).unwrap_or(0);
                let amount = (u64::from(atk) * u64::from(*multiplier_pct) / 100).min(u64::from(u32::MAX)) as u32;
                ctx.single_target(amount)
            }
            UltimateSpec::Blast { amount, .. } => ctx.single_target(*amount),
            UltimateSpec::Sweep { amount, .. } => {
                let mut events = Vec::new();
                for card in ctx.opposing_field() {
                    events.extend(ctx.damage_card(card, *amount)?);
                }
                Ok(events)
            }
        }
    }
}

/// Registry of card definitions available to a match
#[derive(Clone, Default)]
pub struct CardRegistry {
    definitions: FxHashMap<DefinitionId, CardDefinition>,
    /// Lowercased display name -> id, for deck lists
    names: FxHashMap<String, DefinitionId>,
    hooks: FxHashMap<DefinitionId, Arc<dyn UltimateEffect>>,
}

impl fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRegistry")
            .field("definitions", &self.definitions.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; duplicate ids or display names are rejected
    pub fn insert(&mut self, definition: CardDefinition) -> Result<()> {
        if self.definitions.contains_key(&definition.id) {
            return Err(DuelError::InvalidCardFormat(format!(
                "duplicate card id {}",
                definition.id.as_u32()
            )));
        }
        let key = definition.display_name().to_lowercase();
        if self.names.contains_key(&key) {
            return Err(DuelError::InvalidCardFormat(format!(
                "duplicate card name '{}'",
                definition.display_name()
            )));
        }
        self.names.insert(key, definition.id);
        self.definitions.insert(definition.id, definition);
        Ok(())
    }

    /// Attach a custom ultimate hook, overriding the card's `UltimateSpec`
    pub fn register_ultimate(&mut self, id: DefinitionId, effect: Arc<dyn UltimateEffect>) -> Result<()> {
        if !self.definitions.contains_key(&id) {
            return Err(DuelError::UnknownDefinition(id));
        }
        self.hooks.insert(id, effect);
        Ok(())
    }

    pub fn get(&self, id: DefinitionId) -> Result<&CardDefinition> {
        self.definitions.get(&id).ok_or(DuelError::UnknownDefinition(id))
    }

    pub fn contains(&self, id: DefinitionId) -> bool {
        self.definitions.contains_key(&id)
    }

    /// Look up a card by display name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.names
            .get(&name.trim().to_lowercase())
            .and_then(|id| self.definitions.get(id))
    }

    /// The ultimate effect for a definition, custom hook first
    pub fn ultimate_for(&self, id: DefinitionId) -> Option<&dyn UltimateEffect> {
        if let Some(hook) = self.hooks.get(&id) {
            return Some(hook.as_ref());
        }
        self.definitions
            .get(&id)
            .and_then(|def| def.ultimate.as_ref())
            .map(|spec| spec as &dyn UltimateEffect)
    }

    /// All definitions sorted by id
    pub fn definitions(&self) -> Vec<&CardDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.id);
        defs
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
