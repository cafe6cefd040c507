//! Shared helpers for integration tests

#![allow(dead_code)]

use monster_duel::core::{CardDefinition, CardId, CardRegistry, DefinitionId, PlayerId, UltimateSpec};
use monster_duel::game::{Action, MatchConfig, MatchController, Phase};
use std::sync::Arc;

pub const DRAKE: DefinitionId = DefinitionId::new(1);
pub const GOLEM: DefinitionId = DefinitionId::new(2);
pub const IMP: DefinitionId = DefinitionId::new(3);
pub const WISP: DefinitionId = DefinitionId::new(4);

pub fn registry() -> Arc<CardRegistry> {
    let mut registry = CardRegistry::new();
    let cards = [
        CardDefinition::new(DRAKE, "Ember Drake", 500, 400, 3).with_ultimate(UltimateSpec::Blast {
            name: "Cinder Burst".into(),
            amount: 300,
        }),
        CardDefinition::new(GOLEM, "Stone Golem", 200, 800, 2),
        CardDefinition::new(IMP, "Spark Imp", 300, 100, 1).with_ultimate(UltimateSpec::Strike {
            name: "Double Jolt".into(),
            multiplier_pct: 200,
        }),
        CardDefinition::new(WISP, "Marsh Wisp", 100, 300, 0),
    ];
    for card in cards {
        registry.insert(card).unwrap();
    }
    Arc::new(registry)
}

pub fn deck(definition: DefinitionId, count: usize) -> Vec<DefinitionId> {
    vec![definition; count]
}

pub fn new_match(deck_a: &[DefinitionId], deck_b: &[DefinitionId]) -> MatchController {
    MatchController::new_match(registry(), deck_a, deck_b, MatchConfig::default()).unwrap()
}

/// Submit `EndPhase` until `phase` is reached
pub fn advance_to(ctrl: &mut MatchController, phase: Phase) {
    while ctrl.state().phase() != phase {
        ctrl.submit_action(Action::EndPhase).unwrap();
    }
}

/// Finish the current turn; stops early if the match ends
pub fn end_turn(ctrl: &mut MatchController) {
    let turn = ctrl.state().turn_number();
    while !ctrl.is_over() && ctrl.state().turn_number() == turn {
        ctrl.submit_action(Action::EndPhase).unwrap();
    }
}

/// First card in `player`'s hand with the given definition
pub fn hand_card(ctrl: &MatchController, player: PlayerId, definition: DefinitionId) -> CardId {
    let state = ctrl.state();
    state
        .player(player)
        .hand
        .iter()
        .find(|&card| state.definition_of(card) == Some(definition))
        .unwrap()
}
