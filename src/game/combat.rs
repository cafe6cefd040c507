//! Attack and ultimate-move resolution
//!
//! All damage, whether from an attack or an ultimate effect, goes through
//! `damage_opposing_card` / `damage_player` so destruction is always
//! synchronous with the damage that caused it.

use crate::core::{CardId, CardInstance, CardRegistry, PlayerId, Target, UltimateContext};
use crate::game::{EnergySystem, FieldManager, Match};
use crate::journal::MatchEvent;
use crate::{DuelError, Result};

pub struct CombatResolver;

impl CombatResolver {
    /// Check that `card` may act (attack or ultimate) for the active player
    fn ready_actor(state: &Match, card: CardId) -> Result<&CardInstance> {
        let actor = state
            .player(state.active_player())
            .field_card(card)
            .ok_or(DuelError::NotOnField(card))?;
        if !actor.is_ready() {
            return Err(DuelError::NotReady(card));
        }
        if actor.has_acted {
            return Err(DuelError::AlreadyActed(card));
        }
        Ok(actor)
    }

    /// Validate an attack without applying it
    pub fn check_attack(state: &Match, attacker: CardId, target: Target) -> Result<()> {
        Self::ready_actor(state, attacker)?;
        let defender = state.player(state.active_player().opponent());
        match target {
            Target::Card(id) => match defender.field_card(id) {
                Some(_) => Ok(()),
                None => Err(DuelError::InvalidTarget(target)),
            },
            Target::Direct => {
                if state.config.direct_attack_requires_empty_field && !defender.field.is_empty() {
                    return Err(DuelError::InvalidTarget(target));
                }
                Ok(())
            }
        }
    }

    /// Resolve an attack by an active-player field card
    pub fn attack(state: &mut Match, attacker: CardId, target: Target) -> Result<Vec<MatchEvent>> {
        Self::check_attack(state, attacker, target)?;
        let controller = state.active_player();

        let card = state
            .player_mut(controller)
            .field_card_mut(attacker)
            .ok_or(DuelError::NotOnField(attacker))?;
        card.has_acted = true;
        let atk = card.atk;

        let mut events = vec![MatchEvent::AttackDeclared { attacker, target }];
        match target {
            Target::Card(defender) => {
                events.extend(Self::damage_opposing_card(state, attacker, controller, defender, atk)?);
            }
            Target::Direct => {
                events.extend(Self::damage_player(state, Some(attacker), controller.opponent(), atk));
            }
        }
        Ok(events)
    }

    /// Deal damage to a card on the opponent's field; destroys it at 0 DEF
    pub fn damage_opposing_card(
        state: &mut Match,
        source: CardId,
        controller: PlayerId,
        target: CardId,
        amount: u32,
    ) -> Result<Vec<MatchEvent>> {
        let owner = controller.opponent();
        let card = state
            .player_mut(owner)
            .field_card_mut(target)
            .ok_or(DuelError::InvalidTarget(Target::Card(target)))?;

        let dealt = card.take_damage(amount);
        let remaining = card.current_def;
        let mut events = vec![MatchEvent::CardDamaged {
            source: Some(source),
            card: target,
            amount: dealt,
            remaining,
        }];

        if remaining == 0 {
            events.extend(FieldManager::remove_destroyed(state, owner, target, Some(source)));
        }
        Ok(events)
    }

    /// Reduce a player's life points, flooring at 0
    pub fn damage_player(state: &mut Match, source: Option<CardId>, player: PlayerId, amount: u32) -> Vec<MatchEvent> {
        let p = state.player_mut(player);
        let lost = p.lose_life(amount);
        vec![MatchEvent::LifeLost {
            player,
            source,
            amount: lost,
            remaining: p.life_points,
        }]
    }

    /// Validate an ultimate activation without applying it
    pub fn check_ultimate(state: &Match, registry: &CardRegistry, card: CardId, target: Option<Target>) -> Result<()> {
        let actor = state
            .player(state.active_player())
            .field_card(card)
            .ok_or(DuelError::NotOnField(card))?;
        if registry.ultimate_for(actor.definition).is_none() {
            return Err(DuelError::NoUltimate(card));
        }
        let cost = state.config.ultimate_cost;
        if actor.card_energy < cost {
            return Err(DuelError::InsufficientCardEnergy {
                card,
                required: cost,
                available: actor.card_energy,
            });
        }
        if !actor.is_ready() {
            return Err(DuelError::NotReady(card));
        }
        if actor.has_acted {
            return Err(DuelError::AlreadyActed(card));
        }
        if let Some(Target::Card(id)) = target {
            let defender = state.player(state.active_player().opponent());
            if defender.field_card(id).is_none() {
                return Err(DuelError::InvalidTarget(Target::Card(id)));
            }
        }
        Ok(())
    }

    /// Pay the card energy and hand off to the card's ultimate effect
    ///
    /// Using an ultimate is the card's one action for the turn.
    pub fn activate_ultimate(
        state: &mut Match,
        registry: &CardRegistry,
        card: CardId,
        target: Option<Target>,
    ) -> Result<Vec<MatchEvent>> {
        Self::check_ultimate(state, registry, card, target)?;
        let controller = state.active_player();
        let cost = state.config.ultimate_cost;

        let actor = state
            .player_mut(controller)
            .field_card_mut(card)
            .ok_or(DuelError::NotOnField(card))?;
        EnergySystem::spend_card_energy(actor, cost)?;
        actor.has_acted = true;
        let definition = actor.definition;

        let effect = registry.ultimate_for(definition).ok_or(DuelError::NoUltimate(card))?;
        let mut events = vec![MatchEvent::UltimateActivated {
            card,
            name: effect.name().to_string(),
            target,
        }];

        let mut ctx = UltimateContext::new(state, card, controller, target);
        events.extend(effect.resolve(&mut ctx)?);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, DefinitionId, UltimateEffect, UltimateSpec};
    use crate::game::state::fixtures::{self, DRAKE, GOLEM, IMP, WISP};
    use crate::game::{MatchConfig, Phase};
    use std::sync::Arc;

    fn battle_match() -> Match {
        let mut state = fixtures::empty_match();
        state.turn.phase = Phase::Battle;
        state
    }

    #[test]
    fn test_direct_attack() {
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);

        let events = CombatResolver::attack(&mut state, imp, Target::Direct).unwrap();
        assert_eq!(state.player(PlayerId::B).life_points, 1700);
        assert_eq!(
            events.last(),
            Some(&MatchEvent::LifeLost {
                player: PlayerId::B,
                source: Some(imp),
                amount: 300,
                remaining: 1700
            })
        );
    }

    #[test]
    fn test_attack_destroys_defender() {
        let mut state = battle_match();
        let drake = fixtures::put_on_field(&mut state, PlayerId::A, DRAKE, true);
        let target = fixtures::put_on_field(&mut state, PlayerId::B, DRAKE, true);
        state.player_mut(PlayerId::B).field[0].current_def = 400;

        let events = CombatResolver::attack(&mut state, drake, Target::Card(target)).unwrap();

        assert!(state.player(PlayerId::B).field.is_empty());
        assert!(state.player(PlayerId::B).graveyard.contains(target));
        let attacker = state.find_field_card(drake).unwrap();
        assert_eq!(attacker.current_def, 400);
        assert!(matches!(
            events.last(),
            Some(MatchEvent::CardDestroyed { by: Some(_), .. })
        ));
    }

    #[test]
    fn test_attack_leaves_survivor_damaged() {
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);
        let golem = fixtures::put_on_field(&mut state, PlayerId::B, GOLEM, true);

        CombatResolver::attack(&mut state, imp, Target::Card(golem)).unwrap();
        assert_eq!(state.find_field_card(golem).unwrap().current_def, 500);
    }

    #[test]
    fn test_summoning_sickness() {
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, false);
        let before = state.clone();

        assert!(matches!(
            CombatResolver::attack(&mut state, imp, Target::Direct),
            Err(DuelError::NotReady(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_one_action_per_turn() {
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);

        CombatResolver::attack(&mut state, imp, Target::Direct).unwrap();
        assert!(matches!(
            CombatResolver::attack(&mut state, imp, Target::Direct),
            Err(DuelError::AlreadyActed(_))
        ));
    }

    #[test]
    fn test_invalid_targets() {
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);
        let own = fixtures::put_on_field(&mut state, PlayerId::A, GOLEM, true);
        let opposing = fixtures::put_on_field(&mut state, PlayerId::B, GOLEM, true);

        assert!(matches!(
            CombatResolver::check_attack(&state, imp, Target::Card(own)),
            Err(DuelError::InvalidTarget(_))
        ));
        assert!(matches!(
            CombatResolver::check_attack(&state, imp, Target::Card(CardId::new(77))),
            Err(DuelError::InvalidTarget(_))
        ));
        assert!(matches!(
            CombatResolver::check_attack(&state, opposing, Target::Direct),
            Err(DuelError::NotOnField(_))
        ));
    }

    #[test]
    fn test_direct_attack_gating() {
        let mut state = battle_match();
        state.config = MatchConfig {
            direct_attack_requires_empty_field: true,
            ..MatchConfig::default()
        };
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);
        fixtures::put_on_field(&mut state, PlayerId::B, WISP, true);

        assert!(matches!(
            CombatResolver::check_attack(&state, imp, Target::Direct),
            Err(DuelError::InvalidTarget(Target::Direct))
        ));
    }

    #[test]
    fn test_life_floors_at_zero() {
        let mut state = battle_match();
        state.player_mut(PlayerId::B).life_points = 100;
        let drake = fixtures::put_on_field(&mut state, PlayerId::A, DRAKE, true);

        CombatResolver::attack(&mut state, drake, Target::Direct).unwrap();
        assert_eq!(state.player(PlayerId::B).life_points, 0);
    }

    #[test]
    fn test_ultimate_requires_card_energy() {
        let registry = fixtures::registry();
        let mut state = battle_match();
        let drake = fixtures::put_on_field(&mut state, PlayerId::A, DRAKE, true);
        state.player_mut(PlayerId::A).field[0].card_energy = 1;

        assert!(matches!(
            CombatResolver::activate_ultimate(&mut state, &registry, drake, None),
            Err(DuelError::InsufficientCardEnergy {
                required: 2,
                available: 1,
                ..
            })
        ));

        state.player_mut(PlayerId::A).field[0].card_energy = 2;
        let events = CombatResolver::activate_ultimate(&mut state, &registry, drake, None).unwrap();
        let card = state.find_field_card(drake).unwrap();
        assert_eq!(card.card_energy, 0);
        assert!(card.has_acted);
        assert_eq!(state.player(PlayerId::B).life_points, 1700);
        assert!(matches!(&events[0], MatchEvent::UltimateActivated { name, .. } if name == "Cinder Burst"));
    }

    #[test]
    fn test_ultimate_requires_readiness() {
        let registry = fixtures::registry();
        let mut state = battle_match();
        let drake = fixtures::put_on_field(&mut state, PlayerId::A, DRAKE, false);
        state.player_mut(PlayerId::A).field[0].card_energy = 2;
        let before = state.clone();

        assert!(matches!(
            CombatResolver::activate_ultimate(&mut state, &registry, drake, None),
            Err(DuelError::NotReady(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_strike_scales_with_atk() {
        let registry = fixtures::registry();
        let mut state = battle_match();
        let imp = fixtures::put_on_field(&mut state, PlayerId::A, IMP, true);
        let golem = fixtures::put_on_field(&mut state, PlayerId::B, GOLEM, true);
        state.player_mut(PlayerId::A).field[0].card_energy = 2;

        CombatResolver::activate_ultimate(&mut state, &registry, imp, Some(Target::Card(golem))).unwrap();
        assert_eq!(state.find_field_card(golem).unwrap().current_def, 200);
    }

    #[test]
    fn test_no_ultimate() {
        let registry = fixtures::registry();
        let mut state = battle_match();
        let golem = fixtures::put_on_field(&mut state, PlayerId::A, GOLEM, true);
        state.player_mut(PlayerId::A).field[0].card_energy = 5;

        assert!(matches!(
            CombatResolver::activate_ultimate(&mut state, &registry, golem, None),
            Err(DuelError::NoUltimate(_))
        ));
    }

    #[test]
    fn test_sweep_hits_every_opposing_card() {
        let mut registry = fixtures::registry();
        let sweeper = DefinitionId::new(50);
        registry
            .insert(
                CardDefinition::new(sweeper, "Tide Serpent", 100, 100, 1).with_ultimate(UltimateSpec::Sweep {
                    name: "Undertow".into(),
                    amount: 300,
                }),
            )
            .unwrap();

        let mut state = battle_match();
        let id = state.cards.next_id();
        let def = registry.get(sweeper).unwrap().clone();
        let mut serpent = CardInstance::from_definition(id, PlayerId::A, &def);
        serpent.turns_on_field = 1;
        serpent.card_energy = 2;
        state.player_mut(PlayerId::A).field.push(serpent);
        let wisp = fixtures::put_on_field(&mut state, PlayerId::B, WISP, true);
        let golem = fixtures::put_on_field(&mut state, PlayerId::B, GOLEM, true);

        CombatResolver::activate_ultimate(&mut state, &registry, id, None).unwrap();

        let b = state.player(PlayerId::B);
        assert!(b.graveyard.contains(wisp));
        assert_eq!(b.field_card(golem).unwrap().current_def, 500);
    }

    #[derive(Debug)]
    struct Refuse;

    impl UltimateEffect for Refuse {
        fn name(&self) -> &str {
            "Refuse"
        }

        fn resolve(&self, _ctx: &mut UltimateContext<'_>) -> Result<Vec<MatchEvent>> {
            Err(DuelError::InvalidTarget(Target::Direct))
        }
    }

    #[test]
    fn test_custom_hook_errors_propagate() {
        let mut registry = fixtures::registry();
        registry.register_ultimate(GOLEM, Arc::new(Refuse)).unwrap();
        let mut state = battle_match();
        let golem = fixtures::put_on_field(&mut state, PlayerId::A, GOLEM, true);
        state.player_mut(PlayerId::A).field[0].card_energy = 2;

        assert!(CombatResolver::activate_ultimate(&mut state, &registry, golem, None).is_err());
    }
}
