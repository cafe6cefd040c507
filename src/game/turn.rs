//! Turn engine: the Draw -> Main -> Battle -> End state machine
//!
//! Routes each action to the component that owns its rule after checking the
//! phase, and runs the start-of-turn routine whenever a Draw phase opens.

use crate::core::{CardRegistry, PlayerId};
use crate::game::{Action, CombatResolver, EnergySystem, FieldManager, Match, Phase, VictoryEvaluator};
use crate::journal::MatchEvent;
use crate::{DuelError, Result};

pub struct TurnEngine;

impl TurnEngine {
    /// Draw both opening hands and open turn 1 for seat A
    ///
    /// Turn 1 gets the full start-of-turn routine but does not advance the
    /// turn counter.
    pub fn open_match(state: &mut Match) -> Result<Vec<MatchEvent>> {
        let hand_size = state.config.starting_hand_size;
        for player in PlayerId::ALL {
            let size = state.player(player).deck.len();
            if size < hand_size {
                return Err(DuelError::InvalidDeck {
                    player,
                    size,
                    required: hand_size,
                });
            }
        }

        let mut events = Vec::new();
        for player in PlayerId::ALL {
            let p = state.player_mut(player);
            for _ in 0..hand_size {
                if let Some(card) = p.deck.draw_front() {
                    p.hand.add(card);
                    events.push(MatchEvent::CardDrawn { player, card });
                }
            }
        }

        events.extend(Self::begin_turn(state));
        events.extend(VictoryEvaluator::evaluate(state));
        Ok(events)
    }

    /// Start-of-turn routine for the active player
    ///
    /// Order: forced draw, player energy, card energy, DEF reset, ageing of
    /// both fields, then per-turn flags. A failed draw stops the routine; the
    /// victory check that follows ends the match.
    fn begin_turn(state: &mut Match) -> Vec<MatchEvent> {
        let active = state.active_player();
        let mut events = vec![MatchEvent::TurnStarted {
            turn: state.turn_number(),
            player: active,
        }];

        let p = state.player_mut(active);
        match p.deck.draw_front() {
            Some(card) => {
                p.hand.add(card);
                events.push(MatchEvent::CardDrawn { player: active, card });
            }
            None => {
                state.deck_out = Some(active);
                events.push(MatchEvent::DeckOut { player: active });
                return events;
            }
        }

        events.extend(EnergySystem::regenerate(state, active));
        events.extend(EnergySystem::accrue_card_energy(state, active));
        events.extend(FieldManager::restore_defense(state, active));
        FieldManager::age_cards(state);
        FieldManager::reset_turn_flags(state);
        events
    }

    /// Move to the next phase; End hands the turn to the opponent
    pub fn advance_phase(state: &mut Match) -> Result<Vec<MatchEvent>> {
        if state.is_over() {
            return Err(DuelError::IllegalPhaseTransition);
        }

        let from = state.phase();
        let mut events = Vec::new();
        if from == Phase::End {
            state.turn.next_turn();
            events.push(MatchEvent::PhaseChanged { from, to: Phase::Draw });
            events.extend(Self::begin_turn(state));
        } else {
            state.turn.advance_phase();
            events.push(MatchEvent::PhaseChanged {
                from,
                to: state.phase(),
            });
        }

        events.extend(VictoryEvaluator::evaluate(state));
        Ok(events)
    }

    fn require_phase(state: &Match, expected: Phase) -> Result<()> {
        let actual = state.phase();
        if actual != expected {
            return Err(DuelError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    /// Validate an action against the current state without applying it
    pub fn check(state: &Match, registry: &CardRegistry, action: &Action) -> Result<()> {
        if state.is_over() {
            return Err(DuelError::MatchAlreadyOver);
        }
        match action {
            Action::Draw => Self::require_phase(state, Phase::Draw),
            Action::EndPhase => Ok(()),
            Action::PlayCard(card) => {
                Self::require_phase(state, Phase::Main)?;
                FieldManager::check_placement(state, registry, state.active_player(), *card).map(|_| ())
            }
            Action::Attack { attacker, target } => {
                Self::require_phase(state, Phase::Battle)?;
                CombatResolver::check_attack(state, *attacker, *target)
            }
            Action::ActivateUltimate { card, target } => {
                Self::require_phase(state, Phase::Battle)?;
                CombatResolver::check_ultimate(state, registry, *card, *target)
            }
        }
    }

    /// Apply one action in place
    ///
    /// On error the state may be partially modified; callers that need
    /// atomicity apply to a copy (see `MatchController`).
    pub fn apply(state: &mut Match, registry: &CardRegistry, action: &Action) -> Result<Vec<MatchEvent>> {
        if state.is_over() {
            return Err(DuelError::MatchAlreadyOver);
        }

        let mut events = match action {
            Action::Draw => {
                Self::require_phase(state, Phase::Draw)?;
                return Self::advance_phase(state);
            }
            Action::EndPhase => return Self::advance_phase(state),
            Action::PlayCard(card) => {
                Self::require_phase(state, Phase::Main)?;
                let active = state.active_player();
                FieldManager::place_card(state, registry, active, *card)?
            }
            Action::Attack { attacker, target } => {
                Self::require_phase(state, Phase::Battle)?;
                CombatResolver::attack(state, *attacker, *target)?
            }
            Action::ActivateUltimate { card, target } => {
                Self::require_phase(state, Phase::Battle)?;
                CombatResolver::activate_ultimate(state, registry, *card, *target)?
            }
        };

        events.extend(VictoryEvaluator::evaluate(state));
        Ok(events)
    }
}
