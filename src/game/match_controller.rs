//! Match controller: the engine's public API
//!
//! The controller exclusively owns the authoritative `Match`. Every action is
//! applied to a working copy and committed only if it succeeds, so a rejected
//! action leaves the match exactly as it was and appends nothing to the
//! journal.

use crate::core::{CardId, CardRegistry, DefinitionId, PlayerId, Target};
use crate::game::{
    compute_state_hash, GameLogger, Match, MatchConfig, MatchResult, MatchView, Phase, TurnEngine, VerbosityLevel,
};
use crate::journal::{EventLog, MatchEvent};
use crate::{log_if_verbose, DuelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Actions a player can submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Acknowledge the turn's forced draw and move to Main
    Draw,

    /// Place a hand card onto the field
    PlayCard(CardId),

    Attack { attacker: CardId, target: Target },

    /// Use a field card's ultimate move; the target is optional
    ActivateUltimate { card: CardId, target: Option<Target> },

    /// Finish the current phase
    EndPhase,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Draw => write!(f, "draw"),
            Action::PlayCard(card) => write!(f, "play card #{card}"),
            Action::Attack { attacker, target } => write!(f, "attack {target} with card #{attacker}"),
            Action::ActivateUltimate { card, target: Some(target) } => {
                write!(f, "ultimate of card #{card} at {target}")
            }
            Action::ActivateUltimate { card, target: None } => write!(f, "ultimate of card #{card}"),
            Action::EndPhase => write!(f, "end phase"),
        }
    }
}

/// What an accepted action produced
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// State after the action
    pub snapshot: Match,
    pub events: Vec<MatchEvent>,
    /// Set once the match is over
    pub result: Option<MatchResult>,
}

/// Top-level orchestrator for one match
#[derive(Debug)]
pub struct MatchController {
    state: Match,
    registry: Arc<CardRegistry>,
    journal: EventLog,
    logger: GameLogger,
    actions_applied: usize,
}

impl MatchController {
    /// Start a match from two ordered decks (front = first draw)
    ///
    /// Deck ordering is the caller's business; the engine never shuffles.
    pub fn new_match(
        registry: Arc<CardRegistry>,
        deck_a: &[DefinitionId],
        deck_b: &[DefinitionId],
        config: MatchConfig,
    ) -> Result<Self> {
        Self::new_match_with_logger(
            registry,
            deck_a,
            deck_b,
            config,
            GameLogger::with_verbosity(VerbosityLevel::Silent),
        )
    }

    pub fn new_match_with_logger(
        registry: Arc<CardRegistry>,
        deck_a: &[DefinitionId],
        deck_b: &[DefinitionId],
        config: MatchConfig,
        logger: GameLogger,
    ) -> Result<Self> {
        config.validate()?;
        let mut state = Match::new(config, "Player A", "Player B");
        state.load_deck(PlayerId::A, deck_a, &registry)?;
        state.load_deck(PlayerId::B, deck_b, &registry)?;
        let events = TurnEngine::open_match(&mut state)?;

        let mut controller = MatchController {
            state,
            registry,
            journal: EventLog::new(),
            logger,
            actions_applied: 0,
        };
        controller.logger.normal("=== Match start ===");
        controller.commit_events(events);
        Ok(controller)
    }

    /// Apply one action atomically
    pub fn submit_action(&mut self, action: Action) -> Result<ActionOutcome> {
        if self.state.is_over() {
            self.log_rejection(&action, &DuelError::MatchAlreadyOver);
            return Err(DuelError::MatchAlreadyOver);
        }

        let mut working = self.state.clone();
        let events = match TurnEngine::apply(&mut working, &self.registry, &action) {
            Ok(events) => events,
            Err(err) => {
                self.log_rejection(&action, &err);
                return Err(err);
            }
        };

        self.state = working;
        self.actions_applied += 1;
        log_if_verbose!(self.logger, "Player {} chose: {action}", self.state.active_player());
        self.commit_events(events.clone());

        if self.logger.debug_state_hash_enabled() {
            self.logger
                .normal(&format!("state hash: {:016x}", compute_state_hash(&self.state)));
        }

        Ok(ActionOutcome {
            snapshot: self.state.clone(),
            events,
            result: self.result(),
        })
    }

    fn commit_events(&mut self, events: Vec<MatchEvent>) {
        for event in &events {
            self.log_event(event);
        }
        self.journal.extend(events);
    }

    fn log_event(&self, event: &MatchEvent) {
        match event {
            MatchEvent::MatchEnded { .. } => self.logger.log(VerbosityLevel::Minimal, Some("result"), &event.to_string()),
            MatchEvent::TurnStarted { .. } => {
                self.logger
                    .log(VerbosityLevel::Normal, Some("turn"), &format!("--- {event} ---"));
            }
            MatchEvent::CardPlayed { .. }
            | MatchEvent::AttackDeclared { .. }
            | MatchEvent::CardDestroyed { .. }
            | MatchEvent::LifeLost { .. }
            | MatchEvent::UltimateActivated { .. }
            | MatchEvent::DeckOut { .. } => self.logger.log(VerbosityLevel::Normal, Some("event"), &event.to_string()),
            _ => {
                log_if_verbose!(self.logger, "{event}");
            }
        }
    }

    fn log_rejection(&self, action: &Action, err: &DuelError) {
        if self.logger.enabled(VerbosityLevel::Verbose) {
            self.logger
                .log(VerbosityLevel::Verbose, Some("rejected"), &format!("Rejected {action}: {err}"));
        }
    }

    /// Every action that would currently be accepted, in a stable order
    pub fn legal_actions(&self) -> Vec<Action> {
        legal_actions(&self.state, &self.registry)
    }

    /// Read-only view of the authoritative state
    pub fn state(&self) -> &Match {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> Match {
        self.state.clone()
    }

    pub fn view(&self) -> MatchView<'_> {
        MatchView::new(&self.state, &self.registry)
    }

    /// Terminal result, if the match is over
    pub fn result(&self) -> Option<MatchResult> {
        self.state.is_over().then_some(self.state.result)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn journal(&self) -> &EventLog {
        &self.journal
    }

    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    /// Number of accepted actions
    pub fn actions_applied(&self) -> usize {
        self.actions_applied
    }
}

/// Enumerate accepted actions for a state
///
/// Candidates are generated per phase and kept only if the turn engine's
/// validation accepts them, so the list can never disagree with
/// `submit_action`.
pub fn legal_actions(state: &Match, registry: &CardRegistry) -> Vec<Action> {
    if state.is_over() {
        return Vec::new();
    }

    let active = state.player(state.active_player());
    let opponent = state.player(state.active_player().opponent());
    let mut candidates = Vec::new();

    match state.phase() {
        Phase::Draw => candidates.push(Action::Draw),
        Phase::Main => candidates.extend(active.hand.iter().map(Action::PlayCard)),
        Phase::Battle => {
            for card in active.field_ids() {
                for target in opponent.field_ids() {
                    candidates.push(Action::Attack {
                        attacker: card,
                        target: Target::Card(target),
                    });
                }
                candidates.push(Action::Attack {
                    attacker: card,
                    target: Target::Direct,
                });
                candidates.push(Action::ActivateUltimate { card, target: None });
                for target in opponent.field_ids() {
                    candidates.push(Action::ActivateUltimate {
                        card,
                        target: Some(Target::Card(target)),
                    });
                }
            }
        }
        Phase::End => {}
    }
    candidates.push(Action::EndPhase);

    candidates
        .into_iter()
        .filter(|action| TurnEngine::check(state, registry, action).is_ok())
        .collect()
}
