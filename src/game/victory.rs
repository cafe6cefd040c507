//! Terminal-condition checks

use crate::core::PlayerId;
use crate::game::{Match, Phase};
use crate::journal::MatchEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchResult {
    #[default]
    Pending,
    Winner(PlayerId),
    Draw,
}

impl MatchResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchResult::Pending)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchResult::Winner(player) => Some(*player),
            _ => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Pending => write!(f, "pending"),
            MatchResult::Winner(player) => write!(f, "player {player} wins"),
            MatchResult::Draw => write!(f, "draw"),
        }
    }
}

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EndReason {
    LifeDepleted { loser: PlayerId },
    DeckOut { loser: PlayerId },
    TurnCap,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::LifeDepleted { loser } => write!(f, "player {loser} ran out of life points"),
            EndReason::DeckOut { loser } => write!(f, "player {loser} could not draw"),
            EndReason::TurnCap => write!(f, "turn limit reached"),
        }
    }
}

/// Decides whether the match is over
///
/// Rules are checked in a fixed priority order and the first that fires wins:
/// life depletion (seat A before seat B), then deck-out, then the turn cap at
/// the End phase.
pub struct VictoryEvaluator;

impl VictoryEvaluator {
    /// Terminal result for the current state, without mutating it
    pub fn check(state: &Match) -> Option<(MatchResult, EndReason)> {
        for player in PlayerId::ALL {
            if state.player(player).is_defeated() {
                return Some((
                    MatchResult::Winner(player.opponent()),
                    EndReason::LifeDepleted { loser: player },
                ));
            }
        }

        if let Some(loser) = state.deck_out {
            return Some((MatchResult::Winner(loser.opponent()), EndReason::DeckOut { loser }));
        }

        if state.turn.phase == Phase::End && state.turn.turn_number > state.config.turn_cap {
            return Some((MatchResult::Draw, EndReason::TurnCap));
        }

        None
    }

    /// Record a terminal result if one applies; returns the `MatchEnded` event
    ///
    /// A result, once set, is never changed.
    pub fn evaluate(state: &mut Match) -> Option<MatchEvent> {
        if state.is_over() {
            return None;
        }
        let (result, reason) = Self::check(state)?;
        state.result = result;
        state.end_reason = Some(reason);
        Some(MatchEvent::MatchEnded { result, reason })
    }
}
