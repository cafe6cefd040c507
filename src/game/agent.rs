//! Agent interface and read-only match view
//!
//! Agents decide; the engine validates. An agent inspects a `MatchView`
//! and picks one of the legal actions the controller offers it.

use crate::core::{CardDefinition, CardId, CardInstance, CardRegistry, PlayerId};
use crate::game::{Action, Match, MatchResult, Phase};

/// Read-only view of a match for agents and observers
#[derive(Clone, Copy)]
pub struct MatchView<'a> {
    state: &'a Match,
    registry: &'a CardRegistry,
}

impl<'a> MatchView<'a> {
    pub fn new(state: &'a Match, registry: &'a CardRegistry) -> Self {
        MatchView { state, registry }
    }

    /// The full underlying state
    pub fn state(&self) -> &'a Match {
        self.state
    }

    pub fn active_player(&self) -> PlayerId {
        self.state.active_player()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number()
    }

    pub fn life(&self, player: PlayerId) -> u32 {
        self.state.player(player).life_points
    }

    pub fn energy(&self, player: PlayerId) -> u8 {
        self.state.player(player).energy
    }

    pub fn hand(&self, player: PlayerId) -> Vec<CardId> {
        self.state.player(player).hand.iter().collect()
    }

    pub fn field(&self, player: PlayerId) -> &'a [CardInstance] {
        &self.state.player(player).field
    }

    pub fn deck_size(&self, player: PlayerId) -> usize {
        self.state.player(player).deck.len()
    }

    /// Definition behind a physical card
    pub fn definition(&self, card: CardId) -> Option<&'a CardDefinition> {
        let id = self.state.definition_of(card)?;
        self.registry.get(id).ok()
    }

    pub fn card_name(&self, card: CardId) -> Option<String> {
        self.definition(card).map(|d| d.display_name())
    }

    pub fn result(&self) -> MatchResult {
        self.state.result
    }
}

/// A decision maker for one seat
pub trait PlayerAgent {
    /// Seat this agent plays
    fn player_id(&self) -> PlayerId;

    /// Short name for logs (e.g., "random")
    fn name(&self) -> &str;

    /// Pick one of `legal` (never empty; always contains `EndPhase` while the
    /// match is running)
    fn choose_action(&mut self, view: &MatchView<'_>, legal: &[Action]) -> Action;

    /// Called once when the match ends
    fn on_match_end(&mut self, _view: &MatchView<'_>, _result: MatchResult) {}
}
