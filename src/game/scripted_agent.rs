//! Scripted agent that replays a fixed list of actions
//!
//! Once the script runs out it ends every phase.

use crate::core::PlayerId;
use crate::game::{Action, MatchView, PlayerAgent};
use std::collections::VecDeque;

pub struct ScriptedAgent {
    player_id: PlayerId,
    script: VecDeque<Action>,
}

impl ScriptedAgent {
    pub fn new(player_id: PlayerId, actions: impl IntoIterator<Item = Action>) -> Self {
        ScriptedAgent {
            player_id,
            script: actions.into_iter().collect(),
        }
    }

    /// Actions not yet replayed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PlayerAgent for ScriptedAgent {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_action(&mut self, _view: &MatchView<'_>, _legal: &[Action]) -> Action {
        self.script.pop_front().unwrap_or(Action::EndPhase)
    }
}
