//! Drives a match to completion with two agents

use crate::core::PlayerId;
use crate::game::{EndReason, MatchController, MatchResult, PlayerAgent};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Summary of a finished (or abandoned) match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// `Pending` only if the action limit stopped the match
    pub result: MatchResult,
    pub end_reason: Option<EndReason>,
    pub turns_played: u32,
    pub actions_applied: usize,
}

impl MatchSummary {
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.winner()
    }
}

pub struct MatchRunner {
    controller: MatchController,
    agents: [Box<dyn PlayerAgent>; 2],
    /// Stop after this many accepted actions
    max_actions: usize,
}

impl MatchRunner {
    pub fn new(controller: MatchController, agent_a: Box<dyn PlayerAgent>, agent_b: Box<dyn PlayerAgent>) -> Self {
        MatchRunner {
            controller,
            agents: [agent_a, agent_b],
            max_actions: 100_000,
        }
    }

    pub fn with_action_limit(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }

    /// Run until the match is terminal; a rejected agent action is an error
    pub fn run(&mut self) -> Result<MatchSummary> {
        while !self.controller.is_over() && self.controller.actions_applied() < self.max_actions {
            let seat = self.controller.state().active_player().index();
            let legal = self.controller.legal_actions();
            let action = {
                let view = self.controller.view();
                self.agents[seat].choose_action(&view, &legal)
            };
            self.controller.submit_action(action)?;
        }

        let state = self.controller.state();
        if state.is_over() {
            let view = self.controller.view();
            for agent in self.agents.iter_mut() {
                agent.on_match_end(&view, state.result);
            }
        }

        Ok(MatchSummary {
            result: state.result,
            end_reason: state.end_reason,
            turns_played: state.turn_number(),
            actions_applied: self.controller.actions_applied(),
        })
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn into_controller(self) -> MatchController {
        self.controller
    }
}
