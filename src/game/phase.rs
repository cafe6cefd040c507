//! Turn phases and turn structure

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// Phases of a single player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Main,
    Battle,
    End,
}

impl Phase {
    /// Next phase in the cycle; End wraps to the next player's Draw
    pub fn next(&self) -> Phase {
        match self {
            Phase::Draw => Phase::Main,
            Phase::Main => Phase::Battle,
            Phase::Battle => Phase::End,
            Phase::End => Phase::Draw,
        }
    }
}

/// Represents the current turn structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1, one per player-turn)
    pub turn_number: u32,

    pub phase: Phase,

    /// Active player (whose turn it is)
    pub active_player: PlayerId,
}

impl TurnStructure {
    pub fn new(starting_player: PlayerId) -> Self {
        TurnStructure {
            turn_number: 1,
            phase: Phase::Draw,
            active_player: starting_player,
        }
    }

    /// Advance within the current turn; returns false at End
    pub fn advance_phase(&mut self) -> bool {
        if self.phase == Phase::End {
            return false;
        }
        self.phase = self.phase.next();
        true
    }

    /// Hand the turn to the other player and open their Draw phase
    pub fn next_turn(&mut self) {
        self.turn_number += 1;
        self.active_player = self.active_player.opponent();
        self.phase = Phase::Draw;
    }
}
