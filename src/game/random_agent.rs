//! Random agent for testing and baseline play
//!
//! Picks uniformly among the legal actions. Seeded, so the same seed and the
//! same match always produce the same choices.

use crate::core::PlayerId;
use crate::game::{Action, MatchView, PlayerAgent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub struct RandomAgent {
    player_id: PlayerId,
    rng: ChaCha12Rng,
}

impl RandomAgent {
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomAgent {
            player_id,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, _view: &MatchView<'_>, legal: &[Action]) -> Action {
        if legal.is_empty() {
            return Action::EndPhase;
        }
        let index = self.rng.gen_range(0..legal.len());
        legal[index]
    }
}
