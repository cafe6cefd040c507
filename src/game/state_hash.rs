//! Deterministic state hashing
//!
//! Two matches with the same seed and the same action sequence must hash
//! identically. The match is serialized to a `serde_json::Value` first, whose
//! object keys are sorted, so map iteration order cannot leak into the hash.

use crate::game::Match;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute a deterministic hash of the match state
pub fn compute_state_hash(state: &Match) -> u64 {
    let canonical = match serde_json::to_value(state).and_then(|v| serde_json::to_string(&v)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: failed to serialize match for hashing: {e}");
            return 0;
        }
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}
