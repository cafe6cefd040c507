//! Monster Duel - deterministic turn-based monster card battle engine
//!
//! Two players draw, place monsters, attack and trigger ultimate moves under
//! a small, strict ruleset. The engine validates and applies actions, keeps
//! an auditable event journal and decides the outcome; choosing what to do is
//! left to agents.

pub mod core;
pub mod error;
pub mod game;
pub mod journal;
pub mod loader;
pub mod simulation;
pub mod zones;

pub use error::{DuelError, Result};
