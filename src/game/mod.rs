//! Match rules, turn structure and drivers

pub mod agent;
pub mod combat;
pub mod config;
pub mod energy;
pub mod field;
pub mod logger;
pub mod match_controller;
pub mod phase;
pub mod random_agent;
pub mod runner;
pub mod scripted_agent;
pub mod state;
pub mod state_hash;
pub mod stats;
pub mod turn;
pub mod victory;

pub use agent::{MatchView, PlayerAgent};
pub use combat::CombatResolver;
pub use config::MatchConfig;
pub use energy::EnergySystem;
pub use field::FieldManager;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use match_controller::{legal_actions, Action, ActionOutcome, MatchController};
pub use phase::{Phase, TurnStructure};
pub use random_agent::RandomAgent;
pub use runner::{MatchRunner, MatchSummary};
pub use scripted_agent::ScriptedAgent;
pub use state::{CardRecord, Match};
pub use state_hash::compute_state_hash;
pub use stats::{CardStats, MatchStats, PlayerTotals};
pub use turn::TurnEngine;
pub use victory::{EndReason, MatchResult, VictoryEvaluator};
