//! Batch simulation: many independent matches in parallel
//!
//! Each game gets its own seed derived from the master seed and the game
//! index, and results are folded in index order, so a report depends only on
//! the inputs and never on how rayon schedules the work.

use crate::core::{CardRegistry, DefinitionId, PlayerId};
use crate::game::{
    EndReason, MatchConfig, MatchController, MatchResult, MatchRunner, MatchStats, MatchSummary, RandomAgent,
};
use crate::loader::shuffle_deck;
use crate::Result;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Parameters of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    pub seed: u64,
    pub match_config: MatchConfig,
    /// Shuffle each deck per game; otherwise decks keep list order
    pub shuffle_decks: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            seed: 42,
            match_config: MatchConfig::default(),
            shuffle_decks: true,
        }
    }
}

/// Aggregated outcome of a simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub games: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    /// Matches the runner's action limit stopped before a result
    pub abandoned: usize,
    pub total_turns: u64,
    pub end_reasons: BTreeMap<EndReason, usize>,
    pub stats: MatchStats,
}

impl SimulationReport {
    fn record(&mut self, summary: &MatchSummary, stats: &MatchStats) {
        self.games += 1;
        match summary.result {
            MatchResult::Winner(PlayerId::A) => self.a_wins += 1,
            MatchResult::Winner(PlayerId::B) => self.b_wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Pending => self.abandoned += 1,
        }
        self.total_turns += u64::from(summary.turns_played);
        if let Some(reason) = summary.end_reason {
            *self.end_reasons.entry(reason).or_insert(0) += 1;
        }
        self.stats.merge(stats);
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            100.0 * part as f64 / total as f64
        }
    }

    /// Human-readable report on stdout
    pub fn print(&self, registry: &CardRegistry) {
        println!("=== Simulation Complete ===");
        println!("Total games played: {}", self.games);
        println!("Average turns: {:.1}\n", self.average_turns());

        println!("=== Results ===");
        println!("Player A wins: {} ({:.1}%)", self.a_wins, Self::pct(self.a_wins, self.games));
        println!("Player B wins: {} ({:.1}%)", self.b_wins, Self::pct(self.b_wins, self.games));
        println!("Draws: {} ({:.1}%)", self.draws, Self::pct(self.draws, self.games));
        if self.abandoned > 0 {
            println!("Abandoned: {} ({:.1}%)", self.abandoned, Self::pct(self.abandoned, self.games));
        }

        println!("\n=== End Reasons ===");
        for (reason, count) in &self.end_reasons {
            println!("  {reason}: {count}");
        }

        println!("\n=== Card Damage ===");
        for (definition, damage) in self.stats.top_damage_dealers() {
            let card = self.stats.card(definition);
            let name = registry
                .get(definition)
                .map(|d| d.display_name())
                .unwrap_or_else(|_| definition.to_string());
            println!(
                "  {name}: {damage} damage, {} kills, {} ultimates, played {} times",
                card.kills, card.ultimates_used, card.times_played
            );
        }
    }
}

/// Seed for one game, spread across the u64 range
fn game_seed(master: u64, index: usize) -> u64 {
    master.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play one seeded game between two random agents
pub fn run_single(
    registry: &Arc<CardRegistry>,
    deck_a: &[DefinitionId],
    deck_b: &[DefinitionId],
    config: &SimulationConfig,
    index: usize,
) -> Result<(MatchSummary, MatchStats)> {
    let seed = game_seed(config.seed, index);
    let (deck_a, deck_b) = if config.shuffle_decks {
        (
            shuffle_deck(deck_a.to_vec(), seed),
            shuffle_deck(deck_b.to_vec(), seed.wrapping_add(1)),
        )
    } else {
        (deck_a.to_vec(), deck_b.to_vec())
    };

    let controller = MatchController::new_match(registry.clone(), &deck_a, &deck_b, config.match_config.clone())?;
    let mut runner = MatchRunner::new(
        controller,
        Box::new(RandomAgent::with_seed(PlayerId::A, seed.wrapping_add(0x1234_5678_9ABC_DEF0))),
        Box::new(RandomAgent::with_seed(PlayerId::B, seed.wrapping_add(0xFEDC_BA98_7654_3210))),
    );
    let summary = runner.run()?;
    let stats = MatchStats::from_events(runner.controller().journal().events());
    Ok((summary, stats))
}

/// Run `config.games` matches in parallel and aggregate the results
pub fn simulate(
    registry: Arc<CardRegistry>,
    deck_a: &[DefinitionId],
    deck_b: &[DefinitionId],
    config: &SimulationConfig,
) -> Result<SimulationReport> {
    let results: Vec<(MatchSummary, MatchStats)> = (0..config.games)
        .into_par_iter()
        .map(|index| run_single(&registry, deck_a, deck_b, config, index))
        .collect::<Result<_>>()?;

    let mut report = SimulationReport::default();
    for (summary, stats) in &results {
        report.record(summary, stats);
    }
    Ok(report)
}
