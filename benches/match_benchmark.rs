//! Performance benchmarks for the duel engine
//!
//! 1. **Fresh** - build a new match and play it out with random agents
//! 2. **Opening** - legal-action enumeration and snapshot cost on an opened match
//! 3. **Simulation** - parallel batch throughput
//!
//! Both use the fixture card set and decks in test_decks/.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use monster_duel::{
    core::{CardRegistry, DefinitionId, PlayerId},
    game::{MatchConfig, MatchController, MatchRunner, MatchSummary, RandomAgent},
    loader::{CardLoader, DeckLoader},
    simulation::{simulate, SimulationConfig},
    Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    registry: Arc<CardRegistry>,
    deck_a: Vec<DefinitionId>,
    deck_b: Vec<DefinitionId>,
}

fn load_fixture() -> Result<Fixture> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_decks");
    let registry = Arc::new(CardLoader::load_from_file(&dir.join("cards.json"))?);
    let deck_a = DeckLoader::load_from_file(&dir.join("fire_rush.dck"))?.resolve(&registry)?;
    let deck_b = DeckLoader::load_from_file(&dir.join("stone_wall.dck"))?.resolve(&registry)?;
    Ok(Fixture {
        registry,
        deck_a,
        deck_b,
    })
}

fn play_out(controller: MatchController, seed: u64) -> Result<MatchSummary> {
    let mut runner = MatchRunner::new(
        controller,
        Box::new(RandomAgent::with_seed(PlayerId::A, seed)),
        Box::new(RandomAgent::with_seed(PlayerId::B, seed.wrapping_add(1))),
    );
    runner.run()
}

/// Benchmark: allocate a fresh match every iteration
fn bench_match_fresh(c: &mut Criterion) {
    let fixture = load_fixture().expect("Failed to load test_decks fixtures");

    let mut group = c.benchmark_group("match_fresh");
    group.measurement_time(Duration::from_secs(10));

    for seed in [42u64, 7] {
        group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
            b.iter(|| {
                let controller = MatchController::new_match(
                    fixture.registry.clone(),
                    &fixture.deck_a,
                    &fixture.deck_b,
                    MatchConfig::default(),
                )
                .expect("Failed to open match");
                black_box(play_out(controller, seed).expect("Match failed"))
            });
        });
    }
    group.finish();
}

/// Benchmark: per-call costs on an opened match
fn bench_legal_actions(c: &mut Criterion) {
    let fixture = load_fixture().expect("Failed to load test_decks fixtures");
    let controller = MatchController::new_match(
        fixture.registry.clone(),
        &fixture.deck_a,
        &fixture.deck_b,
        MatchConfig::default(),
    )
    .expect("Failed to open match");

    c.bench_function("legal_actions_opening", |b| {
        b.iter(|| black_box(controller.legal_actions()));
    });
    c.bench_function("snapshot_opening", |b| {
        b.iter(|| black_box(controller.snapshot()));
    });
}

/// Benchmark: parallel simulation throughput
fn bench_simulation(c: &mut Criterion) {
    let fixture = load_fixture().expect("Failed to load test_decks fixtures");
    let config = SimulationConfig {
        games: 64,
        ..SimulationConfig::default()
    };

    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);
    group.bench_function("64_games", |b| {
        b.iter(|| {
            black_box(
                simulate(fixture.registry.clone(), &fixture.deck_a, &fixture.deck_b, &config)
                    .expect("Simulation failed"),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_match_fresh, bench_legal_actions, bench_simulation);
criterion_main!(benches);
