//! Monster Duel - Main Binary
//!
//! Plays, simulates and inspects monster card matches from the command line

use clap::{Parser, Subcommand, ValueEnum};
use monster_duel::{
    core::{CardRegistry, DefinitionId, PlayerId},
    game::{
        GameLogger, MatchConfig, MatchController, MatchRunner, PlayerAgent, RandomAgent, ScriptedAgent,
        VerbosityLevel,
    },
    loader::{shuffle_deck, CardLoader, DeckLoader},
    simulation::{simulate, SimulationConfig},
    Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Agent type for each seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentType {
    /// Picks uniformly among legal actions
    Random,
    /// Ends every phase without acting (for testing)
    Idle,
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Monster Duel - turn-based monster card battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single match and print its log
    Play {
        /// Card set (.json)
        #[arg(long, default_value = "test_decks/cards.json")]
        cards: PathBuf,

        /// Deck file (.dck) for player A
        #[arg(value_name = "PLAYER_A_DECK")]
        deck_a: PathBuf,

        /// Deck file (.dck) for player B
        #[arg(value_name = "PLAYER_B_DECK")]
        deck_b: PathBuf,

        /// Seed for deck shuffling and random agents
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Player A agent type
        #[arg(long, value_enum, default_value = "random")]
        p1: AgentType,

        /// Player B agent type
        #[arg(long, value_enum, default_value = "random")]
        p2: AgentType,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityLevel,

        /// Rules file (.json) overriding the default match configuration
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,

        /// Limit card placements per turn
        #[arg(long)]
        max_plays: Option<u8>,

        /// Override the turn cap
        #[arg(long)]
        turn_cap: Option<u32>,

        /// Keep decks in file order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,

        /// Print the state hash after every accepted action
        #[arg(long)]
        debug_state_hash: bool,
    },

    /// Run many random matches in parallel and report aggregate statistics
    Simulate {
        /// Card set (.json)
        #[arg(long, default_value = "test_decks/cards.json")]
        cards: PathBuf,

        /// Deck file (.dck) for player A
        #[arg(value_name = "PLAYER_A_DECK")]
        deck_a: PathBuf,

        /// Deck file (.dck) for player B
        #[arg(value_name = "PLAYER_B_DECK")]
        deck_b: PathBuf,

        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 1000)]
        games: usize,

        /// Master seed; each game derives its own
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Rules file (.json) overriding the default match configuration
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,
    },

    /// List the cards in a card set
    Cards {
        /// Card set (.json)
        #[arg(long, default_value = "test_decks/cards.json")]
        cards: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            cards,
            deck_a,
            deck_b,
            seed,
            p1,
            p2,
            verbosity,
            rules,
            max_plays,
            turn_cap,
            no_shuffle,
            debug_state_hash,
        } => {
            let mut config = load_rules(rules.as_deref())?;
            if max_plays.is_some() {
                config.max_plays_per_turn = max_plays;
            }
            if let Some(cap) = turn_cap {
                config.turn_cap = cap;
            }
            let options = PlayOptions {
                seed,
                p1,
                p2,
                verbosity,
                shuffle: !no_shuffle,
                debug_state_hash,
            };
            run_play(&cards, &deck_a, &deck_b, config, options)?
        }
        Commands::Simulate {
            cards,
            deck_a,
            deck_b,
            games,
            seed,
            rules,
        } => run_simulate(&cards, &deck_a, &deck_b, games, seed, rules.as_deref())?,
        Commands::Cards { cards } => run_cards(&cards)?,
    }

    Ok(())
}

struct PlayOptions {
    seed: u64,
    p1: AgentType,
    p2: AgentType,
    verbosity: VerbosityLevel,
    shuffle: bool,
    debug_state_hash: bool,
}

fn load_rules(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::load_from_file(path),
        None => Ok(MatchConfig::default()),
    }
}

fn load_deck(path: &Path, registry: &CardRegistry) -> Result<Vec<DefinitionId>> {
    let list = DeckLoader::load_from_file(path)?;
    list.resolve(registry)
}

fn make_agent(kind: AgentType, player: PlayerId, seed: u64) -> Box<dyn PlayerAgent> {
    match kind {
        AgentType::Random => Box::new(RandomAgent::with_seed(player, seed)),
        AgentType::Idle => Box::new(ScriptedAgent::new(player, Vec::new())),
    }
}

fn run_play(cards: &Path, deck_a: &Path, deck_b: &Path, config: MatchConfig, options: PlayOptions) -> Result<()> {
    let registry = Arc::new(CardLoader::load_from_file(cards)?);
    let mut deck_a = load_deck(deck_a, &registry)?;
    let mut deck_b = load_deck(deck_b, &registry)?;
    if options.shuffle {
        deck_a = shuffle_deck(deck_a, options.seed);
        deck_b = shuffle_deck(deck_b, options.seed.wrapping_add(1));
    }

    let mut logger = GameLogger::with_verbosity(options.verbosity);
    logger.set_debug_state_hash(options.debug_state_hash);

    let controller = MatchController::new_match_with_logger(registry, &deck_a, &deck_b, config, logger)?;
    let mut runner = MatchRunner::new(
        controller,
        make_agent(options.p1, PlayerId::A, options.seed.wrapping_add(0x1234_5678_9ABC_DEF0)),
        make_agent(options.p2, PlayerId::B, options.seed.wrapping_add(0xFEDC_BA98_7654_3210)),
    );
    let summary = runner.run()?;

    println!("\n=== Match Complete ===");
    println!("Result: {}", summary.result);
    if let Some(reason) = summary.end_reason {
        println!("Reason: {reason}");
    }
    println!("Turns played: {}", summary.turns_played);
    println!("Actions applied: {}", summary.actions_applied);

    let state = runner.controller().state();
    for player in PlayerId::ALL {
        let p = state.player(player);
        println!(
            "  {}: {} life, {} cards in deck, {} on field",
            p.name,
            p.life_points,
            p.deck.len(),
            p.field.len()
        );
    }
    Ok(())
}

fn run_simulate(
    cards: &Path,
    deck_a: &Path,
    deck_b: &Path,
    games: usize,
    seed: u64,
    rules: Option<&Path>,
) -> Result<()> {
    let registry = Arc::new(CardLoader::load_from_file(cards)?);
    let deck_a = load_deck(deck_a, &registry)?;
    let deck_b = load_deck(deck_b, &registry)?;
    let config = SimulationConfig {
        games,
        seed,
        match_config: load_rules(rules)?,
        shuffle_decks: true,
    };

    println!("=== Monster Duel Simulation ===");
    println!("Games: {games}");
    println!("Seed: {seed}\n");

    let start = std::time::Instant::now();
    let report = simulate(registry.clone(), &deck_a, &deck_b, &config)?;
    let elapsed = start.elapsed();

    report.print(&registry);
    println!("\nElapsed: {:.2}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!("Games/sec: {:.1}", games as f64 / elapsed.as_secs_f64());
    }
    Ok(())
}

fn run_cards(cards: &Path) -> Result<()> {
    let registry = CardLoader::load_from_file(cards)?;
    println!("{} cards in {}\n", registry.len(), cards.display());
    for def in registry.definitions() {
        let ultimate = def
            .ultimate
            .as_ref()
            .map(|u| format!("  [{}]", u.name()))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<28} ATK {:>4}  DEF {:>4}  cost {}{}",
            def.id.as_u32(),
            def.display_name(),
            def.atk,
            def.def,
            def.cost,
            ultimate
        );
    }
    Ok(())
}
