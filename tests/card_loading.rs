//! Card set and deck loading tests
//!
//! Loads the fixtures under test_decks/ and plays them through the engine

use monster_duel::core::{DefinitionId, PlayerId, UltimateSpec};
use monster_duel::game::{MatchConfig, MatchController, MatchRunner, RandomAgent};
use monster_duel::loader::{CardLoader, DeckLoader};
use monster_duel::simulation::{simulate, SimulationConfig};
use monster_duel::{DuelError, Result};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_decks").join(name)
}

#[test]
fn test_load_card_set() -> Result<()> {
    let registry = CardLoader::load_from_file(&fixture("cards.json"))?;
    assert_eq!(registry.len(), 8);

    let elder = registry.find_by_name("ember drake (elder)").map(|d| d.id);
    assert_eq!(elder, Some(DefinitionId::new(2)));

    let serpent = registry.get(DefinitionId::new(6))?;
    assert_eq!(serpent.display_name(), "Tide Serpent");
    assert!(matches!(serpent.ultimate, Some(UltimateSpec::Sweep { amount: 150, .. })));

    let ids: Vec<u32> = registry.definitions().iter().map(|d| d.id.as_u32()).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_load_decks() -> Result<()> {
    let registry = CardLoader::load_from_file(&fixture("cards.json"))?;

    let fire = DeckLoader::load_from_file(&fixture("fire_rush.dck"))?;
    assert_eq!(fire.name.as_deref(), Some("Fire Rush"));
    assert_eq!(fire.total_cards(), 20);
    let ids = fire.resolve(&registry)?;
    assert_eq!(ids.len(), 20);
    assert_eq!(&ids[..4], &[DefinitionId::new(4); 4]);

    let wall = DeckLoader::load_from_file(&fixture("stone_wall.dck"))?;
    assert_eq!(wall.resolve(&registry)?.len(), 20);
    Ok(())
}

#[test]
fn test_bad_fixtures() -> Result<()> {
    let registry = Arc::new(CardLoader::load_from_file(&fixture("cards.json"))?);

    let unknown = DeckLoader::load_from_file(&fixture("bad_card.dck"))?;
    assert!(matches!(unknown.resolve(&registry), Err(DuelError::InvalidDeckFormat(_))));

    let tiny = DeckLoader::load_from_file(&fixture("tiny.dck"))?.resolve(&registry)?;
    let result = MatchController::new_match(registry, &tiny, &tiny, MatchConfig::default());
    assert!(matches!(
        result,
        Err(DuelError::InvalidDeck {
            player: PlayerId::A,
            size: 3,
            required: 5
        })
    ));

    assert!(matches!(
        CardLoader::load_from_file(&fixture("missing.json")),
        Err(DuelError::Io(_))
    ));
    Ok(())
}

#[test]
fn test_fixture_decks_play_to_completion() -> Result<()> {
    let registry = Arc::new(CardLoader::load_from_file(&fixture("cards.json"))?);
    let fire = DeckLoader::load_from_file(&fixture("fire_rush.dck"))?.resolve(&registry)?;
    let wall = DeckLoader::load_from_file(&fixture("stone_wall.dck"))?.resolve(&registry)?;

    let controller = MatchController::new_match(registry.clone(), &fire, &wall, MatchConfig::default())?;
    let mut runner = MatchRunner::new(
        controller,
        Box::new(RandomAgent::with_seed(PlayerId::A, 5)),
        Box::new(RandomAgent::with_seed(PlayerId::B, 6)),
    );
    let summary = runner.run()?;
    assert!(summary.result.is_terminal());
    assert!(summary.end_reason.is_some());

    let config = SimulationConfig {
        games: 16,
        seed: 3,
        ..SimulationConfig::default()
    };
    let report = simulate(registry, &fire, &wall, &config)?;
    assert_eq!(report.games, 16);
    assert!(!report.stats.cards.is_empty());
    Ok(())
}

#[test]
fn test_rules_file() -> Result<()> {
    let config = MatchConfig::from_json(r#"{ "turn_cap": 8, "max_plays_per_turn": 2 }"#)?;
    assert_eq!(config.turn_cap, 8);
    assert_eq!(config.max_plays_per_turn, Some(2));
    assert_eq!(config.starting_life, 2000);

    assert!(matches!(
        MatchConfig::from_json(r#"{ "starting_energy": 11 }"#),
        Err(DuelError::InvalidConfig(_))
    ));
    Ok(())
}
