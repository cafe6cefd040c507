//! Deck file loader (.dck format)
//!
//! ```text
//! [metadata]
//! Name=Fire Rush
//!
//! [Main]
//! 6 Ember Drake
//! 4 Ember Drake (Elder)
//! ```
//!
//! Entries are `<count> <card name>`; a variant is written in parentheses
//! after the name. Lines starting with `#` are comments. Lines before the
//! first section header belong to the main deck; cards in any other section
//! are ignored.

use crate::core::{CardRegistry, DefinitionId};
use crate::{DuelError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::fs;
use std::path::Path;

/// Deck loader for .dck files
pub struct DeckLoader;

impl DeckLoader {
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut entries = Vec::new();
        let mut section = String::from("main");

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = header.trim().to_lowercase();
                continue;
            }

            if section == "metadata" {
                if let Some(value) = line.strip_prefix("Name=") {
                    name = Some(value.trim().to_string());
                }
                continue;
            }
            if section != "main" {
                continue;
            }

            let (count_str, card_name) = line
                .split_once(' ')
                .ok_or_else(|| DuelError::InvalidDeckFormat(format!("line {}: expected '<count> <name>'", line_no + 1)))?;
            let count = count_str
                .parse::<u8>()
                .map_err(|_| DuelError::InvalidDeckFormat(format!("line {}: bad count '{count_str}'", line_no + 1)))?;

            entries.push(DeckEntry {
                card_name: card_name.trim().to_string(),
                count,
            });
        }

        if entries.is_empty() {
            return Err(DuelError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { name, entries })
    }
}

/// A deck entry (card name and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// A parsed deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub name: Option<String>,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Expand to an ordered definition list, in file order
    pub fn resolve(&self, registry: &CardRegistry) -> Result<Vec<DefinitionId>> {
        let mut deck = Vec::with_capacity(self.total_cards());
        for entry in &self.entries {
            let definition = registry
                .find_by_name(&entry.card_name)
                .ok_or_else(|| DuelError::InvalidDeckFormat(format!("unknown card '{}'", entry.card_name)))?;
            deck.extend(std::iter::repeat(definition.id).take(entry.count as usize));
        }
        Ok(deck)
    }
}

/// Deterministic shuffle for building a match deck from a list
pub fn shuffle_deck(mut deck: Vec<DefinitionId>, seed: u64) -> Vec<DefinitionId> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}
