//! Card set loader (JSON)
//!
//! ```json
//! { "cards": [
//!     { "id": 1, "name": "Ember Drake", "atk": 500, "def": 400, "cost": 3,
//!       "ultimate": { "kind": "blast", "name": "Cinder Burst", "amount": 300 } }
//! ] }
//! ```

use crate::core::{CardDefinition, CardRegistry};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk layout of a card set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSetFile {
    pub cards: Vec<CardDefinition>,
}

/// Card set loader for .json files
pub struct CardLoader;

impl CardLoader {
    pub fn load_from_file(path: &Path) -> Result<CardRegistry> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a card set and build a registry from it
    pub fn parse(content: &str) -> Result<CardRegistry> {
        let file: CardSetFile = serde_json::from_str(content)?;
        let mut registry = CardRegistry::new();
        for card in file.cards {
            Self::validate(&card)?;
            registry.insert(card)?;
        }
        Ok(registry)
    }

    fn validate(card: &CardDefinition) -> Result<()> {
        if card.name.as_str().trim().is_empty() {
            return Err(DuelError::InvalidCardFormat(format!(
                "card {} has an empty name",
                card.id.as_u32()
            )));
        }
        if card.def == 0 {
            return Err(DuelError::InvalidCardFormat(format!(
                "'{}' must have positive DEF",
                card.display_name()
            )));
        }
        Ok(())
    }
}
