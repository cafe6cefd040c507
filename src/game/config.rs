//! Match rules configuration

use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable rules for one match
///
/// Every field has a default, so a rules file only needs the values it
/// changes: `{ "turn_cap": 30 }` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub starting_life: u32,
    pub starting_energy: u8,
    pub max_energy: u8,
    /// Maximum cards on one player's field
    pub field_limit: usize,
    pub starting_hand_size: usize,
    /// The match is drawn once End is reached with turn_number above this
    pub turn_cap: u32,
    /// Card energy spent by an ultimate move
    pub ultimate_cost: u32,
    /// Cards a player may place per turn (None = unlimited)
    pub max_plays_per_turn: Option<u8>,
    /// Forbid direct attacks while the defender has field cards
    pub direct_attack_requires_empty_field: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            starting_life: 2000,
            starting_energy: 1,
            max_energy: 10,
            field_limit: 5,
            starting_hand_size: 5,
            turn_cap: 20,
            ultimate_cost: 2,
            max_plays_per_turn: None,
            direct_attack_requires_empty_field: false,
        }
    }
}

impl MatchConfig {
    /// Load a JSON rules file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_limit == 0 {
            return Err(DuelError::InvalidConfig("field_limit must be at least 1".into()));
        }
        if self.max_energy == 0 {
            return Err(DuelError::InvalidConfig("max_energy must be at least 1".into()));
        }
        if self.starting_energy > self.max_energy {
            return Err(DuelError::InvalidConfig(format!(
                "starting_energy {} exceeds max_energy {}",
                self.starting_energy, self.max_energy
            )));
        }
        if self.turn_cap == 0 {
            return Err(DuelError::InvalidConfig("turn_cap must be at least 1".into()));
        }
        if self.starting_life == 0 {
            return Err(DuelError::InvalidConfig("starting_life must be positive".into()));
        }
        if self.max_plays_per_turn == Some(0) {
            return Err(DuelError::InvalidConfig("max_plays_per_turn must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.starting_life, 2000);
        assert_eq!(config.starting_energy, 1);
        assert_eq!(config.max_energy, 10);
        assert_eq!(config.field_limit, 5);
        assert_eq!(config.turn_cap, 20);
        assert_eq!(config.ultimate_cost, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MatchConfig::from_json(r#"{ "turn_cap": 30, "max_plays_per_turn": 2 }"#).unwrap();
        assert_eq!(config.turn_cap, 30);
        assert_eq!(config.max_plays_per_turn, Some(2));
        assert_eq!(config.starting_life, 2000);
    }

    #[test]
    fn test_validate_rejects_nonsense() {
        let config = MatchConfig {
            starting_energy: 11,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(DuelError::InvalidConfig(_))));

        assert!(MatchConfig::from_json(r#"{ "field_limit": 0 }"#).is_err());
        assert!(MatchConfig::from_json(r#"{ "turn_cap": 0 }"#).is_err());
        assert!(matches!(
            MatchConfig::from_json("not json"),
            Err(DuelError::Serialization(_))
        ));
    }
}
