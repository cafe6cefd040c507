//! Error types for the duel engine

use crate::core::{CardId, DefinitionId, PlayerId, Target};
use crate::game::Phase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Action not allowed in the {actual:?} phase (expected {expected:?})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Illegal phase transition: the match is already decided")]
    IllegalPhaseTransition,

    #[error("Insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: u8, available: u8 },

    #[error("Card #{card} has insufficient card energy: need {required}, have {available}")]
    InsufficientCardEnergy {
        card: CardId,
        required: u32,
        available: u32,
    },

    #[error("Field is full")]
    FieldFull,

    #[error("Card #{0} has not survived a full turn on the field")]
    NotReady(CardId),

    #[error("Invalid target: {0}")]
    InvalidTarget(Target),

    #[error("Card #{0} has already acted this battle phase")]
    AlreadyActed(CardId),

    #[error("Match is already over")]
    MatchAlreadyOver,

    #[error("Deck for player {player} has {size} cards, need at least {required}")]
    InvalidDeck {
        player: PlayerId,
        size: usize,
        required: usize,
    },

    #[error("Card #{0} is not in the active player's hand")]
    CardNotInHand(CardId),

    #[error("Card #{0} is not on the active player's field")]
    NotOnField(CardId),

    #[error("Unknown card definition: {0}")]
    UnknownDefinition(DefinitionId),

    #[error("Card #{0} has no ultimate move")]
    NoUltimate(CardId),

    #[error("Placement limit of {limit} cards per turn reached")]
    PlacementLimitReached { limit: u8 },

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DuelError {
    /// True for rejections of a single submitted action; the match is untouched
    /// and play can continue.
    pub fn is_rule_rejection(&self) -> bool {
        !matches!(
            self,
            DuelError::InvalidDeck { .. }
                | DuelError::UnknownDefinition(_)
                | DuelError::InvalidCardFormat(_)
                | DuelError::InvalidDeckFormat(_)
                | DuelError::InvalidConfig(_)
                | DuelError::Io(_)
                | DuelError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_rejection_classification() {
        assert!(DuelError::FieldFull.is_rule_rejection());
        assert!(DuelError::MatchAlreadyOver.is_rule_rejection());
        assert!(DuelError::InvalidTarget(Target::Direct).is_rule_rejection());
        assert!(!DuelError::InvalidConfig("turn_cap".into()).is_rule_rejection());
        assert!(!DuelError::InvalidDeck {
            player: PlayerId::A,
            size: 3,
            required: 5
        }
        .is_rule_rejection());
    }

    #[test]
    fn test_error_messages() {
        let err = DuelError::InsufficientEnergy {
            required: 3,
            available: 2,
        };
        assert_eq!(err.to_string(), "Insufficient energy: need 3, have 2");
        assert_eq!(
            DuelError::NotReady(CardId::new(7)).to_string(),
            "Card #7 has not survived a full turn on the field"
        );
    }
}
