//! Core duel types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod registry;
pub mod types;

pub use card::{CardDefinition, CardInstance, Target, UltimateSpec};
pub use entity::{CardId, EntityId, EntityStore, PlayerId};
pub use player::{Field, PlayerState};
pub use registry::{CardRegistry, UltimateContext, UltimateEffect};
pub use types::{CardName, DefinitionId, PlayerName};
