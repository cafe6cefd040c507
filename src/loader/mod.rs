//! Card set and deck loaders
//!
//! Parsers for JSON card sets and the .dck deck list format

pub mod card;
pub mod deck;

pub use card::{CardLoader, CardSetFile};
pub use deck::{shuffle_deck, DeckEntry, DeckList, DeckLoader};
