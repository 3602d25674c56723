//! Decks: named collections of piles.
//!
//! A pile is an ordered list of piece ids; the top of a pile is the end of
//! the list. `draw` and `discard` exist on every new deck; other piles
//! ("burn", "muck", ...) appear the first time they are referenced.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{DeckId, PieceId, PlayerId};

/// Pile created on every new deck.
pub const DRAW_PILE: &str = "draw";
/// Pile created on every new deck.
pub const DISCARD_PILE: &str = "discard";

/// A deck of piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub owner: Option<PlayerId>,
    piles: OrdMap<String, Vec<PieceId>>,
}

impl Deck {
    /// Create a deck with empty `draw` and `discard` piles.
    pub fn new(id: DeckId, name: impl Into<String>, owner: Option<PlayerId>) -> Self {
        let mut piles = OrdMap::new();
        piles.insert(DRAW_PILE.to_string(), Vec::new());
        piles.insert(DISCARD_PILE.to_string(), Vec::new());
        Self {
            id,
            name: name.into(),
            owner,
            piles,
        }
    }

    /// Contents of a pile, bottom to top. Missing piles read as empty.
    #[must_use]
    pub fn pile(&self, name: &str) -> &[PieceId] {
        self.piles.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of pieces in a pile.
    #[must_use]
    pub fn pile_len(&self, name: &str) -> usize {
        self.pile(name).len()
    }

    /// Has this pile been created?
    #[must_use]
    pub fn has_pile(&self, name: &str) -> bool {
        self.piles.contains_key(name)
    }

    /// Names of all created piles, in order.
    pub fn pile_names(&self) -> impl Iterator<Item = &str> {
        self.piles.keys().map(String::as_str)
    }

    /// Mutable access to a pile, creating it on first reference.
    pub fn pile_mut(&mut self, name: &str) -> &mut Vec<PieceId> {
        self.piles.entry(name.to_string()).or_insert_with(Vec::new)
    }

    /// Ensure a pile exists.
    #[must_use]
    pub fn with_pile(mut self, name: &str) -> Self {
        self.pile_mut(name);
        self
    }
}
