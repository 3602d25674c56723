//! Box contents: pieces, cards, decks, dice, and their attribute bags.
//!
//! ## Key Types
//!
//! - `Piece`: any placeable object; a card is a piece with a `CardFace`
//! - `Deck`: named piles of piece ids
//! - `Die` / `DieFace`: uniform or weighted randomness sources
//! - `Attributes`: free-form per-entity data

pub mod attributes;
pub mod deck;
pub mod die;
pub mod piece;

pub use attributes::{AttributeKey, AttributeValue, Attributes};
pub use deck::{Deck, DISCARD_PILE, DRAW_PILE};
pub use die::{Die, DieFace, FaceValue};
pub use piece::{CardFace, Piece, SkinRef};
