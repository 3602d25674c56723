//! Pieces and cards.
//!
//! A `Piece` is any placeable game object: a mark, a disc, a chip counter.
//! A card is a piece carrying a [`CardFace`].
//!
//! ## Neutral Pieces
//!
//! Pieces can have `owner: None` for shared or game-controlled objects
//! (community cards, the pot counter, neutral extras from templates).

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, AttributeValue, Attributes};
use crate::core::{PieceId, PlayerId};

/// Renderer hint; ignored by engine logic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinRef {
    pub svg_id: Option<String>,
    pub css_class: Option<String>,
}

/// Card-specific data layered on a piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    /// Display name ("AS", "Fireball").
    pub name: String,
    /// Game-defined card type.
    pub card_type: String,
}

/// A piece in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Unique id.
    pub id: PieceId,

    /// Rule-set defined tag ("mark", "disc", "card", "counter").
    pub kind: String,

    /// Owning player, `None` for neutral pieces.
    pub owner: Option<PlayerId>,

    #[serde(default)]
    pub skin: Option<SkinRef>,

    /// Free-form per-game data.
    #[serde(default)]
    pub attrs: Attributes,

    /// Present when this piece is a card.
    #[serde(default)]
    pub card: Option<CardFace>,
}

impl Piece {
    /// Create a plain piece.
    pub fn new(id: PieceId, kind: impl Into<String>, owner: Option<PlayerId>) -> Self {
        Self {
            id,
            kind: kind.into(),
            owner,
            skin: None,
            attrs: Attributes::new(),
            card: None,
        }
    }

    /// Create a card. Its kind defaults to `"card"`.
    pub fn card(
        id: PieceId,
        name: impl Into<String>,
        card_type: impl Into<String>,
        owner: Option<PlayerId>,
    ) -> Self {
        let mut piece = Self::new(id, "card", owner);
        piece.card = Some(CardFace {
            name: name.into(),
            card_type: card_type.into(),
        });
        piece
    }

    /// Override the kind tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<AttributeKey>, value: impl Into<AttributeValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Replace the whole attribute bag.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set the renderer skin.
    #[must_use]
    pub fn with_skin(mut self, skin: Option<SkinRef>) -> Self {
        self.skin = skin;
        self
    }

    /// Is this piece a card?
    #[must_use]
    pub fn is_card(&self) -> bool {
        self.card.is_some()
    }

    /// Read an attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attrs.get(&AttributeKey::new(key))
    }

    /// Read an integer attribute with a default.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.attr(key).and_then(AttributeValue::as_int).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_piece() {
        let piece = Piece::new(PieceId(1), "counter", None).with_attr("amount", 0i64);
        assert_eq!(piece.kind, "counter");
        assert!(piece.owner.is_none());
        assert!(!piece.is_card());
        assert_eq!(piece.get_int("amount", -1), 0);
        assert_eq!(piece.get_int("missing", 7), 7);
    }

    #[test]
    fn test_card() {
        let card = Piece::card(PieceId(2), "AS", "playing", Some(PlayerId::new("p1")));
        assert_eq!(card.kind, "card");
        assert!(card.is_card());
        assert_eq!(card.card.as_ref().map(|c| c.name.as_str()), Some("AS"));

        let relabeled = card.with_kind("playing-card");
        assert_eq!(relabeled.kind, "playing-card");
        assert!(relabeled.is_card());
    }
}
