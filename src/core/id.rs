//! Entity identification system.
//!
//! Every box object (piece, zone, deck, die) has a typed id. All ids are
//! minted from a single [`IdGen`] counter, so they are unique across kinds
//! and never reused within a match.
//!
//! ## Threading the counter
//!
//! There is no process-wide counter. A [`crate::builder::GameBox`] owns an
//! `IdGen` while the box is being declared, hands a copy to the built
//! [`crate::core::GameState`], and the state keeps minting from it when moves
//! create new pieces.
//!
//! ```
//! use rust_tabletop::core::IdGen;
//!
//! let mut ids = IdGen::new();
//! let board = ids.zone();
//! let piece = ids.piece();
//!
//! assert_eq!(board.to_string(), "zone_0");
//! assert_eq!(piece.to_string(), "pc_1");
//! assert_eq!(ids.issued(), 2);
//! ```

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Get the raw sequence number.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a piece or card.
    PieceId,
    "pc"
);

entity_id!(
    /// Identifier of a zone (board or stack).
    ZoneId,
    "zone"
);

entity_id!(
    /// Identifier of a deck.
    DeckId,
    "deck"
);

entity_id!(
    /// Identifier of a die.
    DieId,
    "die"
);

/// Monotonic id source.
///
/// Serializable so that a match snapshot resumes minting where it left off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdGen {
    next: u32,
}

impl IdGen {
    /// Create a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    fn bump(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Mint a piece id.
    pub fn piece(&mut self) -> PieceId {
        PieceId(self.bump())
    }

    /// Mint a zone id.
    pub fn zone(&mut self) -> ZoneId {
        ZoneId(self.bump())
    }

    /// Mint a deck id.
    pub fn deck(&mut self) -> DeckId {
        DeckId(self.bump())
    }

    /// Mint a die id.
    pub fn die(&mut self) -> DieId {
        DieId(self.bump())
    }

    /// Number of ids issued so far.
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_across_kinds() {
        let mut ids = IdGen::new();

        let z = ids.zone();
        let d = ids.deck();
        let p = ids.piece();
        let x = ids.die();

        assert_eq!(z, ZoneId(0));
        assert_eq!(d, DeckId(1));
        assert_eq!(p, PieceId(2));
        assert_eq!(x, DieId(3));
        assert_eq!(ids.issued(), 4);
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(format!("{}", PieceId(42)), "pc_42");
        assert_eq!(format!("{}", ZoneId(1)), "zone_1");
        assert_eq!(format!("{}", DeckId(2)), "deck_2");
        assert_eq!(format!("{}", DieId(3)), "die_3");
    }

    #[test]
    fn test_copied_generator_continues_independently() {
        let mut ids = IdGen::new();
        ids.piece();

        let mut copy = ids;
        assert_eq!(copy.piece(), PieceId(1));
        assert_eq!(ids.piece(), PieceId(1));
    }

    #[test]
    fn test_serialization() {
        let id = PieceId(123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "123");
        let deserialized: PieceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
