//! Player identification and per-seat data.
//!
//! ## PlayerId
//!
//! Opaque token supplied by the surrounding application (an account id, a
//! lobby slot name, ...). The engine only compares them for equality.
//!
//! ## Player
//!
//! Created at build time from the seating order; seats are 1-based.

use serde::{Deserialize, Serialize};

use crate::pieces::{AttributeKey, AttributeValue, Attributes};

/// Caller-supplied player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player token.
    pub id: PlayerId,

    /// Turn-order position, starting at 1.
    pub seat: u32,

    /// Display name.
    pub name: String,

    /// Optional health track.
    #[serde(default)]
    pub health: Option<i64>,

    /// Optional victory point track.
    #[serde(default)]
    pub victory_points: Option<i64>,

    /// Free-form per-game data.
    #[serde(default)]
    pub attrs: Attributes,
}

impl Player {
    /// Create a player at a 1-based seat with the default name.
    pub fn new(id: PlayerId, seat: u32) -> Self {
        Self {
            id,
            seat,
            name: format!("Player {seat}"),
            health: None,
            victory_points: None,
            attrs: Attributes::new(),
        }
    }

    /// Read an attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attrs.get(&AttributeKey::new(key))
    }
}

/// Optional per-seat defaults declared in a box.
///
/// Presets are matched to seats by index; seats without a preset get
/// `"Player {seat}"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPreset {
    /// Display name override.
    pub name: Option<String>,
    /// Starting health.
    pub health: Option<i64>,
    /// Starting victory points.
    pub victory_points: Option<i64>,
    /// Starting attributes.
    #[serde(default)]
    pub attrs: Attributes,
}

impl PlayerPreset {
    /// Create an empty preset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = Some(health);
        self
    }

    /// Set the starting victory points.
    #[must_use]
    pub fn with_victory_points(mut self, vp: i64) -> Self {
        self.victory_points = Some(vp);
        self
    }

    /// Add a starting attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<AttributeKey>, value: impl Into<AttributeValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Materialize a player for `seat` (1-based).
    pub(crate) fn materialize(&self, id: PlayerId, seat: u32) -> Player {
        let mut player = Player::new(id, seat);
        if let Some(name) = &self.name {
            player.name = name.clone();
        }
        player.health = self.health;
        player.victory_points = self.victory_points;
        player.attrs = self.attrs.clone();
        player
    }
}
