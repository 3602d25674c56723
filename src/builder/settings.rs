//! Declarative game settings.
//!
//! Settings are plain data: seat bounds, piece templates and dice templates.
//! They can be authored in code with the `with_*` builders or loaded from
//! JSON.

use serde::{Deserialize, Serialize};

use crate::core::{seed_from_str, PlayerId};
use crate::pieces::{AttributeKey, AttributeValue, Attributes, DieFace, SkinRef};

/// Seed given either as a number or as text (hashed with FNV-1a).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchSeed {
    Num(u64),
    Text(String),
}

impl MatchSeed {
    /// Resolve to the numeric match seed.
    #[must_use]
    pub fn resolve(&self) -> u64 {
        match self {
            MatchSeed::Num(n) => *n,
            MatchSeed::Text(s) => seed_from_str(s),
        }
    }
}

impl From<u64> for MatchSeed {
    fn from(n: u64) -> Self {
        MatchSeed::Num(n)
    }
}

impl From<&str> for MatchSeed {
    fn from(s: &str) -> Self {
        MatchSeed::Text(s.to_string())
    }
}

impl From<String> for MatchSeed {
    fn from(s: String) -> Self {
        MatchSeed::Text(s)
    }
}

/// Seat bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlots {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl PlayerSlots {
    /// Create seat bounds.
    #[must_use]
    pub const fn new(min: usize, max: usize, default: usize) -> Self {
        Self { min, max, default }
    }

    /// Exactly `n` seats.
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self::new(n, n, n)
    }

    /// Is `count` within `[min, max]`?
    #[must_use]
    pub const fn admits(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

/// Card data for templates materialized as cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub card_type: String,
    #[serde(default)]
    pub skin: Option<SkinRef>,
}

/// Template for pieces created at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    /// Kind tag given to every created piece.
    pub kind: String,
    /// Copies per seat, owned by that seat.
    #[serde(default)]
    pub per_player: u32,
    /// Neutral copies (no owner).
    #[serde(default)]
    pub extras: u32,
    #[serde(default)]
    pub attrs: Attributes,
    #[serde(default)]
    pub skin: Option<SkinRef>,
    /// Materialize per-player copies as cards.
    #[serde(default)]
    pub as_card: Option<CardTemplate>,
}

impl PieceTemplate {
    /// A template with no copies.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            per_player: 0,
            extras: 0,
            attrs: Attributes::new(),
            skin: None,
            as_card: None,
        }
    }

    #[must_use]
    pub fn per_player(mut self, n: u32) -> Self {
        self.per_player = n;
        self
    }

    #[must_use]
    pub fn extras(mut self, n: u32) -> Self {
        self.extras = n;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<AttributeKey>, value: impl Into<AttributeValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_skin(mut self, skin: SkinRef) -> Self {
        self.skin = Some(skin);
        self
    }

    /// Materialize per-player copies as cards.
    #[must_use]
    pub fn as_card(mut self, name: impl Into<String>, card_type: impl Into<String>) -> Self {
        self.as_card = Some(CardTemplate {
            name: name.into(),
            card_type: card_type.into(),
            skin: None,
        });
        self
    }
}

/// Template for dice created at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTemplate {
    pub kind: String,
    pub sides: u32,
    pub count: u32,
    #[serde(default)]
    pub faces: Vec<DieFace>,
    #[serde(default)]
    pub skin: Option<SkinRef>,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub attrs: Attributes,
}

impl DiceTemplate {
    /// `count` uniform dice of `kind`.
    pub fn new(kind: impl Into<String>, sides: u32, count: u32) -> Self {
        Self {
            kind: kind.into(),
            sides,
            count,
            faces: Vec::new(),
            skin: None,
            owner: None,
            attrs: Attributes::new(),
        }
    }

    #[must_use]
    pub fn with_faces(mut self, faces: Vec<DieFace>) -> Self {
        self.faces = faces;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Game-level settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Registry key ("tictactoe", "connect4", ...).
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub players: PlayerSlots,
    #[serde(default)]
    pub allow_spectators: bool,
    /// Metadata only; the engine does not hide anything.
    #[serde(default)]
    pub hidden_info: bool,
    /// Used when `create_match` is given no seed.
    #[serde(default)]
    pub setup_seed: Option<MatchSeed>,
    #[serde(default)]
    pub pieces: Vec<PieceTemplate>,
    #[serde(default)]
    pub dice: Vec<DiceTemplate>,
}

impl Settings {
    /// Settings with no templates.
    pub fn new(id: impl Into<String>, players: PlayerSlots) -> Self {
        Self {
            id: id.into(),
            name: None,
            players,
            allow_spectators: false,
            hidden_info: false,
            setup_seed: None,
            pieces: Vec::new(),
            dice: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_spectators(mut self) -> Self {
        self.allow_spectators = true;
        self
    }

    #[must_use]
    pub fn with_hidden_info(mut self) -> Self {
        self.hidden_info = true;
        self
    }

    #[must_use]
    pub fn with_setup_seed(mut self, seed: impl Into<MatchSeed>) -> Self {
        self.setup_seed = Some(seed.into());
        self
    }

    #[must_use]
    pub fn with_piece(mut self, template: PieceTemplate) -> Self {
        self.pieces.push(template);
        self
    }

    #[must_use]
    pub fn with_dice(mut self, template: DiceTemplate) -> Self {
        self.dice.push(template);
        self
    }
}
