//! Error types for the engine.
//!
//! Every failure is raised at the point of detection and aborts the whole
//! call; the caller's previously held `GameState` stays valid because no
//! function mutates its input.

use super::id::{DeckId, DieId, PieceId, ZoneId};
use super::player::PlayerId;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Problems with the declared box or the requested seating.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("players must be within [{min}, {max}], got {got}")]
    SeatCount { min: usize, max: usize, got: usize },

    #[error("player {0} is seated more than once")]
    DuplicatePlayer(PlayerId),
}

/// Kind of entity referenced by a failed lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Piece,
    Zone,
    Deck,
    Die,
    Player,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Piece => "piece",
            Self::Zone => "zone",
            Self::Deck => "deck",
            Self::Die => "die",
            Self::Player => "player",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by operations and the runtime.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown move: {0}")]
    UnknownMove(String),

    #[error("invalid move {name}: {reason}")]
    InvalidMove { name: String, reason: String },

    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: EntityKind, id: String },

    #[error("{0} is not a board zone")]
    NotABoard(ZoneId),

    #[error("{0} is a board zone; use the board operations")]
    NotAStack(ZoneId),

    #[error("index {index} out of bounds for {zone} ({len} cells)")]
    IndexOutOfBounds { zone: ZoneId, index: usize, len: usize },

    #[error("cell {index} of {zone} is occupied")]
    CellOccupied { zone: ZoneId, index: usize },

    #[error("kind \"{kind}\" not allowed in {zone}")]
    KindNotAllowed { zone: ZoneId, kind: String },

    #[error("{zone} is full ({max} items)")]
    ZoneFull { zone: ZoneId, max: usize },

    #[error("no piece at cell {index} of {zone}")]
    SourceEmpty { zone: ZoneId, index: usize },

    #[error("attribute {key} of {piece} is not an integer")]
    NotNumeric { piece: PieceId, key: String },

    #[error("attribute {key} of {piece} would overflow")]
    Overflow { piece: PieceId, key: String },
}

impl EngineError {
    pub(crate) fn piece_not_found(id: PieceId) -> Self {
        Self::EntityNotFound { kind: EntityKind::Piece, id: id.to_string() }
    }

    pub(crate) fn zone_not_found(id: ZoneId) -> Self {
        Self::EntityNotFound { kind: EntityKind::Zone, id: id.to_string() }
    }

    pub(crate) fn deck_not_found(id: DeckId) -> Self {
        Self::EntityNotFound { kind: EntityKind::Deck, id: id.to_string() }
    }

    pub(crate) fn die_not_found(id: DieId) -> Self {
        Self::EntityNotFound { kind: EntityKind::Die, id: id.to_string() }
    }

    pub(crate) fn player_not_found(id: &PlayerId) -> Self {
        Self::EntityNotFound { kind: EntityKind::Player, id: id.to_string() }
    }

    /// Build an `InvalidMove` error.
    pub fn invalid_move(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMove { name: name.into(), reason: reason.into() }
    }

    /// True for errors produced by a move's own validation or lookup.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::UnknownMove(_) | Self::InvalidMove { .. })
    }
}
