//! # rust-tabletop
//!
//! A deterministic, zone-based engine for turn-based tabletop games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded boards, hands, phases, or card types.
//!    Games declare these in a `GameBox` and a `GameDefinition`.
//!
//! 2. **Immutable Transitions**: Every operation takes a state and returns
//!    the next one. A failed move leaves the caller's state untouched.
//!
//! 3. **Deterministic**: All randomness (shuffles, dice) derives from the
//!    match seed, the log length and a salt. Same inputs, same match.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a state
//!   can be kept around for undo, replay or search without copying.
//!
//! - **Typed Extension**: Game-specific state rides along in
//!   `GameState::ext`, serialized with the rest of the match.
//!
//! ## Modules
//!
//! - `core`: Ids, players, state, log, errors, RNG
//! - `pieces`: Pieces, cards, decks, dice, attribute bags
//! - `zones`: Boards and stacks with insertion rules
//! - `builder`: Settings and the `GameBox` that builds initial states
//! - `ops`: The mutation operations (place, push, shuffle, roll, ...)
//! - `rules`: `GameDefinition`, the match runtime and the registry
//! - `games`: Tic-tac-toe, Connect Four, no-limit hold'em

pub mod builder;
pub mod core;
pub mod games;
pub mod ops;
pub mod pieces;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    DeckId, DieId, EngineError, EngineResult, GameContext, GameRng, GameState, LogEntry, LogEvent, PieceId,
    Player, PlayerId, Winner, ZoneId,
};

pub use crate::pieces::{AttributeKey, AttributeValue, Attributes, Deck, Die, DieFace, FaceValue, Piece};

pub use crate::zones::{StackKind, Zone, ZoneRule, ZoneShape, ZoneVisibility};

pub use crate::builder::{GameBox, MatchSeed, PlayerSlots, Settings};

pub use crate::rules::{
    apply_move, create_match, derive_status, end_turn, get_controls, set_phase, Control, GameDefinition,
    GameRegistry, MatchStatus, MoveArgs, MoveSpec,
};

pub use crate::games::{Connect4, PokerNlh, TicTacToe};
