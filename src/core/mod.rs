//! Core engine types: ids, players, state, log, RNG, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games describe their contents via `builder::GameBox` rather than modifying
//! the core.

pub mod error;
pub mod id;
pub mod log;
pub mod player;
pub mod rng;
pub mod state;

pub use error::{ConfigError, EngineError, EngineResult, EntityKind};
pub use id::{DeckId, DieId, IdGen, PieceId, ZoneId};
pub use log::{LogEntry, LogEvent, RollResult, Rolls};
pub use player::{Player, PlayerId, PlayerPreset};
pub use rng::{seed_from_str, GameRng};
pub use state::{GameContext, GameState, Winner, DEFAULT_PHASE, SETUP_PHASE};
