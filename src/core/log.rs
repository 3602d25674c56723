//! Append-only match log.
//!
//! The log doubles as the freshness counter for randomness: every roll and
//! shuffle derives its stream from the log length at the time of the draw.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::id::{DeckId, DieId};
use super::player::PlayerId;
use crate::pieces::FaceValue;

/// Outcome of rolling one die.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Resolved face value.
    pub value: FaceValue,
    /// 0-based face index.
    pub face_index: usize,
    /// Kind of the die rolled.
    pub die_kind: String,
    /// Set when rolling a specific die.
    pub die_id: Option<DieId>,
}

/// Roll results. Most rolls are a handful of dice.
pub type Rolls = SmallVec<[RollResult; 4]>;

/// A structured log event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    /// Dice were rolled.
    Dice {
        kind: String,
        die: Option<DieId>,
        count: u32,
        results: Rolls,
    },
    /// A deck pile was shuffled.
    Shuffle { deck: DeckId, pile: String, size: usize },
    /// A move was applied.
    Move { player: PlayerId, name: String },
}

/// A log entry stamped with the turn it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at_turn: u32,
    pub event: LogEvent,
}

impl LogEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(at_turn: u32, event: LogEvent) -> Self {
        Self { at_turn, event }
    }
}
