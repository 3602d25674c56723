//! Rule sets and the runtime that drives them.
//!
//! Games implement [`GameDefinition`] to declare:
//! - Phases and named moves
//! - How a move is checked and applied
//! - Lifecycle hooks around turns, rounds and phases
//! - Terminal condition, winner and UI controls
//!
//! The runtime functions (`create_match`, `apply_move`, ...) call into the
//! definition but never interpret game-specific concepts directly.

pub mod controls;
pub mod definition;
pub mod registry;
pub mod runtime;

pub use controls::{Control, ControlInput, SelectOption};
pub use definition::{Advance, GameDefinition, MoveArgs, MoveSpec};
pub use registry::{ErasedGame, GameRegistry, RegistryError};
pub use runtime::{
    apply_move, create_match, derive_status, end_turn, get_controls, set_phase, MatchStatus, DEFAULT_SEED,
};
