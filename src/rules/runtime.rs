//! Match orchestration: creation, moves, turns, phases.
//!
//! These free functions drive a [`GameDefinition`] over immutable states.
//! Each call takes the current state by reference and returns the next one;
//! on error nothing the caller holds has changed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::controls::Control;
use super::definition::{Advance, GameDefinition, MoveArgs};
use crate::builder::MatchSeed;
use crate::core::{EngineError, EngineResult, GameState, LogEvent, PlayerId, DEFAULT_PHASE};

/// Seed used when neither the caller nor the settings supply one.
pub const DEFAULT_SEED: u64 = 1;

/// Coarse match status for lobbies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Nothing has been played yet.
    Waiting,
    InProgress,
    /// The terminal predicate holds.
    Finished,
}

/// Build a new match.
///
/// The seed is `seed`, else the settings' `setup_seed`, else
/// [`DEFAULT_SEED`]. Runs `setup`, enters the first declared phase (or
/// `"play"` without hooks when none are declared), then fires
/// `on_round_start` and `on_turn_start`.
///
/// # Errors
///
/// `Config` when the seating is rejected, or any error raised by a hook.
pub fn create_match<D: GameDefinition>(
    def: &D,
    players: &[PlayerId],
    seed: Option<MatchSeed>,
) -> EngineResult<GameState<D::Ext>> {
    let seed = seed
        .as_ref()
        .or(def.settings().setup_seed.as_ref())
        .map_or(DEFAULT_SEED, MatchSeed::resolve);

    let state = def.game_box().build_state(players, seed)?;
    let mut state = def.setup(state)?;

    state = match def.phases().first() {
        Some(first) => {
            state.ctx.phase = (*first).to_string();
            def.on_phase_enter(first, state)?
        }
        None => {
            state.ctx.phase = DEFAULT_PHASE.to_string();
            state
        }
    };

    state = def.on_round_start(state)?;
    state = def.on_turn_start(state)?;

    debug!(
        game = %def.settings().id,
        seed,
        players = players.len(),
        phase = %state.ctx.phase,
        "match created"
    );
    Ok(state)
}

/// Apply a named move for the current player.
///
/// Steps: resolve, sanitize, `on_before_action`, validate, apply,
/// `on_after_action`, log. A terminal result stamps the winner (unless one
/// is already set) and returns. Otherwise, unless the move is
/// [`Advance::None`], runs `on_turn_end`, `on_between_players`, the round
/// boundary hooks when `is_round_over`, and [`end_turn`].
///
/// # Errors
///
/// `UnknownMove`, `InvalidMove`, or any error from the move or a hook.
pub fn apply_move<D: GameDefinition>(
    def: &D,
    state: &GameState<D::Ext>,
    name: &str,
    args: MoveArgs,
) -> EngineResult<GameState<D::Ext>> {
    let Some(spec) = def.find_move(name) else {
        warn!(name, "unknown move");
        return Err(EngineError::UnknownMove(name.to_string()));
    };
    let advance = spec.advance;

    let args = def.sanitize(name, args).map_err(|reason| {
        warn!(name, %reason, "move input rejected");
        EngineError::invalid_move(name, reason)
    })?;

    let actor = state.ctx.current_player.clone();
    let mut next = def.on_before_action(name, &args, state.clone())?;

    if let Some(reason) = def.validate(name, &next, &args) {
        warn!(name, player = %actor, %reason, "move rejected");
        return Err(EngineError::invalid_move(name, reason));
    }

    next = def.apply(name, next, &args)?;
    next = def.on_after_action(name, &args, next)?;
    next.record(LogEvent::Move {
        player: actor.clone(),
        name: name.to_string(),
    });
    debug!(name, player = %actor, turn = next.ctx.turn, "move applied");

    if def.is_terminal(&next) {
        if next.ctx.winner.is_none() {
            next.ctx.winner = def.winner(&next);
        }
        debug!(winner = ?next.ctx.winner, "match finished");
        return Ok(next);
    }

    if advance == Advance::None {
        return Ok(next);
    }

    next = def.on_turn_end(next)?;
    next = def.on_between_players(next)?;
    if def.is_round_over(&next) {
        next = def.on_round_end(next)?;
        next = def.on_round_start(next)?;
    }
    end_turn(&next, def)
}

/// Pass to the next actor and fire `on_turn_start`.
///
/// The next actor comes from `next_player`, else the seat after the current
/// one (wrapping). `turn` grows by one. A terminal state is returned as is.
///
/// # Errors
///
/// Any error from `on_turn_start`.
pub fn end_turn<D: GameDefinition>(state: &GameState<D::Ext>, def: &D) -> EngineResult<GameState<D::Ext>> {
    if def.is_terminal(state) {
        return Ok(state.clone());
    }

    let current = &state.ctx.current_player;
    let actor = def
        .next_player(state)
        .or_else(|| state.ctx.next_in_seat_order(current).cloned())
        .unwrap_or_else(|| current.clone());

    let mut next = state.clone();
    next.ctx.current_player = actor;
    next.ctx.turn += 1;
    debug!(player = %next.ctx.current_player, turn = next.ctx.turn, "turn advanced");
    def.on_turn_start(next)
}

/// Switch phase: `on_phase_leave(current)`, swap, `on_phase_enter(id)`.
///
/// # Errors
///
/// Any error from the phase hooks.
pub fn set_phase<D: GameDefinition>(def: &D, state: &GameState<D::Ext>, id: &str) -> EngineResult<GameState<D::Ext>> {
    if !def.phases().iter().any(|p| *p == id) {
        warn!(phase = id, "phase not declared by the definition");
    }

    let from = state.ctx.phase.clone();
    let mut next = def.on_phase_leave(&from, state.clone())?;
    next.ctx.phase = id.to_string();
    debug!(%from, to = id, "phase changed");
    def.on_phase_enter(id, next)
}

/// Controls offered to `player`.
#[must_use]
pub fn get_controls<D: GameDefinition>(def: &D, state: &GameState<D::Ext>, player: &PlayerId) -> Vec<Control> {
    def.controls(state, player)
}

/// Finished if terminal, waiting at turn 0, in progress otherwise.
#[must_use]
pub fn derive_status<D: GameDefinition>(def: &D, state: &GameState<D::Ext>) -> MatchStatus {
    if def.is_terminal(state) {
        MatchStatus::Finished
    } else if state.ctx.turn == 0 {
        MatchStatus::Waiting
    } else {
        MatchStatus::InProgress
    }
}
