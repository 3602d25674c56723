//! Attribute bag operations.

use tracing::trace;

use crate::core::{EngineError, EngineResult, GameState, PieceId, PlayerId};
use crate::pieces::{AttributeKey, AttributeValue};

/// Set a piece attribute, replacing any previous value.
///
/// # Errors
///
/// `EntityNotFound` for a missing piece.
pub fn set_piece_attr<X: Clone>(
    state: &GameState<X>,
    piece: PieceId,
    key: &str,
    value: impl Into<AttributeValue>,
) -> EngineResult<GameState<X>> {
    state.require_piece(piece)?;

    let mut next = state.clone();
    if let Some(pc) = next.pieces.get_mut(&piece) {
        pc.attrs.insert(AttributeKey::new(key), value.into());
    }
    trace!(%piece, key, "set_piece_attr");
    Ok(next)
}

/// Add `delta` to an integer piece attribute. A missing attribute counts as 0.
///
/// # Errors
///
/// `EntityNotFound` for a missing piece, `NotNumeric` when the attribute
/// holds something other than an integer, `Overflow` when the sum leaves
/// the `i64` range.
pub fn increment_piece_attr<X: Clone>(
    state: &GameState<X>,
    piece: PieceId,
    key: &str,
    delta: i64,
) -> EngineResult<GameState<X>> {
    let current = match state.require_piece(piece)?.attr(key) {
        None => 0,
        Some(AttributeValue::Int(n)) => *n,
        Some(_) => {
            return Err(EngineError::NotNumeric { piece, key: key.to_string() });
        }
    };

    let Some(total) = current.checked_add(delta) else {
        return Err(EngineError::Overflow { piece, key: key.to_string() });
    };

    let mut next = state.clone();
    if let Some(pc) = next.pieces.get_mut(&piece) {
        pc.attrs.insert(AttributeKey::new(key), AttributeValue::Int(total));
    }
    trace!(%piece, key, delta, total, "increment_piece_attr");
    Ok(next)
}

/// Set a player attribute.
///
/// # Errors
///
/// `EntityNotFound` for an unseated player.
pub fn set_player_attr<X: Clone>(
    state: &GameState<X>,
    player: &PlayerId,
    key: &str,
    value: impl Into<AttributeValue>,
) -> EngineResult<GameState<X>> {
    state.require_player(player)?;

    let mut next = state.clone();
    if let Some(p) = next.players.get_mut(player) {
        p.attrs.insert(AttributeKey::new(key), value.into());
    }
    trace!(%player, key, "set_player_attr");
    Ok(next)
}
