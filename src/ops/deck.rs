//! Deck pile operations.
//!
//! Piles are created on first reference, including by `pop_from_pile`.

use tracing::trace;

use super::stack::push;
use crate::core::{DeckId, EngineResult, GameRng, GameState, LogEvent, PieceId, ZoneId};

/// Remove and return the top of a pile (`None` when empty).
///
/// # Errors
///
/// `EntityNotFound` for a missing deck.
pub fn pop_from_pile<X: Clone>(
    state: &GameState<X>,
    deck: DeckId,
    pile: &str,
) -> EngineResult<(GameState<X>, Option<PieceId>)> {
    state.require_deck(deck)?;

    let mut next = state.clone();
    let popped = next.decks.get_mut(&deck).and_then(|d| d.pile_mut(pile).pop());
    trace!(%deck, pile, ?popped, "pop_from_pile");
    Ok((next, popped))
}

/// Put a piece on top of a pile.
///
/// # Errors
///
/// `EntityNotFound` for a missing deck or piece.
pub fn push_to_pile<X: Clone>(
    state: &GameState<X>,
    deck: DeckId,
    pile: &str,
    piece: PieceId,
) -> EngineResult<GameState<X>> {
    state.require_deck(deck)?;
    state.require_piece(piece)?;

    let mut next = state.clone();
    if let Some(d) = next.decks.get_mut(&deck) {
        d.pile_mut(pile).push(piece);
    }
    trace!(%deck, pile, %piece, "push_to_pile");
    Ok(next)
}

/// Move the top of a pile onto a stack zone.
///
/// An empty pile leaves the state unchanged. If the zone refuses the piece,
/// the whole transfer fails and the piece stays in the pile.
///
/// # Errors
///
/// Anything from [`pop_from_pile`] or [`push`].
pub fn transfer_from_deck_to_zone<X: Clone>(
    state: &GameState<X>,
    deck: DeckId,
    pile: &str,
    zone: ZoneId,
) -> EngineResult<GameState<X>> {
    let (popped_state, popped) = pop_from_pile(state, deck, pile)?;
    match popped {
        Some(piece) => push(&popped_state, zone, piece),
        None => Ok(popped_state),
    }
}

/// Shuffle a pile with Fisher-Yates.
///
/// The stream is keyed by the match seed, the current log length and the
/// salt (default `shuffle:{deck}:{pile}`). Appends a `Shuffle` log entry.
///
/// # Errors
///
/// `EntityNotFound` for a missing deck.
pub fn shuffle_pile<X: Clone>(
    state: &GameState<X>,
    deck: DeckId,
    pile: &str,
    salt: Option<&str>,
) -> EngineResult<GameState<X>> {
    state.require_deck(deck)?;

    let salt = salt.map_or_else(|| format!("shuffle:{deck}:{pile}"), str::to_string);
    let mut rng = GameRng::for_draw(state.ctx.seed, state.log.len(), &salt);

    let mut next = state.clone();
    let mut size = 0;
    if let Some(d) = next.decks.get_mut(&deck) {
        let cards = d.pile_mut(pile);
        rng.shuffle(cards);
        size = cards.len();
    }
    next.record(LogEvent::Shuffle { deck, pile: pile.to_string(), size });
    trace!(%deck, pile, size, %salt, "shuffle_pile");
    Ok(next)
}
