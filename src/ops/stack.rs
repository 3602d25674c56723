//! Stack zone operations: push and pop.

use tracing::trace;

use crate::core::{EngineError, EngineResult, GameState, PieceId, ZoneId};
use crate::zones::ZoneShape;

/// Append a piece on top of a stack zone.
///
/// # Errors
///
/// `EntityNotFound` for a missing zone or piece, `NotAStack` for boards,
/// `KindNotAllowed` and `ZoneFull` from the zone rule.
pub fn push<X: Clone>(state: &GameState<X>, zone: ZoneId, piece: PieceId) -> EngineResult<GameState<X>> {
    let target = state.require_zone(zone)?;
    if target.is_board() {
        return Err(EngineError::NotAStack(zone));
    }
    let kind = &state.require_piece(piece)?.kind;
    if let Some(rule) = &target.rule {
        if !rule.admits(kind) {
            return Err(EngineError::KindNotAllowed { zone, kind: kind.clone() });
        }
        if let Some(max) = rule.max_items.filter(|_| rule.is_full(target.len())) {
            return Err(EngineError::ZoneFull { zone, max });
        }
    }

    let mut next = state.clone();
    if let Some(ZoneShape::Stack { order, .. }) = next.zones.get_mut(&zone).map(|z| &mut z.shape) {
        order.push(piece);
    }
    trace!(%piece, %zone, "push");
    Ok(next)
}

/// Remove and return the top piece of a stack zone (`None` when empty).
///
/// # Errors
///
/// `EntityNotFound`, `NotAStack`.
pub fn pop<X: Clone>(state: &GameState<X>, zone: ZoneId) -> EngineResult<(GameState<X>, Option<PieceId>)> {
    if state.require_zone(zone)?.is_board() {
        return Err(EngineError::NotAStack(zone));
    }

    let mut next = state.clone();
    let popped = match next.zones.get_mut(&zone).map(|z| &mut z.shape) {
        Some(ZoneShape::Stack { order, .. }) => order.pop(),
        _ => None,
    };
    trace!(%zone, ?popped, "pop");
    Ok((next, popped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::state_with;
    use crate::zones::{StackKind, Zone, ZoneRule};

    #[test]
    fn test_push_pop_lifo() {
        let (state, _, hand, pieces) = state_with(|b| b.add_board("Board", 1, 1));

        let s1 = push(&state, hand, pieces[0]).unwrap();
        let s2 = push(&s1, hand, pieces[1]).unwrap();
        assert_eq!(s2.zone(hand).unwrap().order(), Some(&[pieces[0], pieces[1]][..]));

        let (s3, top) = pop(&s2, hand).unwrap();
        assert_eq!(top, Some(pieces[1]));
        assert_eq!(s3.zone(hand).unwrap().len(), 1);
        assert_eq!(s2.zone(hand).unwrap().len(), 2);
    }

    #[test]
    fn test_pop_empty() {
        let (state, _, hand, _) = state_with(|b| b.add_board("Board", 1, 1));
        let (next, top) = pop(&state, hand).unwrap();
        assert_eq!(top, None);
        assert_eq!(next, state);
    }

    #[test]
    fn test_push_rule_enforced() {
        let (mut state, board, _, pieces) = state_with(|b| b.add_board("Board", 1, 1));
        let pot = state.alloc_zone_id();
        state.add_zone(
            Zone::stack(pot, "Pot", StackKind::Area).with_rule(ZoneRule::new().allow_kinds(["token"]).with_max_items(1)),
        );

        let err = push(&state, pot, pieces[2]).unwrap_err();
        assert_eq!(err, EngineError::KindNotAllowed { zone: pot, kind: "chip".into() });

        let s1 = push(&state, pot, pieces[0]).unwrap();
        assert_eq!(push(&s1, pot, pieces[1]).unwrap_err(), EngineError::ZoneFull { zone: pot, max: 1 });

        assert_eq!(push(&state, board, pieces[0]).unwrap_err(), EngineError::NotAStack(board));
        assert!(pop(&state, board).is_err());
    }
}
