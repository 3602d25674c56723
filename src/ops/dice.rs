//! Deterministic dice rolls.
//!
//! Each roll draws from a stream keyed by `(ctx.seed, log.len(), salt)` and
//! appends a `Dice` log entry, so the next roll starts from a fresh stream
//! while replaying the same state reproduces the same values.

use tracing::trace;

use crate::core::{DieId, EngineResult, GameRng, GameState, LogEvent, RollResult, Rolls};
use crate::pieces::{DieFace, FaceValue};

const FALLBACK_SIDES: u32 = 6;

/// Sides implied by a `D<n>` kind name (case-insensitive), else 6.
#[must_use]
pub fn infer_sides(kind: &str) -> u32 {
    kind.strip_prefix(&['D', 'd'][..])
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .map_or(FALLBACK_SIDES, |n| n.max(1))
}

fn roll_one(rng: &mut GameRng, sides: u32, faces: &[DieFace], kind: &str, die: Option<DieId>) -> RollResult {
    let (value, face_index) = if faces.is_empty() {
        let roll = rng.gen_range_inclusive(1, sides.max(1));
        (FaceValue::Num(i64::from(roll)), (roll - 1) as usize)
    } else {
        let weights: Vec<u32> = faces.iter().map(DieFace::effective_weight).collect();
        let idx = rng.choose_weighted(&weights).unwrap_or(0);
        let value = faces[idx].value.clone().unwrap_or(FaceValue::Num(idx as i64 + 1));
        (value, idx)
    };
    RollResult {
        value,
        face_index,
        die_kind: kind.to_string(),
        die_id: die,
    }
}

/// Roll `count` dice of a kind.
///
/// Uses the first die of that kind in the state for sides and faces; with
/// none present, sides come from the kind name (`"D20"` rolls 1..=20).
/// The default salt is `dice:{kind}`. `count == 0` returns the state
/// unchanged and no results.
pub fn roll_dice_by_kind<X: Clone>(
    state: &GameState<X>,
    kind: &str,
    count: u32,
    salt: Option<&str>,
) -> EngineResult<(GameState<X>, Rolls)> {
    if count == 0 {
        return Ok((state.clone(), Rolls::new()));
    }

    let template = state.dice.values().find(|d| d.kind == kind);
    let sides = template.map_or_else(|| infer_sides(kind), |d| d.sides);
    let faces = template.map_or(&[][..], |d| d.faces.as_slice());

    let salt = salt.map_or_else(|| format!("dice:{kind}"), str::to_string);
    let mut rng = GameRng::for_draw(state.ctx.seed, state.log.len(), &salt);
    let results: Rolls = (0..count).map(|_| roll_one(&mut rng, sides, faces, kind, None)).collect();

    let mut next = state.clone();
    next.record(LogEvent::Dice {
        kind: kind.to_string(),
        die: None,
        count,
        results: results.clone(),
    });
    trace!(kind, count, %salt, "roll_dice_by_kind");
    Ok((next, results))
}

/// Roll a specific die `count` times. The default salt is `dice:{die_id}`.
///
/// # Errors
///
/// `EntityNotFound` for a missing die.
pub fn roll_dice_by_id<X: Clone>(
    state: &GameState<X>,
    die: DieId,
    count: u32,
    salt: Option<&str>,
) -> EngineResult<(GameState<X>, Rolls)> {
    let spec = state.require_die(die)?;
    if count == 0 {
        return Ok((state.clone(), Rolls::new()));
    }

    let salt = salt.map_or_else(|| format!("dice:{die}"), str::to_string);
    let mut rng = GameRng::for_draw(state.ctx.seed, state.log.len(), &salt);
    let results: Rolls = (0..count)
        .map(|_| roll_one(&mut rng, spec.sides, &spec.faces, &spec.kind, Some(die)))
        .collect();

    let mut next = state.clone();
    next.record(LogEvent::Dice {
        kind: spec.kind.clone(),
        die: Some(die),
        count,
        results: results.clone(),
    });
    trace!(%die, count, %salt, "roll_dice_by_id");
    Ok((next, results))
}
