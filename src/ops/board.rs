//! Board operations: place, clear, move.
//!
//! Cells are addressed by row-major index (`row * cols + col`).

use tracing::trace;

use crate::core::{EngineError, EngineResult, GameState, PieceId, ZoneId};
use crate::zones::{Zone, ZoneShape};

/// Cells of a board zone.
pub fn cells<X: Clone>(state: &GameState<X>, board: ZoneId) -> EngineResult<&[Option<PieceId>]> {
    state.require_zone(board)?.cells().ok_or(EngineError::NotABoard(board))
}

fn board_cells_mut(zone: &mut Zone) -> EngineResult<&mut Vec<Option<PieceId>>> {
    match &mut zone.shape {
        ZoneShape::Board { cells, .. } => Ok(cells),
        ZoneShape::Stack { .. } => Err(EngineError::NotABoard(zone.id)),
    }
}

fn check_index(board: ZoneId, index: usize, len: usize) -> EngineResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(EngineError::IndexOutOfBounds { zone: board, index, len })
    }
}

/// Place a piece into an empty cell.
///
/// The zone rule applies to boards too: `allow_kinds` filters the piece kind
/// and `max_items` caps the number of occupied cells.
///
/// # Errors
///
/// `EntityNotFound`, `NotABoard`, `IndexOutOfBounds`, `CellOccupied`,
/// `KindNotAllowed`, `ZoneFull`.
pub fn place<X: Clone>(state: &GameState<X>, piece: PieceId, board: ZoneId, index: usize) -> EngineResult<GameState<X>> {
    let kind = state.require_piece(piece)?.kind.clone();
    let zone = state.require_zone(board)?;
    let current = cells(state, board)?;
    check_index(board, index, current.len())?;
    if current[index].is_some() {
        return Err(EngineError::CellOccupied { zone: board, index });
    }
    if let Some(rule) = &zone.rule {
        if !rule.admits(&kind) {
            return Err(EngineError::KindNotAllowed { zone: board, kind });
        }
        if let Some(max) = rule.max_items.filter(|_| rule.is_full(zone.len())) {
            return Err(EngineError::ZoneFull { zone: board, max });
        }
    }

    let mut next = state.clone();
    if let Some(zone) = next.zones.get_mut(&board) {
        board_cells_mut(zone)?[index] = Some(piece);
    }
    trace!(%piece, %board, index, "place");
    Ok(next)
}

/// Empty a cell. Clearing an empty cell is allowed.
///
/// # Errors
///
/// `EntityNotFound`, `NotABoard`, `IndexOutOfBounds`.
pub fn clear<X: Clone>(state: &GameState<X>, board: ZoneId, index: usize) -> EngineResult<GameState<X>> {
    let len = cells(state, board)?.len();
    check_index(board, index, len)?;

    let mut next = state.clone();
    if let Some(zone) = next.zones.get_mut(&board) {
        board_cells_mut(zone)?[index] = None;
    }
    trace!(%board, index, "clear");
    Ok(next)
}

/// Move the piece at `from` to the empty cell `to`.
///
/// # Errors
///
/// `EntityNotFound`, `NotABoard`, `IndexOutOfBounds`, `SourceEmpty`,
/// `CellOccupied`.
pub fn move_piece<X: Clone>(state: &GameState<X>, board: ZoneId, from: usize, to: usize) -> EngineResult<GameState<X>> {
    let current = cells(state, board)?;
    check_index(board, from, current.len())?;
    check_index(board, to, current.len())?;
    if current[from].is_none() {
        return Err(EngineError::SourceEmpty { zone: board, index: from });
    }
    if current[to].is_some() {
        return Err(EngineError::CellOccupied { zone: board, index: to });
    }

    let mut next = state.clone();
    if let Some(zone) = next.zones.get_mut(&board) {
        let cells = board_cells_mut(zone)?;
        let moved = cells[from].take();
        cells[to] = moved;
    }
    trace!(%board, from, to, "move");
    Ok(next)
}

/// Clear every cell of a board.
///
/// # Errors
///
/// `EntityNotFound`, `NotABoard`.
pub fn clear_board<X: Clone>(state: &GameState<X>, board: ZoneId) -> EngineResult<GameState<X>> {
    cells(state, board)?;

    let mut next = state.clone();
    if let Some(zone) = next.zones.get_mut(&board) {
        zone.clear_all();
    }
    Ok(next)
}
