//! Connect Four: drop discs into a 6x7 grid, four in a row wins.

use im::OrdMap;

use crate::builder::{GameBox, PlayerSlots, Settings};
use crate::core::{EngineResult, GameState, PlayerId, Winner, ZoneId};
use crate::ops;
use crate::rules::{Control, GameDefinition, MoveArgs, MoveSpec};
use crate::zones::{Anchor, UiLayout, Zone};

/// Grid rows; row 0 is the top.
pub const ROWS: usize = 6;
/// Grid columns.
pub const COLS: usize = 7;

const RUN: usize = 4;

// (row step, col step): horizontal, vertical, both diagonals
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

const MOVES: &[MoveSpec] = &[MoveSpec::auto("drop"), MoveSpec::manual("restart")];

/// Connect Four rule set.
#[derive(Clone, Debug)]
pub struct Connect4 {
    game_box: GameBox,
    board: ZoneId,
}

impl Connect4 {
    #[must_use]
    pub fn new() -> Self {
        let settings = Settings::new("connect4", PlayerSlots::exactly(2))
            .with_name("Connect Four")
            .with_spectators();
        let mut game_box = GameBox::new(settings);
        let board = game_box.declare_zone(|id| Zone::board(id, "Grid", ROWS, COLS).at(UiLayout::at(Anchor::Center)));
        Self { game_box, board }
    }

    #[must_use]
    pub fn board(&self) -> ZoneId {
        self.board
    }

    /// Lowest empty row of `col`, or `None` when the column is full.
    #[must_use]
    pub fn landing_row(&self, state: &GameState, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        let cells = state.zone(self.board)?.cells()?;
        (0..ROWS).rev().find(|row| cells[row * COLS + col].is_none())
    }

    fn column_full(&self, state: &GameState, col: usize) -> bool {
        state.cell_owner(self.board, col).is_some()
    }

    fn owner_at<'a>(&self, state: &'a GameState, row: isize, col: isize) -> Option<&'a PlayerId> {
        let in_bounds = (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col);
        if !in_bounds {
            return None;
        }
        state.cell_owner(self.board, row as usize * COLS + col as usize)
    }

    /// Owner of any run of four.
    #[must_use]
    pub fn run_winner(&self, state: &GameState) -> Option<PlayerId> {
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                let Some(owner) = self.owner_at(state, row, col) else {
                    continue;
                };
                let wins = DIRECTIONS.iter().any(|&(dr, dc)| {
                    (1..RUN as isize).all(|k| self.owner_at(state, row + dr * k, col + dc * k) == Some(owner))
                });
                if wins {
                    return Some(owner.clone());
                }
            }
        }
        None
    }

    fn is_full(&self, state: &GameState) -> bool {
        (0..COLS).all(|col| self.column_full(state, col))
    }

    fn column_arg(args: &MoveArgs) -> Option<usize> {
        args.get_int("col")
            .and_then(|c| usize::try_from(c).ok())
            .filter(|&c| c < COLS)
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDefinition for Connect4 {
    type Ext = ();

    fn game_box(&self) -> &GameBox {
        &self.game_box
    }

    fn moves(&self) -> &[MoveSpec] {
        MOVES
    }

    fn sanitize(&self, name: &str, args: MoveArgs) -> Result<MoveArgs, String> {
        match name {
            "drop" => Ok(args.retain_keys(&["col"])),
            _ => Ok(MoveArgs::new()),
        }
    }

    fn validate(&self, name: &str, state: &GameState, args: &MoveArgs) -> Option<String> {
        if name != "drop" {
            return None;
        }
        if self.is_terminal(state) {
            return Some("Game over.".into());
        }
        match Self::column_arg(args) {
            None => Some("Invalid column.".into()),
            Some(col) if self.column_full(state, col) => Some("Column full.".into()),
            Some(_) => None,
        }
    }

    fn apply(&self, name: &str, mut state: GameState, args: &MoveArgs) -> EngineResult<GameState> {
        match name {
            "drop" => {
                let col = Self::column_arg(args).unwrap_or_default();
                let Some(row) = self.landing_row(&state, col) else {
                    return Ok(state);
                };
                let owner = state.ctx.current_player.clone();
                let disc = state.spawn_piece("disc", Some(owner));
                ops::place(&state, disc, self.board, row * COLS + col)
            }
            "restart" => {
                state = ops::clear_board(&state, self.board)?;
                state.pieces = OrdMap::new();
                state.ctx.winner = None;
                if let Some(first) = state.ctx.players.first().cloned() {
                    state.ctx.current_player = first;
                }
                Ok(state)
            }
            _ => Ok(state),
        }
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.run_winner(state).is_some() || self.is_full(state)
    }

    fn winner(&self, state: &GameState) -> Option<Winner> {
        Some(self.run_winner(state).map_or(Winner::Draw, Winner::Player))
    }

    fn controls(&self, state: &GameState, player: &PlayerId) -> Vec<Control> {
        let over = self.is_terminal(state);
        let mine = state.is_current(player);

        let mut controls: Vec<Control> = (0..COLS)
            .map(|col| {
                let reason = if over {
                    Some("Game over")
                } else if !mine {
                    Some("Not your turn")
                } else if self.column_full(state, col) {
                    Some("Column full")
                } else {
                    None
                };
                Control::new(format!("c4:drop-{col}"), format!("Drop {}", col + 1), "drop")
                    .with_args(MoveArgs::new().with("col", col as i64))
                    .disabled_if(reason)
                    .in_group("primary")
            })
            .collect();

        controls.push(Control::new("c4:restart", "Restart", "restart").in_group("utility"));
        controls
    }
}
