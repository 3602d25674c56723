//! Tic-tac-toe on a 3x3 board.
//!
//! Marks are created on demand: `place` mints a `mark` piece owned by the
//! current player and puts it on the board.

use im::OrdMap;

use crate::builder::{GameBox, PlayerSlots, Settings};
use crate::core::{EngineResult, GameState, PlayerId, Winner, ZoneId};
use crate::ops;
use crate::rules::{Control, GameDefinition, MoveArgs, MoveSpec};
use crate::zones::Zone;

const SIZE: usize = 3;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const PHASES: &[&str] = &["play"];

// Restart leaves seating to itself: it puts the first seat back in charge.
const MOVES: &[MoveSpec] = &[MoveSpec::auto("place"), MoveSpec::auto("pass"), MoveSpec::manual("restart")];

/// Tic-tac-toe rule set.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    game_box: GameBox,
    board: ZoneId,
}

impl TicTacToe {
    /// Create the rule set.
    #[must_use]
    pub fn new() -> Self {
        let settings = Settings::new("tictactoe", PlayerSlots::exactly(2))
            .with_name("Tic-Tac-Toe")
            .with_spectators();
        let mut game_box = GameBox::new(settings);
        let board = game_box.declare_zone(|id| {
            let mut zone = Zone::board(id, "Board", SIZE, SIZE);
            zone.attrs.insert("click_move".into(), "place".into());
            zone.attrs.insert("click_arg".into(), "index".into());
            zone
        });
        Self { game_box, board }
    }

    /// Id of the board zone.
    #[must_use]
    pub fn board(&self) -> ZoneId {
        self.board
    }

    /// Owner of a completed line, if any.
    #[must_use]
    pub fn line_winner(&self, state: &GameState) -> Option<PlayerId> {
        LINES.iter().find_map(|line| {
            let owner = state.cell_owner(self.board, line[0])?;
            line[1..]
                .iter()
                .all(|&i| state.cell_owner(self.board, i) == Some(owner))
                .then(|| owner.clone())
        })
    }

    fn is_full(&self, state: &GameState) -> bool {
        state
            .zone(self.board)
            .and_then(Zone::cells)
            .is_some_and(|cells| cells.iter().all(Option::is_some))
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDefinition for TicTacToe {
    type Ext = ();

    fn game_box(&self) -> &GameBox {
        &self.game_box
    }

    fn phases(&self) -> &[&'static str] {
        PHASES
    }

    fn moves(&self) -> &[MoveSpec] {
        MOVES
    }

    fn sanitize(&self, name: &str, args: MoveArgs) -> Result<MoveArgs, String> {
        match name {
            "place" => Ok(args.retain_keys(&["index"])),
            _ => Ok(MoveArgs::new()),
        }
    }

    fn validate(&self, name: &str, state: &GameState, args: &MoveArgs) -> Option<String> {
        if name == "restart" {
            return None;
        }
        if self.is_terminal(state) {
            return Some("Game over.".into());
        }
        if name != "place" {
            return None;
        }
        let Ok(cells) = ops::cells(state, self.board) else {
            return Some("No board.".into());
        };
        let index = args
            .get_int("index")
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < cells.len());
        match index {
            None => Some("Invalid index.".into()),
            Some(i) if cells[i].is_some() => Some("Cell occupied.".into()),
            Some(_) => None,
        }
    }

    fn apply(&self, name: &str, mut state: GameState, args: &MoveArgs) -> EngineResult<GameState> {
        match name {
            "place" => {
                let index = args.get_int("index").and_then(|i| usize::try_from(i).ok()).unwrap_or_default();
                let owner = state.ctx.current_player.clone();
                let mark = state.spawn_piece("mark", Some(owner));
                ops::place(&state, mark, self.board, index)
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
        self.line_winner(state).is_some() || self.is_full(state)
    }

    fn winner(&self, state: &GameState) -> Option<Winner> {
        Some(self.line_winner(state).map_or(Winner::Draw, Winner::Player))
    }

    fn controls(&self, state: &GameState, player: &PlayerId) -> Vec<Control> {
        let mut controls = Vec::new();
        if !self.is_terminal(state) && state.is_current(player) {
            // Board clicks drive "place"; no button needed for it
            controls.push(Control::new("ttt:pass", "Pass Turn", "pass"));
        }
        controls.push(Control::new("ttt:restart", "Restart", "restart"));
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply_move, create_match};

    fn place(def: &TicTacToe, state: &GameState, index: i64) -> GameState {
        apply_move(def, state, "place", MoveArgs::new().with("index", index)).unwrap()
    }

    fn start(def: &TicTacToe) -> GameState {
        create_match(def, &[PlayerId::new("x"), PlayerId::new("o")], None).unwrap()
    }

    #[test]
    fn test_place_alternates() {
        let def = TicTacToe::new();
        let s0 = start(&def);
        assert_eq!(s0.ctx.phase, "play");

        let s1 = place(&def, &s0, 4);
        assert_eq!(s1.cell_owner(def.board(), 4), Some(&PlayerId::new("x")));
        assert_eq!(s1.ctx.current_player, PlayerId::new("o"));
    }

    #[test]
    fn test_validation_reasons() {
        let def = TicTacToe::new();
        let s1 = place(&def, &start(&def), 0);

        let reason = |args: MoveArgs| match apply_move(&def, &s1, "place", args) {
            Err(crate::core::EngineError::InvalidMove { reason, .. }) => reason,
            other => panic!("expected rejection, got {other:?}"),
        };
        assert_eq!(reason(MoveArgs::new().with("index", 0)), "Cell occupied.");
        assert_eq!(reason(MoveArgs::new().with("index", 9)), "Invalid index.");
        assert_eq!(reason(MoveArgs::new().with("index", -1)), "Invalid index.");
        assert_eq!(reason(MoveArgs::new()), "Invalid index.");
    }

    #[test]
    fn test_top_row_wins() {
        let def = TicTacToe::new();
        let mut s = start(&def);
        // x: 0, 1, 2   o: 3, 4
        for index in [0, 3, 1, 4, 2] {
            s = place(&def, &s, index);
        }
        assert!(def.is_terminal(&s));
        assert_eq!(s.ctx.winner, Some(Winner::Player(PlayerId::new("x"))));
        assert_eq!(s.ctx.current_player, PlayerId::new("x"));

        let err = apply_move(&def, &s, "place", MoveArgs::new().with("index", 8)).unwrap_err();
        assert_eq!(err, crate::core::EngineError::invalid_move("place", "Game over."));
    }

    #[test]
    fn test_pass_rejected_after_win() {
        let def = TicTacToe::new();
        let mut s = start(&def);
        for index in [0, 3, 1, 4, 2] {
            s = place(&def, &s, index);
        }
        let err = apply_move(&def, &s, "pass", MoveArgs::new()).unwrap_err();
        assert_eq!(err, crate::core::EngineError::invalid_move("pass", "Game over."));

        // restart stays available
        let fresh = apply_move(&def, &s, "restart", MoveArgs::new()).unwrap();
        assert!(fresh.ctx.winner.is_none());
    }

    #[test]
    fn test_full_board_draw() {
        let def = TicTacToe::new();
        let mut s = start(&def);
        // x o x / x o o / o x x
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            s = place(&def, &s, index);
        }
        assert_eq!(s.ctx.winner, Some(Winner::Draw));
    }

    #[test]
    fn test_restart() {
        let def = TicTacToe::new();
        let s1 = place(&def, &start(&def), 4);
        let s2 = apply_move(&def, &s1, "restart", MoveArgs::new()).unwrap();

        assert!(s2.zone(def.board()).unwrap().is_empty());
        assert!(s2.pieces.is_empty());
        assert_eq!(s2.ctx.current_player, PlayerId::new("x"));
        assert!(s2.ctx.turn >= s1.ctx.turn);
    }

    #[test]
    fn test_controls() {
        let def = TicTacToe::new();
        let s = start(&def);

        let mine = def.controls(&s, &PlayerId::new("x"));
        assert_eq!(mine.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["ttt:pass", "ttt:restart"]);

        let theirs = def.controls(&s, &PlayerId::new("o"));
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].move_name, "restart");
    }
}
