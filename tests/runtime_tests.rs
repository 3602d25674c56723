//! Runtime orchestration tests.
//!
//! A recording definition logs every hook it sees into its extension, so
//! the order in which `create_match`, `apply_move`, `end_turn` and
//! `set_phase` drive a definition can be checked end to end.

use rust_tabletop::builder::{GameBox, MatchSeed, PlayerSlots, Settings};
use rust_tabletop::core::{EngineError, EngineResult, GameState, LogEvent, PlayerId, Winner};
use rust_tabletop::rules::{
    apply_move, create_match, derive_status, end_turn, set_phase, GameDefinition, MatchStatus, MoveArgs, MoveSpec,
};

type Trace = Vec<String>;

struct Recorder {
    game_box: GameBox,
}

const MOVES: &[MoveSpec] = &[MoveSpec::auto("act"), MoveSpec::manual("stay"), MoveSpec::auto("finish")];

impl Recorder {
    fn new() -> Self {
        Self {
            game_box: GameBox::new(Settings::new("recorder", PlayerSlots::new(1, 8, 2))),
        }
    }
}

fn note(mut state: GameState<Trace>, entry: impl Into<String>) -> EngineResult<GameState<Trace>> {
    state.ext.push(entry.into());
    Ok(state)
}

impl GameDefinition for Recorder {
    type Ext = Trace;

    fn game_box(&self) -> &GameBox {
        &self.game_box
    }

    fn phases(&self) -> &[&'static str] {
        &["alpha", "beta"]
    }

    fn moves(&self) -> &[MoveSpec] {
        MOVES
    }

    fn validate(&self, _name: &str, _state: &GameState<Trace>, args: &MoveArgs) -> Option<String> {
        args.get("veto").map(|_| "vetoed".to_string())
    }

    fn apply(&self, name: &str, state: GameState<Trace>, _args: &MoveArgs) -> EngineResult<GameState<Trace>> {
        note(state, format!("apply:{name}"))
    }

    fn setup(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "setup")
    }

    fn on_phase_enter(&self, phase: &str, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, format!("enter:{phase}"))
    }

    fn on_phase_leave(&self, phase: &str, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, format!("leave:{phase}"))
    }

    fn on_round_start(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "round_start")
    }

    fn on_turn_start(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "turn_start")
    }

    fn on_before_action(
        &self,
        name: &str,
        _args: &MoveArgs,
        state: GameState<Trace>,
    ) -> EngineResult<GameState<Trace>> {
        note(state, format!("before:{name}"))
    }

    fn on_after_action(
        &self,
        name: &str,
        _args: &MoveArgs,
        state: GameState<Trace>,
    ) -> EngineResult<GameState<Trace>> {
        note(state, format!("after:{name}"))
    }

    fn on_turn_end(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "turn_end")
    }

    fn on_between_players(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "between")
    }

    // Every seat has acted once the last seat finishes
    fn is_round_over(&self, state: &GameState<Trace>) -> bool {
        state.ctx.seat_index(&state.ctx.current_player) == Some(state.ctx.players.len() - 1)
    }

    fn on_round_end(&self, state: GameState<Trace>) -> EngineResult<GameState<Trace>> {
        note(state, "round_end")
    }

    fn is_terminal(&self, state: &GameState<Trace>) -> bool {
        state.ext.iter().any(|e| e == "apply:finish")
    }

    fn winner(&self, state: &GameState<Trace>) -> Option<Winner> {
        Some(Winner::Player(state.ctx.current_player.clone()))
    }
}

fn seats(n: usize) -> Vec<PlayerId> {
    (1..=n).map(|i| PlayerId::new(format!("p{i}"))).collect()
}

fn tail(state: &GameState<Trace>, from: usize) -> Vec<&str> {
    state.ext[from..].iter().map(String::as_str).collect()
}

#[test]
fn test_create_match_hook_order() {
    let def = Recorder::new();
    let state = create_match(&def, &seats(2), None).unwrap();

    assert_eq!(tail(&state, 0), vec!["setup", "enter:alpha", "round_start", "turn_start"]);
    assert_eq!(state.ctx.phase, "alpha");
    assert_eq!(state.ctx.turn, 0);
    assert_eq!(state.ctx.current_player, PlayerId::new("p1"));
    assert!(state.log.is_empty());
}

#[test]
fn test_apply_move_hook_order() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(3), None).unwrap();
    let mark = s0.ext.len();

    let s1 = apply_move(&def, &s0, "act", MoveArgs::new()).unwrap();
    assert_eq!(
        tail(&s1, mark),
        vec!["before:act", "apply:act", "after:act", "turn_end", "between", "turn_start"]
    );
    assert_eq!(s1.ctx.current_player, PlayerId::new("p2"));
    assert_eq!(s1.ctx.turn, 1);
}

#[test]
fn test_round_boundary_hooks() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(2), None).unwrap();
    let s1 = apply_move(&def, &s0, "act", MoveArgs::new()).unwrap();
    let mark = s1.ext.len();

    let s2 = apply_move(&def, &s1, "act", MoveArgs::new()).unwrap();
    assert_eq!(
        tail(&s2, mark),
        vec!["before:act", "apply:act", "after:act", "turn_end", "between", "round_end", "round_start", "turn_start"]
    );
    assert_eq!(s2.ctx.current_player, PlayerId::new("p1"));
}

#[test]
fn test_manual_move_keeps_actor() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(2), None).unwrap();
    let mark = s0.ext.len();

    let s1 = apply_move(&def, &s0, "stay", MoveArgs::new()).unwrap();
    assert_eq!(tail(&s1, mark), vec!["before:stay", "apply:stay", "after:stay"]);
    assert_eq!(s1.ctx.current_player, s0.ctx.current_player);
    assert_eq!(s1.ctx.turn, s0.ctx.turn);

    let s2 = end_turn(&s1, &def).unwrap();
    assert_eq!(s2.ctx.current_player, PlayerId::new("p2"));
    assert_eq!(tail(&s2, s1.ext.len()), vec!["turn_start"]);
}

#[test]
fn test_rejection_leaves_state_untouched() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(2), None).unwrap();
    let before = s0.clone();

    let err = apply_move(&def, &s0, "act", MoveArgs::new().with("veto", true)).unwrap_err();
    assert_eq!(err, EngineError::invalid_move("act", "vetoed"));
    assert_eq!(s0, before);

    let err = apply_move(&def, &s0, "teleport", MoveArgs::new()).unwrap_err();
    assert_eq!(err, EngineError::UnknownMove("teleport".into()));
    assert_eq!(s0, before);
}

#[test]
fn test_terminal_stops_rotation_and_absorbs() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(3), None).unwrap();
    let s1 = apply_move(&def, &s0, "act", MoveArgs::new()).unwrap();
    let mark = s1.ext.len();

    let done = apply_move(&def, &s1, "finish", MoveArgs::new()).unwrap();
    assert_eq!(tail(&done, mark), vec!["before:finish", "apply:finish", "after:finish"]);
    assert_eq!(done.ctx.current_player, PlayerId::new("p2"));
    assert_eq!(done.ctx.winner, Some(Winner::Player(PlayerId::new("p2"))));
    assert_eq!(derive_status(&def, &done), MatchStatus::Finished);

    assert_eq!(end_turn(&done, &def).unwrap(), done);
}

#[test]
fn test_set_phase_hooks() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(2), None).unwrap();
    let mark = s0.ext.len();

    let s1 = set_phase(&def, &s0, "beta").unwrap();
    assert_eq!(tail(&s1, mark), vec!["leave:alpha", "enter:beta"]);
    assert_eq!(s1.ctx.phase, "beta");
    assert_eq!(s1.ctx.turn, s0.ctx.turn);
}

#[test]
fn test_move_log_records_actor() {
    let def = Recorder::new();
    let s0 = create_match(&def, &seats(2), None).unwrap();
    let s1 = apply_move(&def, &s0, "act", MoveArgs::new()).unwrap();
    let s2 = apply_move(&def, &s1, "stay", MoveArgs::new()).unwrap();

    let moves: Vec<(String, String, u32)> = s2
        .log
        .iter()
        .filter_map(|entry| match &entry.event {
            LogEvent::Move { player, name } => Some((player.to_string(), name.clone(), entry.at_turn)),
            _ => None,
        })
        .collect();
    assert_eq!(
        moves,
        vec![("p1".to_string(), "act".to_string(), 0), ("p2".to_string(), "stay".to_string(), 1)]
    );
}

/// Seat rotation has no two-player assumption.
#[test]
fn test_rotation_n_players() {
    let def = Recorder::new();
    for n in 1..=8 {
        let players = seats(n);
        let mut state = create_match(&def, &players, None).unwrap();
        for k in 1..=2 * n {
            state = apply_move(&def, &state, "act", MoveArgs::new()).unwrap();
            assert_eq!(state.ctx.current_player, players[k % n], "n = {n}, k = {k}");
            assert_eq!(state.ctx.turn as usize, k);
        }
    }
}

#[test]
fn test_seat_bounds() {
    let def = Recorder::new();
    assert!(matches!(create_match(&def, &[], None), Err(EngineError::Config(_))));
    assert!(matches!(create_match(&def, &seats(9), None), Err(EngineError::Config(_))));

    let dup = [PlayerId::new("a"), PlayerId::new("a")];
    assert!(matches!(create_match(&def, &dup, None), Err(EngineError::Config(_))));
}

#[test]
fn test_seed_resolution() {
    let def = Recorder::new();
    let default = create_match(&def, &seats(2), None).unwrap();
    assert_eq!(default.ctx.seed, rust_tabletop::rules::DEFAULT_SEED);

    let numeric = create_match(&def, &seats(2), Some(MatchSeed::Num(1234))).unwrap();
    assert_eq!(numeric.ctx.seed, 1234);

    let text = create_match(&def, &seats(2), Some(MatchSeed::from("table-7"))).unwrap();
    assert_eq!(text.ctx.seed, rust_tabletop::core::seed_from_str("table-7"));
}
