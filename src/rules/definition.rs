//! The contract a concrete game implements.
//!
//! A game is a value type implementing [`GameDefinition`]: it owns its box,
//! declares phases and moves, and overrides whichever hooks it needs. The
//! runtime drives every transition through these hooks; the definition never
//! stores anything inside the state except through `ext` and the generic
//! attribute bags.
//!
//! ## Hook order inside `apply_move`
//!
//! ```text
//! sanitize -> on_before_action -> validate -> apply -> on_after_action
//!   -> (terminal? stamp winner, stop)
//!   -> (advance none? stop)
//!   -> on_turn_end -> on_between_players
//!   -> (is_round_over? on_round_end -> on_round_start)
//!   -> next_player -> on_turn_start
//! ```

use std::fmt::Debug;

use im::OrdMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::controls::Control;
use crate::builder::{GameBox, Settings};
use crate::core::{EngineResult, GameState, PlayerId, Winner};
use crate::pieces::AttributeValue;

/// Whether the runtime rotates the actor after a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advance {
    /// Run turn-end hooks and pass to the next player.
    #[default]
    Auto,
    /// Stop after the move; the move or the caller owns rotation.
    None,
}

/// A named move a player can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSpec {
    pub name: &'static str,
    pub advance: Advance,
}

impl MoveSpec {
    /// A move that rotates the actor.
    #[must_use]
    pub const fn auto(name: &'static str) -> Self {
        Self { name, advance: Advance::Auto }
    }

    /// A move that leaves rotation to someone else.
    #[must_use]
    pub const fn manual(name: &'static str) -> Self {
        Self { name, advance: Advance::None }
    }
}

/// Arguments passed to a move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveArgs(OrdMap<String, AttributeValue>);

impl MoveArgs {
    /// No arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Integer argument.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(AttributeValue::as_int)
    }

    /// Text argument.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_text)
    }

    /// Drop every key not in `keep`.
    #[must_use]
    pub fn retain_keys(self, keep: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| keep.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A pluggable rule set.
///
/// Every hook has an identity default, so a definition only writes what it
/// needs. Hooks receive the current state and return the next one; returning
/// an error aborts the enclosing runtime call with the caller's state intact.
pub trait GameDefinition: Send + Sync {
    /// Typed per-game state stored in `GameState::ext`.
    type Ext: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// What's in the box.
    fn game_box(&self) -> &GameBox;

    /// Seat bounds, templates, seed.
    fn settings(&self) -> &Settings {
        self.game_box().settings()
    }

    /// Declared phase ids in order. The first one is entered at match start.
    fn phases(&self) -> &[&'static str] {
        &[]
    }

    /// Declared moves.
    fn moves(&self) -> &[MoveSpec];

    /// Look up a declared move.
    fn find_move(&self, name: &str) -> Option<&MoveSpec> {
        self.moves().iter().find(|m| m.name == name)
    }

    // === Moves ===

    /// Normalize raw input. An `Err` rejects the move with that reason.
    fn sanitize(&self, _name: &str, args: MoveArgs) -> Result<MoveArgs, String> {
        Ok(args)
    }

    /// Check legality for the current player. `Some(reason)` rejects.
    fn validate(&self, _name: &str, _state: &GameState<Self::Ext>, _args: &MoveArgs) -> Option<String> {
        None
    }

    /// Produce the next state.
    fn apply(&self, name: &str, state: GameState<Self::Ext>, args: &MoveArgs) -> EngineResult<GameState<Self::Ext>>;

    // === Lifecycle ===

    /// Post-build setup (deal, shuffle, place).
    fn setup(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_phase_enter(&self, _phase: &str, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_phase_leave(&self, _phase: &str, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    // === Turns & Rounds ===

    fn on_round_start(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    /// Fired whenever a new actor is set.
    fn on_turn_start(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_before_action(
        &self,
        _name: &str,
        _args: &MoveArgs,
        state: GameState<Self::Ext>,
    ) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_after_action(
        &self,
        _name: &str,
        _args: &MoveArgs,
        state: GameState<Self::Ext>,
    ) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_turn_end(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn on_between_players(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    fn is_round_over(&self, _state: &GameState<Self::Ext>) -> bool {
        false
    }

    fn on_round_end(&self, state: GameState<Self::Ext>) -> EngineResult<GameState<Self::Ext>> {
        Ok(state)
    }

    /// Next actor. `None` falls back to seat rotation.
    fn next_player(&self, _state: &GameState<Self::Ext>) -> Option<PlayerId> {
        None
    }

    // === Predicates ===

    fn is_terminal(&self, _state: &GameState<Self::Ext>) -> bool {
        false
    }

    fn winner(&self, _state: &GameState<Self::Ext>) -> Option<Winner> {
        None
    }

    /// Actions currently offered to `player`. Advisory; `validate` decides.
    fn controls(&self, _state: &GameState<Self::Ext>, _player: &PlayerId) -> Vec<Control> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_args() {
        let args = MoveArgs::new().with("index", 4).with("note", "hi");
        assert_eq!(args.get_int("index"), Some(4));
        assert_eq!(args.get_text("note"), Some("hi"));
        assert_eq!(args.get_int("note"), None);
        assert_eq!(args.len(), 2);

        let trimmed = args.retain_keys(&["index"]);
        assert_eq!(trimmed.len(), 1);
        assert!(trimmed.get("note").is_none());
    }

    #[test]
    fn test_move_args_json() {
        let args: MoveArgs = serde_json::from_str(r#"{"col":{"Int":3}}"#).unwrap();
        assert_eq!(args.get_int("col"), Some(3));
    }

    #[test]
    fn test_move_spec() {
        assert_eq!(MoveSpec::auto("place").advance, Advance::Auto);
        assert_eq!(MoveSpec::manual("next_phase").advance, Advance::None);
    }
}
