//! Registry of rule sets by settings id.
//!
//! Definitions have different extension types, so the registry stores them
//! behind [`ErasedGame`], which speaks in binary snapshots
//! ([`GameState::to_snapshot`]). A host can then route "tictactoe" or
//! "poker-nlh" requests without knowing the concrete types.
//!
//! ## Example
//!
//! ```
//! use rust_tabletop::core::PlayerId;
//! use rust_tabletop::rules::{GameRegistry, MoveArgs};
//!
//! let registry = GameRegistry::builtin();
//! let seats = [PlayerId::new("x"), PlayerId::new("o")];
//!
//! let snap = registry.create("tictactoe", &seats, None).unwrap();
//! let snap = registry.apply("tictactoe", &snap, "place", MoveArgs::new().with("index", 4)).unwrap();
//! let controls = registry.controls("tictactoe", &snap, &PlayerId::new("o")).unwrap();
//! assert!(!controls.is_empty());
//! ```

use rustc_hash::FxHashMap;

use super::controls::Control;
use super::definition::{GameDefinition, MoveArgs};
use super::runtime::{self, MatchStatus};
use crate::builder::{MatchSeed, Settings};
use crate::core::{EngineError, GameState, PlayerId};
use crate::games::{Connect4, PokerNlh, TicTacToe};

/// Failures of the erased surface.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A definition with its extension type erased.
pub trait ErasedGame: Send + Sync {
    fn settings(&self) -> &Settings;

    fn create(&self, players: &[PlayerId], seed: Option<MatchSeed>) -> Result<Vec<u8>, RegistryError>;

    fn apply(&self, snapshot: &[u8], name: &str, args: MoveArgs) -> Result<Vec<u8>, RegistryError>;

    fn end_turn(&self, snapshot: &[u8]) -> Result<Vec<u8>, RegistryError>;

    fn controls(&self, snapshot: &[u8], player: &PlayerId) -> Result<Vec<Control>, RegistryError>;

    fn status(&self, snapshot: &[u8]) -> Result<MatchStatus, RegistryError>;
}

impl<D: GameDefinition> ErasedGame for D {
    fn settings(&self) -> &Settings {
        GameDefinition::settings(self)
    }

    fn create(&self, players: &[PlayerId], seed: Option<MatchSeed>) -> Result<Vec<u8>, RegistryError> {
        let state = runtime::create_match(self, players, seed)?;
        Ok(state.to_snapshot()?)
    }

    fn apply(&self, snapshot: &[u8], name: &str, args: MoveArgs) -> Result<Vec<u8>, RegistryError> {
        let state = GameState::<D::Ext>::from_snapshot(snapshot)?;
        let next = runtime::apply_move(self, &state, name, args)?;
        Ok(next.to_snapshot()?)
    }

    fn end_turn(&self, snapshot: &[u8]) -> Result<Vec<u8>, RegistryError> {
        let state = GameState::<D::Ext>::from_snapshot(snapshot)?;
        let next = runtime::end_turn(&state, self)?;
        Ok(next.to_snapshot()?)
    }

    fn controls(&self, snapshot: &[u8], player: &PlayerId) -> Result<Vec<Control>, RegistryError> {
        let state = GameState::<D::Ext>::from_snapshot(snapshot)?;
        Ok(runtime::get_controls(self, &state, player))
    }

    fn status(&self, snapshot: &[u8]) -> Result<MatchStatus, RegistryError> {
        let state = GameState::<D::Ext>::from_snapshot(snapshot)?;
        Ok(runtime::derive_status(self, &state))
    }
}

/// Rule sets keyed by settings id.
#[derive(Default)]
pub struct GameRegistry {
    games: FxHashMap<String, Box<dyn ErasedGame>>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the reference games.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TicTacToe::new());
        registry.register(Connect4::new());
        registry.register(PokerNlh::new());
        registry
    }

    /// Register a definition under its settings id, replacing any previous one.
    pub fn register<D: GameDefinition + 'static>(&mut self, def: D) {
        let id = GameDefinition::settings(&def).id.clone();
        self.games.insert(id, Box::new(def));
    }

    /// Look up a game.
    pub fn get(&self, id: &str) -> Result<&dyn ErasedGame, RegistryError> {
        self.games
            .get(id)
            .map(|game| &**game)
            .ok_or_else(|| RegistryError::UnknownGame(id.to_string()))
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.games.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn create(&self, id: &str, players: &[PlayerId], seed: Option<MatchSeed>) -> Result<Vec<u8>, RegistryError> {
        self.get(id)?.create(players, seed)
    }

    pub fn apply(&self, id: &str, snapshot: &[u8], name: &str, args: MoveArgs) -> Result<Vec<u8>, RegistryError> {
        self.get(id)?.apply(snapshot, name, args)
    }

    pub fn end_turn(&self, id: &str, snapshot: &[u8]) -> Result<Vec<u8>, RegistryError> {
        self.get(id)?.end_turn(snapshot)
    }

    pub fn controls(&self, id: &str, snapshot: &[u8], player: &PlayerId) -> Result<Vec<Control>, RegistryError> {
        self.get(id)?.controls(snapshot, player)
    }

    pub fn status(&self, id: &str, snapshot: &[u8]) -> Result<MatchStatus, RegistryError> {
        self.get(id)?.status(snapshot)
    }
}

impl std::fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRegistry").field("games", &self.ids()).finish()
    }
}
