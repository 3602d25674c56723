//! Game state: the single value passed between engine functions.
//!
//! ## GameContext
//!
//! Sequencing information mutated only by phase/turn transitions:
//! seating order, current player, phase, turn counter, seed, winner.
//!
//! ## GameState
//!
//! The aggregate root:
//! - Context
//! - Players, pieces, zones, decks, dice (persistent ordered maps)
//! - Append-only log
//! - Id counter for pieces created mid-match
//! - `ext`: the concrete game's typed extension state (default `()`)
//!
//! Uses `im` persistent data structures, so cloning a state to derive the
//! next one shares everything that did not change.

use im::{OrdMap, Vector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::id::{DeckId, DieId, IdGen, PieceId, ZoneId};
use super::log::{LogEntry, LogEvent};
use super::player::{Player, PlayerId};
use crate::pieces::{Deck, Die, Piece};
use crate::zones::Zone;

/// Phase every freshly built state starts in.
pub const SETUP_PHASE: &str = "setup";

/// Phase entered when a definition declares no phases.
pub const DEFAULT_PHASE: &str = "play";

/// Outcome of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Single winner.
    Player(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (split pots, team games).
    Shared(Vec<PlayerId>),
}

impl Winner {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            Winner::Player(p) => p == player,
            Winner::Shared(ps) => ps.contains(player),
            Winner::Draw => false,
        }
    }
}

/// Sequencing context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    /// Seating order.
    pub players: Vec<PlayerId>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Current phase id (definition-declared, opaque to the engine).
    pub phase: String,

    /// Turn counter; starts at 0 and only grows.
    pub turn: u32,

    /// Match seed for all randomness.
    pub seed: u64,

    /// Set once the terminal predicate holds.
    pub winner: Option<Winner>,
}

impl GameContext {
    /// Seat index (0-based) of a player.
    #[must_use]
    pub fn seat_index(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// The player seated after `player`, wrapping past the last seat.
    ///
    /// An unseated player resolves to the first seat.
    #[must_use]
    pub fn next_in_seat_order(&self, player: &PlayerId) -> Option<&PlayerId> {
        if self.players.is_empty() {
            return None;
        }
        let next = self.seat_index(player).map_or(0, |i| (i + 1) % self.players.len());
        self.players.get(next)
    }
}

/// Full match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState<X = ()> {
    pub ctx: GameContext,
    pub players: OrdMap<PlayerId, Player>,
    pub pieces: OrdMap<PieceId, Piece>,
    pub zones: OrdMap<ZoneId, Zone>,
    pub decks: OrdMap<DeckId, Deck>,
    pub dice: OrdMap<DieId, Die>,
    pub log: Vector<LogEntry>,
    pub ids: IdGen,
    pub ext: X,
}

impl<X: Clone> GameState<X> {
    // === Lookups ===

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Get a piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Get a zone.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Get a deck.
    #[must_use]
    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.get(&id)
    }

    /// Get a die.
    #[must_use]
    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.get(&id)
    }

    /// Get a piece or fail with `EntityNotFound`.
    pub fn require_piece(&self, id: PieceId) -> EngineResult<&Piece> {
        self.piece(id).ok_or_else(|| EngineError::piece_not_found(id))
    }

    /// Get a zone or fail with `EntityNotFound`.
    pub fn require_zone(&self, id: ZoneId) -> EngineResult<&Zone> {
        self.zone(id).ok_or_else(|| EngineError::zone_not_found(id))
    }

    /// Get a deck or fail with `EntityNotFound`.
    pub fn require_deck(&self, id: DeckId) -> EngineResult<&Deck> {
        self.deck(id).ok_or_else(|| EngineError::deck_not_found(id))
    }

    /// Get a die or fail with `EntityNotFound`.
    pub fn require_die(&self, id: DieId) -> EngineResult<&Die> {
        self.die(id).ok_or_else(|| EngineError::die_not_found(id))
    }

    /// Get a player or fail with `EntityNotFound`.
    pub fn require_player(&self, id: &PlayerId) -> EngineResult<&Player> {
        self.player(id).ok_or_else(|| EngineError::player_not_found(id))
    }

    /// Owner of the piece in a board cell.
    #[must_use]
    pub fn cell_owner(&self, zone: ZoneId, index: usize) -> Option<&PlayerId> {
        let cells = self.zone(zone)?.cells()?;
        let piece = (*cells.get(index)?)?;
        self.piece(piece)?.owner.as_ref()
    }

    // === Context ===

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &PlayerId {
        &self.ctx.current_player
    }

    /// Is it this player's turn?
    #[must_use]
    pub fn is_current(&self, player: &PlayerId) -> bool {
        &self.ctx.current_player == player
    }

    // === Entity Creation ===

    /// Mint a piece id.
    pub fn alloc_piece_id(&mut self) -> PieceId {
        self.ids.piece()
    }

    /// Mint a zone id.
    pub fn alloc_zone_id(&mut self) -> ZoneId {
        self.ids.zone()
    }

    /// Insert a piece (replacing one with the same id).
    pub fn add_piece(&mut self, piece: Piece) -> PieceId {
        let id = piece.id;
        self.pieces.insert(id, piece);
        id
    }

    /// Mint an id and insert a plain piece.
    pub fn spawn_piece(&mut self, kind: impl Into<String>, owner: Option<PlayerId>) -> PieceId {
        let id = self.alloc_piece_id();
        self.add_piece(Piece::new(id, kind, owner))
    }

    /// Insert a zone (replacing one with the same id).
    pub fn add_zone(&mut self, zone: Zone) -> ZoneId {
        let id = zone.id;
        self.zones.insert(id, zone);
        id
    }

    // === Log ===

    /// Append a log entry stamped with the current turn.
    pub fn record(&mut self, event: LogEvent) {
        self.log.push_back(LogEntry::new(self.ctx.turn, event));
    }

    // === Extension ===

    /// Replace the extension state.
    #[must_use]
    pub fn with_ext(mut self, ext: X) -> Self {
        self.ext = ext;
        self
    }
}

impl<X: Serialize> GameState<X> {
    /// Encode the state as a compact binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

impl<X: DeserializeOwned> GameState<X> {
    /// Decode a snapshot produced by [`GameState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let players = vec![PlayerId::new("a"), PlayerId::new("b"), PlayerId::new("c")];
        let mut map = OrdMap::new();
        for (i, p) in players.iter().enumerate() {
            map.insert(p.clone(), Player::new(p.clone(), i as u32 + 1));
        }
        GameState {
            ctx: GameContext {
                current_player: players[0].clone(),
                players,
                phase: SETUP_PHASE.to_string(),
                turn: 0,
                seed: 7,
                winner: None,
            },
            players: map,
            pieces: OrdMap::new(),
            zones: OrdMap::new(),
            decks: OrdMap::new(),
            dice: OrdMap::new(),
            log: Vector::new(),
            ids: IdGen::new(),
            ext: (),
        }
    }

    #[test]
    fn test_winner_is_winner() {
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");

        assert!(Winner::Player(a.clone()).is_winner(&a));
        assert!(!Winner::Player(a.clone()).is_winner(&b));
        assert!(!Winner::Draw.is_winner(&a));
        assert!(Winner::Shared(vec![a.clone(), b.clone()]).is_winner(&b));
    }

    #[test]
    fn test_next_in_seat_order_wraps() {
        let s = state();
        let c = PlayerId::new("c");
        assert_eq!(s.ctx.next_in_seat_order(&PlayerId::new("a")), Some(&PlayerId::new("b")));
        assert_eq!(s.ctx.next_in_seat_order(&c), Some(&PlayerId::new("a")));
        assert_eq!(s.ctx.next_in_seat_order(&PlayerId::new("zz")), Some(&PlayerId::new("a")));
    }

    #[test]
    fn test_spawn_piece_mints_fresh_ids() {
        let mut s = state();
        let p1 = s.spawn_piece("mark", Some(PlayerId::new("a")));
        let p2 = s.spawn_piece("mark", None);

        assert_ne!(p1, p2);
        assert_eq!(s.require_piece(p1).map(|p| p.kind.as_str()), Ok("mark"));
        assert!(s.require_piece(PieceId(99)).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let s = state();
        let mut next = s.clone();
        next.spawn_piece("disc", None);

        assert!(s.pieces.is_empty());
        assert_eq!(next.pieces.len(), 1);
    }

    #[test]
    fn test_record_stamps_turn() {
        let mut s = state();
        s.ctx.turn = 4;
        s.record(LogEvent::Move { player: PlayerId::new("a"), name: "pass".into() });

        assert_eq!(s.log.len(), 1);
        assert_eq!(s.log[0].at_turn, 4);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut s = state();
        s.spawn_piece("chip", None);

        let bytes = s.to_snapshot().unwrap();
        let back: GameState = GameState::from_snapshot(&bytes).unwrap();
        assert_eq!(back, s);
    }
}
