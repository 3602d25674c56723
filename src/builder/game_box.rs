//! The game box: everything a match starts with.
//!
//! Declaring a board, zone, deck or die mints its id right away, so a
//! definition can keep the id and refer to the object in its moves. Pieces
//! from templates get their ids when a state is built.
//!
//! ## Example
//!
//! ```
//! use rust_tabletop::builder::{GameBox, PieceTemplate, PlayerSlots, Settings};
//! use rust_tabletop::core::{GameState, PlayerId};
//!
//! let settings = Settings::new("demo", PlayerSlots::new(2, 2, 2))
//!     .with_piece(PieceTemplate::new("mark").per_player(1));
//! let mut game_box = GameBox::new(settings);
//! let board = game_box.add_board("Board", 3, 3);
//!
//! let seats = [PlayerId::new("a"), PlayerId::new("b")];
//! let state: GameState = game_box.build_state(&seats, 1).unwrap();
//!
//! assert_eq!(state.ctx.phase, "setup");
//! assert_eq!(state.zone(board).and_then(|z| z.cells()).map(<[_]>::len), Some(9));
//! assert_eq!(state.pieces.len(), 2);
//! ```

use im::{OrdMap, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::settings::Settings;
use crate::core::{
    ConfigError, DeckId, DieId, GameContext, GameState, IdGen, PlayerId, PlayerPreset, ZoneId,
    SETUP_PHASE,
};
use crate::pieces::{Deck, Die, Piece};
use crate::zones::{StackKind, Zone, ZoneRule};

/// Declarative match contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameBox {
    settings: Settings,
    presets: Vec<PlayerPreset>,
    zones: Vec<Zone>,
    decks: Vec<Deck>,
    dice: Vec<Die>,
    // Reserved at creation so template dice sort ahead of authored ones
    template_dice: Vec<DieId>,
    ids: IdGen,
}

impl GameBox {
    /// Create an empty box.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let mut ids = IdGen::new();
        let template_dice = settings
            .dice
            .iter()
            .flat_map(|tpl| 0..tpl.count)
            .map(|_| ids.die())
            .collect();
        Self {
            settings,
            presets: Vec::new(),
            zones: Vec::new(),
            decks: Vec::new(),
            dice: Vec::new(),
            template_dice,
            ids,
        }
    }

    /// The settings this box was created with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // === Declarations ===

    /// Add a preset for the next seat (matched by index).
    pub fn add_player(&mut self, preset: PlayerPreset) -> &mut Self {
        self.presets.push(preset);
        self
    }

    /// Declare a zone built from a freshly minted id.
    pub fn declare_zone(&mut self, build: impl FnOnce(ZoneId) -> Zone) -> ZoneId {
        let id = self.ids.zone();
        self.zones.push(build(id));
        id
    }

    /// Declare an empty board.
    pub fn add_board(&mut self, name: &str, rows: usize, cols: usize) -> ZoneId {
        self.declare_zone(|id| Zone::board(id, name, rows, cols))
    }

    /// Declare an empty board with an insertion rule.
    pub fn add_board_with_rule(&mut self, name: &str, rows: usize, cols: usize, rule: ZoneRule) -> ZoneId {
        self.declare_zone(|id| Zone::board(id, name, rows, cols).with_rule(rule))
    }

    /// Declare an empty stack zone.
    pub fn add_zone(&mut self, name: &str, kind: StackKind, owner: Option<PlayerId>) -> ZoneId {
        self.declare_zone(|id| Zone::stack(id, name, kind).with_owner(owner))
    }

    /// Declare a deck with `draw` and `discard` piles.
    pub fn add_deck(&mut self, name: &str, owner: Option<PlayerId>) -> DeckId {
        self.declare_deck(|id| Deck::new(id, name, owner))
    }

    /// Declare a deck built from a freshly minted id.
    pub fn declare_deck(&mut self, build: impl FnOnce(DeckId) -> Deck) -> DeckId {
        let id = self.ids.deck();
        self.decks.push(build(id));
        id
    }

    /// Declare a uniform die.
    pub fn add_die(&mut self, kind: &str, sides: u32) -> DieId {
        self.declare_die(|id| Die::new(id, kind, sides))
    }

    /// Declare a die built from a freshly minted id.
    pub fn declare_die(&mut self, build: impl FnOnce(DieId) -> Die) -> DieId {
        let id = self.ids.die();
        self.dice.push(build(id));
        id
    }

    // === Build ===

    /// Materialize a fresh state for the given seating order.
    ///
    /// # Errors
    ///
    /// `SeatCount` when the seating is outside the declared bounds,
    /// `DuplicatePlayer` when an id is seated twice.
    pub fn build_state<X: Default>(&self, seating: &[PlayerId], seed: u64) -> Result<GameState<X>, ConfigError> {
        let slots = self.settings.players;
        if !slots.admits(seating.len()) {
            return Err(ConfigError::SeatCount {
                min: slots.min,
                max: slots.max,
                got: seating.len(),
            });
        }
        let mut seen = FxHashSet::default();
        for id in seating {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicatePlayer(id.clone()));
            }
        }
        let Some(first) = seating.first() else {
            return Err(ConfigError::SeatCount {
                min: slots.min,
                max: slots.max,
                got: 0,
            });
        };

        let mut ids = self.ids;

        let mut players = OrdMap::new();
        for (i, id) in seating.iter().enumerate() {
            let seat = i as u32 + 1;
            let player = self
                .presets
                .get(i)
                .cloned()
                .unwrap_or_default()
                .materialize(id.clone(), seat);
            players.insert(id.clone(), player);
        }

        let zones: OrdMap<_, _> = self.zones.iter().map(|z| (z.id, z.clone())).collect();
        let decks: OrdMap<_, _> = self.decks.iter().map(|d| (d.id, d.clone())).collect();

        let mut pieces = OrdMap::new();
        let templates = &self.settings.pieces;

        // Neutral extras for every template come first
        for tpl in templates {
            for _ in 0..tpl.extras {
                let piece = Piece::new(ids.piece(), tpl.kind.clone(), None)
                    .with_attrs(tpl.attrs.clone())
                    .with_skin(tpl.skin.clone());
                pieces.insert(piece.id, piece);
            }
        }

        // Then per-player replicas: template, copy, seat
        for tpl in templates {
            for _ in 0..tpl.per_player {
                for owner in seating {
                    let id = ids.piece();
                    let piece = match &tpl.as_card {
                        Some(card) => Piece::card(id, card.name.clone(), card.card_type.clone(), Some(owner.clone()))
                            .with_kind(tpl.kind.clone())
                            .with_attrs(tpl.attrs.clone())
                            .with_skin(card.skin.clone()),
                        None => Piece::new(id, tpl.kind.clone(), Some(owner.clone()))
                            .with_attrs(tpl.attrs.clone())
                            .with_skin(tpl.skin.clone()),
                    };
                    pieces.insert(id, piece);
                }
            }
        }

        let mut dice = OrdMap::new();
        let mut reserved = self.template_dice.iter().copied();
        for tpl in &self.settings.dice {
            for _ in 0..tpl.count {
                let Some(id) = reserved.next() else {
                    break;
                };
                let mut die = Die::new(id, tpl.kind.clone(), tpl.sides)
                    .with_faces(tpl.faces.clone())
                    .with_owner(tpl.owner.clone());
                die.skin = tpl.skin.clone();
                die.attrs = tpl.attrs.clone();
                dice.insert(die.id, die);
            }
        }
        for die in &self.dice {
            dice.insert(die.id, die.clone());
        }

        Ok(GameState {
            ctx: GameContext {
                players: seating.to_vec(),
                current_player: first.clone(),
                phase: SETUP_PHASE.to_string(),
                turn: 0,
                seed,
                winner: None,
            },
            players,
            pieces,
            zones,
            decks,
            dice,
            log: Vector::new(),
            ids,
            ext: X::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DiceTemplate, PieceTemplate, PlayerSlots};
    use crate::core::PieceId;

    fn seats(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| PlayerId::new(format!("p{i}"))).collect()
    }

    #[test]
    fn test_seat_bounds() {
        let game_box = GameBox::new(Settings::new("t", PlayerSlots::new(2, 3, 2)));

        let err = game_box.build_state::<()>(&seats(1), 1).unwrap_err();
        assert_eq!(err, ConfigError::SeatCount { min: 2, max: 3, got: 1 });
        assert!(game_box.build_state::<()>(&seats(4), 1).is_err());
        assert!(game_box.build_state::<()>(&seats(3), 1).is_ok());
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let game_box = GameBox::new(Settings::new("t", PlayerSlots::new(2, 3, 2)));
        let seating = vec![PlayerId::new("a"), PlayerId::new("a")];

        let err = game_box.build_state::<()>(&seating, 1).unwrap_err();
        assert_eq!(err, ConfigError::DuplicatePlayer(PlayerId::new("a")));
    }

    #[test]
    fn test_players_and_presets() {
        let mut game_box = GameBox::new(Settings::new("t", PlayerSlots::new(2, 3, 2)));
        game_box.add_player(PlayerPreset::new().with_name("Host").with_health(10));

        let state: GameState = game_box.build_state(&seats(3), 5).unwrap();
        let p1 = state.player(&PlayerId::new("p1")).unwrap();
        let p3 = state.player(&PlayerId::new("p3")).unwrap();

        assert_eq!(p1.seat, 1);
        assert_eq!(p1.name, "Host");
        assert_eq!(p1.health, Some(10));
        assert_eq!(p3.seat, 3);
        assert_eq!(p3.name, "Player 3");
        assert_eq!(state.ctx.current_player, PlayerId::new("p1"));
        assert_eq!(state.ctx.turn, 0);
        assert_eq!(state.ctx.seed, 5);
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_piece_order_extras_first() {
        let settings = Settings::new("t", PlayerSlots::new(2, 2, 2))
            .with_piece(PieceTemplate::new("meeple").per_player(2).extras(1))
            .with_piece(PieceTemplate::new("coin").extras(2));
        let game_box = GameBox::new(settings);

        let state: GameState = game_box.build_state(&seats(2), 1).unwrap();
        let pieces: Vec<_> = state.pieces.values().collect();

        assert_eq!(pieces.len(), 7);
        // 1 meeple extra + 2 coin extras, all neutral
        assert!(pieces[..3].iter().all(|p| p.owner.is_none()));
        assert_eq!(pieces[0].kind, "meeple");
        assert_eq!(pieces[1].kind, "coin");
        // copy 0: p1, p2; copy 1: p1, p2
        let owners: Vec<_> = pieces[3..].iter().map(|p| p.owner.clone().unwrap()).collect();
        assert_eq!(owners, vec![
            PlayerId::new("p1"),
            PlayerId::new("p2"),
            PlayerId::new("p1"),
            PlayerId::new("p2"),
        ]);
    }

    #[test]
    fn test_card_templates() {
        let settings = Settings::new("t", PlayerSlots::exactly(2))
            .with_piece(PieceTemplate::new("hero").per_player(1).as_card("Knight", "unit"));
        let state: GameState = GameBox::new(settings).build_state(&seats(2), 1).unwrap();

        let card = state.pieces.values().next().unwrap();
        assert!(card.is_card());
        assert_eq!(card.kind, "hero");
        assert_eq!(card.card.as_ref().map(|c| c.name.as_str()), Some("Knight"));
    }

    #[test]
    fn test_declared_ids_are_stable() {
        let mut game_box = GameBox::new(Settings::new("t", PlayerSlots::exactly(2)).with_piece(PieceTemplate::new("x").extras(1)));
        let board = game_box.add_board("Board", 2, 2);
        let hand = game_box.add_zone("Hand", StackKind::Hand, None);
        let deck = game_box.add_deck("Deck", None);

        assert_eq!(board, ZoneId(0));
        assert_eq!(hand, ZoneId(1));
        assert_eq!(deck, DeckId(2));

        let a: GameState = game_box.build_state(&seats(2), 1).unwrap();
        let b: GameState = game_box.build_state(&seats(2), 1).unwrap();
        assert_eq!(a, b);
        // Pieces continue from the box counter
        assert!(a.piece(PieceId(3)).is_some());
        assert_eq!(a.ids.issued(), 4);
        assert!(a.deck(deck).is_some_and(|d| d.has_pile("draw")));
    }

    #[test]
    fn test_dice_templates_then_authored() {
        let settings = Settings::new("t", PlayerSlots::exactly(2)).with_dice(DiceTemplate::new("D6", 6, 3));
        let mut game_box = GameBox::new(settings);
        let d20 = game_box.add_die("D20", 20);

        let state: GameState = game_box.build_state(&seats(2), 1).unwrap();
        assert_eq!(state.dice.len(), 4);
        assert_eq!(state.dice.values().filter(|d| d.kind == "D6").count(), 3);
        assert_eq!(state.die(d20).map(|d| d.sides), Some(20));

        let kinds: Vec<&str> = state.dice.values().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["D6", "D6", "D6", "D20"]);
    }
}
