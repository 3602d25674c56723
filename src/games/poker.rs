//! No-limit hold'em, single hand.
//!
//! Cards, the community board and the pot counter live in the generic
//! object model; chips and betting state live in the typed [`PokerTable`]
//! extension. Streets are phases: entering a street resets the round's
//! commitments and `on_round_start` deals for it.
//!
//! The hand ends at showdown (scored as a draw; no hand evaluation) or when
//! only one player hasn't folded.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::builder::{GameBox, PlayerSlots, Settings};
use crate::core::{DeckId, EngineResult, GameState, PieceId, PlayerId, Winner, ZoneId};
use crate::ops;
use crate::pieces::{Piece, DRAW_PILE};
use crate::rules::{self, Control, GameDefinition, MoveArgs, MoveSpec};
use crate::zones::{Anchor, StackKind, UiLayout, Zone, ZoneRule};

const RANKS: [char; 13] = ['A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2'];
const SUITS: [char; 4] = ['S', 'H', 'D', 'C'];

/// Street order.
pub const STREETS: &[&str] = &["preflop", "flop", "turn", "river", "showdown"];

const BURN_PILE: &str = "burn";
const COMMUNITY_CELLS: usize = 5;
const STARTING_BIG_BLINDS: i64 = 100;

const MOVES: &[MoveSpec] = &[
    MoveSpec::auto("fold"),
    MoveSpec::auto("check"),
    MoveSpec::auto("call"),
    MoveSpec::auto("bet"),
    MoveSpec::auto("raise"),
    MoveSpec::auto("add_pot"),
    MoveSpec::manual("next_phase"),
];

/// One player's chips and status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub stack: i64,
    /// Chips put in during the current street.
    pub committed: i64,
    pub folded: bool,
    pub hand: Option<ZoneId>,
}

/// Betting state of the hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokerTable {
    pub small_blind: i64,
    pub big_blind: i64,
    /// Highest commitment this street.
    pub current_bet: i64,
    pub min_raise: i64,
    pub pot: Option<PieceId>,
    pub seats: OrdMap<PlayerId, Seat>,
}

impl PokerTable {
    /// Chips `player` must add to match the current bet.
    #[must_use]
    pub fn to_call(&self, player: &PlayerId) -> i64 {
        let committed = self.seats.get(player).map_or(0, |s| s.committed);
        (self.current_bet - committed).max(0)
    }

    #[must_use]
    pub fn stack(&self, player: &PlayerId) -> i64 {
        self.seats.get(player).map_or(0, |s| s.stack)
    }

    /// Players still in the hand.
    pub fn active(&self) -> impl Iterator<Item = &PlayerId> {
        self.seats.iter().filter(|(_, s)| !s.folded).map(|(p, _)| p)
    }

    fn reset_street(&mut self) {
        self.seats = self
            .seats
            .iter()
            .map(|(p, s)| (p.clone(), Seat { committed: 0, ..s.clone() }))
            .collect();
        self.current_bet = 0;
        self.min_raise = self.big_blind;
    }
}

type PokerState = GameState<PokerTable>;

/// No-limit hold'em rule set.
#[derive(Clone, Debug)]
pub struct PokerNlh {
    game_box: GameBox,
    community: ZoneId,
    pot_zone: ZoneId,
    deck: DeckId,
}

impl PokerNlh {
    #[must_use]
    pub fn new() -> Self {
        let settings = Settings::new("poker-nlh", PlayerSlots::new(2, 9, 6))
            .with_name("No-Limit Hold'em")
            .with_hidden_info();
        let mut game_box = GameBox::new(settings);

        let community = game_box.declare_zone(|id| {
            Zone::board(id, "Community", 1, COMMUNITY_CELLS)
                .with_rule(ZoneRule::new().allow_kinds(["card"]))
                .at(UiLayout::at(Anchor::Top))
        });
        let pot_zone = game_box.declare_zone(|id| {
            Zone::stack(id, "Pot", StackKind::Area)
                .with_rule(ZoneRule::new().allow_kinds(["counter"]).with_max_items(1))
                .at(UiLayout::at(Anchor::Center))
        });
        let deck = game_box.add_deck("Main", None);

        Self {
            game_box,
            community,
            pot_zone,
            deck,
        }
    }

    #[must_use]
    pub fn community(&self) -> ZoneId {
        self.community
    }

    #[must_use]
    pub fn deck(&self) -> DeckId {
        self.deck
    }

    /// Chips in the pot.
    #[must_use]
    pub fn pot_amount(&self, state: &PokerState) -> i64 {
        state
            .ext
            .pot
            .and_then(|id| state.piece(id))
            .map_or(0, |p| p.get_int("amount", 0))
    }

    // === Setup helpers ===

    fn open_deck(&self, mut state: PokerState) -> EngineResult<PokerState> {
        for rank in RANKS {
            for suit in SUITS {
                let id = state.alloc_piece_id();
                let short = format!("{rank}{suit}");
                let card = Piece::card(id, short.clone(), "playing", None)
                    .with_attr("rank", rank.to_string())
                    .with_attr("suit", suit.to_string())
                    .with_attr("short", short);
                state.add_piece(card);
                state = ops::push_to_pile(&state, self.deck, DRAW_PILE, id)?;
            }
        }
        ops::shuffle_pile(&state, self.deck, DRAW_PILE, None)
    }

    fn seat_players(&self, mut state: PokerState) -> PokerState {
        let big_blind = 2;
        state.ext = PokerTable {
            small_blind: 1,
            big_blind,
            current_bet: 0,
            min_raise: big_blind,
            pot: state.ext.pot,
            seats: OrdMap::new(),
        };

        for player in state.ctx.players.clone() {
            let hand = state.alloc_zone_id();
            state.add_zone(
                Zone::stack(hand, format!("Hand_{player}"), StackKind::Hand)
                    .with_owner(Some(player.clone()))
                    .with_rule(ZoneRule::new().allow_kinds(["card"]).with_max_items(2).owner_only())
                    .at(UiLayout::at(Anchor::Bottom)),
            );
            state.ext.seats.insert(
                player,
                Seat {
                    stack: STARTING_BIG_BLINDS * big_blind,
                    committed: 0,
                    folded: false,
                    hand: Some(hand),
                },
            );
        }
        state
    }

    // === Dealing ===

    fn deal_hole_cards(&self, mut state: PokerState) -> EngineResult<PokerState> {
        let hands: Vec<(PlayerId, ZoneId)> = state
            .ext
            .seats
            .iter()
            .filter_map(|(p, s)| s.hand.map(|h| (p.clone(), h)))
            .collect();
        let seating: Vec<PlayerId> = state.ctx.players.clone();

        for _ in 0..2 {
            for player in &seating {
                let Some((_, hand)) = hands.iter().find(|(p, _)| p == player) else {
                    continue;
                };
                let before = state.zone(*hand).map_or(0, Zone::len);
                state = ops::transfer_from_deck_to_zone(&state, self.deck, DRAW_PILE, *hand)?;
                let dealt = state.zone(*hand).and_then(Zone::order).and_then(|o| o.get(before).copied());
                if let Some(card) = dealt {
                    if let Some(piece) = state.pieces.get_mut(&card) {
                        piece.owner = Some(player.clone());
                    }
                }
            }
        }
        Ok(state)
    }

    fn deal_community(&self, state: PokerState, count: usize) -> EngineResult<PokerState> {
        let (mut state, burned) = ops::pop_from_pile(&state, self.deck, DRAW_PILE)?;
        if let Some(card) = burned {
            state = ops::push_to_pile(&state, self.deck, BURN_PILE, card)?;
        }

        for _ in 0..count {
            let Some(cell) = ops::cells(&state, self.community)?.iter().position(Option::is_none) else {
                break;
            };
            let (next, card) = ops::pop_from_pile(&state, self.deck, DRAW_PILE)?;
            let Some(card) = card else {
                return Ok(next);
            };
            state = ops::place(&next, card, self.community, cell)?;
        }
        Ok(state)
    }

    // === Betting helpers ===

    fn pay(&self, mut state: PokerState, player: &PlayerId, amount: i64) -> EngineResult<PokerState> {
        let amount = amount.min(state.ext.stack(player)).max(0);
        if let Some(seat) = state.ext.seats.get_mut(player) {
            seat.stack -= amount;
            seat.committed += amount;
        }
        match state.ext.pot {
            Some(pot) => ops::increment_piece_attr(&state, pot, "amount", amount),
            None => Ok(state),
        }
    }

    fn street_after(current: &str) -> &'static str {
        let at = STREETS.iter().position(|s| *s == current).unwrap_or(0);
        STREETS[(at + 1).min(STREETS.len() - 1)]
    }
}

impl Default for PokerNlh {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDefinition for PokerNlh {
    type Ext = PokerTable;

    fn game_box(&self) -> &GameBox {
        &self.game_box
    }

    fn phases(&self) -> &[&'static str] {
        STREETS
    }

    fn moves(&self) -> &[MoveSpec] {
        MOVES
    }

    fn sanitize(&self, name: &str, args: MoveArgs) -> Result<MoveArgs, String> {
        match name {
            "bet" | "raise" | "add_pot" => {
                let args = args.retain_keys(&["amount"]);
                match args.get("amount") {
                    Some(v) if v.as_int().is_none() => Err("amount must be a number".into()),
                    _ => Ok(args),
                }
            }
            _ => Ok(MoveArgs::new()),
        }
    }

    fn validate(&self, name: &str, state: &PokerState, args: &MoveArgs) -> Option<String> {
        if self.is_terminal(state) {
            return Some("Hand is over.".into());
        }
        let me = state.current_player();
        let table = &state.ext;
        let to_call = table.to_call(me);
        let amount = args.get_int("amount").unwrap_or(0);
        let committed = table.seats.get(me).map_or(0, |s| s.committed);
        let all_in = committed + table.stack(me);
        let min_to = table.current_bet + table.min_raise;

        match name {
            "check" if to_call > 0 => Some("Cannot check facing a bet.".into()),
            "call" if to_call <= 0 => Some("Nothing to call.".into()),
            "bet" if to_call != 0 => Some("Cannot bet facing action; raise instead.".into()),
            "bet" if amount <= 0 || table.stack(me) <= 0 => Some("Invalid bet amount.".into()),
            // With chips already matched on the street a bet re-opens the action
            "bet" if table.current_bet > 0 && (committed + amount).min(all_in) < min_to.min(all_in) => {
                Some("Raise below minimum.".into())
            }
            "raise" if table.current_bet <= 0 => Some("Nothing to raise.".into()),
            "raise" if amount <= table.current_bet => Some("Invalid raise-to amount.".into()),
            "raise" if amount < min_to && amount < all_in => Some("Raise below minimum.".into()),
            "add_pot" if amount <= 0 => Some("Amount must be positive.".into()),
            "add_pot" if amount > i64::MAX - self.pot_amount(state) => Some("Amount too large.".into()),
            _ => None,
        }
    }

    fn apply(&self, name: &str, mut state: PokerState, args: &MoveArgs) -> EngineResult<PokerState> {
        let me = state.ctx.current_player.clone();
        let amount = args.get_int("amount").unwrap_or(0);

        match name {
            "fold" => {
                if let Some(seat) = state.ext.seats.get_mut(&me) {
                    seat.folded = true;
                }
                ops::set_player_attr(&state, &me, "folded", true)
            }
            "call" => {
                let owed = state.ext.to_call(&me);
                self.pay(state, &me, owed)
            }
            "bet" => {
                let prev_bet = state.ext.current_bet;
                let mut next = self.pay(state, &me, amount)?;
                let committed = next.ext.seats.get(&me).map_or(0, |s| s.committed);
                next.ext.current_bet = prev_bet.max(committed);
                next.ext.min_raise = next.ext.min_raise.max(next.ext.current_bet - prev_bet);
                Ok(next)
            }
            "raise" => {
                let prev_bet = state.ext.current_bet;
                let committed = state.ext.seats.get(&me).map_or(0, |s| s.committed);
                let target = amount.min(committed + state.ext.stack(&me));
                let mut next = self.pay(state, &me, target - committed)?;
                next.ext.current_bet = prev_bet.max(target);
                next.ext.min_raise = next.ext.min_raise.max(next.ext.current_bet - prev_bet);
                Ok(next)
            }
            "add_pot" => match state.ext.pot {
                Some(pot) => ops::increment_piece_attr(&state, pot, "amount", amount),
                None => Ok(state),
            },
            "next_phase" => {
                let street = Self::street_after(&state.ctx.phase);
                state = rules::set_phase(self, &state, street)?;
                self.on_round_start(state)
            }
            _ => Ok(state),
        }
    }

    fn setup(&self, state: PokerState) -> EngineResult<PokerState> {
        let mut state = self.open_deck(state)?;

        let pot = state.alloc_piece_id();
        state.add_piece(Piece::new(pot, "counter", None).with_attr("amount", 0i64));
        state = ops::push(&state, self.pot_zone, pot)?;
        state.ext.pot = Some(pot);

        Ok(self.seat_players(state))
    }

    fn on_phase_enter(&self, _phase: &str, mut state: PokerState) -> EngineResult<PokerState> {
        state.ext.reset_street();
        Ok(state)
    }

    fn on_round_start(&self, state: PokerState) -> EngineResult<PokerState> {
        match state.ctx.phase.as_str() {
            "preflop" => self.deal_hole_cards(state),
            "flop" => self.deal_community(state, 3),
            "turn" | "river" => self.deal_community(state, 1),
            _ => Ok(state),
        }
    }

    fn next_player(&self, state: &PokerState) -> Option<PlayerId> {
        let seats = &state.ctx.players;
        let start = state.ctx.seat_index(&state.ctx.current_player).unwrap_or(0);
        (1..=seats.len())
            .map(|step| &seats[(start + step) % seats.len()])
            .find(|p| state.ext.seats.get(*p).is_some_and(|s| !s.folded))
            .cloned()
    }

    fn is_terminal(&self, state: &PokerState) -> bool {
        state.ctx.phase == "showdown" || state.ext.active().count() <= 1
    }

    fn winner(&self, state: &PokerState) -> Option<Winner> {
        let mut active = state.ext.active();
        match (active.next(), active.next()) {
            (Some(last), None) => Some(Winner::Player(last.clone())),
            _ => Some(Winner::Draw),
        }
    }

    fn controls(&self, state: &PokerState, player: &PlayerId) -> Vec<Control> {
        let table = &state.ext;
        let folded = table.seats.get(player).map_or(true, |s| s.folded);
        if self.is_terminal(state) || !state.is_current(player) || folded {
            return Vec::new();
        }

        let to_call = table.to_call(player);
        let stack = table.stack(player);
        let bb = table.big_blind;
        let mut controls = Vec::new();

        if to_call > 0 {
            controls.push(Control::new("poker:fold", "Fold", "fold").in_group("betting"));
            controls.push(Control::new("poker:call", format!("Call {}", to_call.min(stack)), "call").in_group("betting"));
        } else {
            controls.push(Control::new("poker:check", "Check", "check").in_group("betting"));
        }

        if stack > 0 {
            if table.current_bet == 0 {
                let min = stack.min(bb);
                controls.push(
                    Control::new("poker:bet", "Bet", "bet")
                        .with_number(min, stack, Some(bb), Some((3 * bb).min(stack)))
                        .in_group("betting"),
                );
            } else {
                let committed = table.seats.get(player).map_or(0, |s| s.committed);
                let max_to = committed + stack;
                let min_to = (table.current_bet + table.min_raise).min(max_to);
                let reason = (max_to <= table.current_bet).then_some("Not enough chips");
                controls.push(
                    Control::new("poker:raise", "Raise to", "raise")
                        .with_number(min_to, max_to, Some(bb), Some(min_to))
                        .disabled_if(reason)
                        .in_group("betting"),
                );
            }
        }

        controls.push(Control::new("poker:next", "Next Street", "next_phase").in_group("utility"));
        controls
    }
}
