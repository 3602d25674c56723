//! Mutation operations.
//!
//! The only code path that changes zone, deck and piece contents. Every
//! function takes `&GameState` and returns a new state (or a tuple with the
//! popped/rolled value). Validation runs before any change, so on error the
//! caller's state is exactly as it was.
//!
//! ## Single location per piece
//!
//! The operations do not track where a piece currently lives. Moving a piece
//! between zones means removing it from the source (`pop`, `clear`,
//! `pop_from_pile`) before inserting it elsewhere; rule sets own that
//! obligation.

pub mod attrs;
pub mod board;
pub mod deck;
pub mod dice;
pub mod stack;

pub use attrs::{increment_piece_attr, set_piece_attr, set_player_attr};
pub use board::{cells, clear, clear_board, move_piece, place};
pub use deck::{pop_from_pile, push_to_pile, shuffle_pile, transfer_from_deck_to_zone};
pub use dice::{infer_sides, roll_dice_by_id, roll_dice_by_kind};
pub use stack::{pop, push};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::builder::{GameBox, PieceTemplate, PlayerSlots, Settings};
    use crate::core::{DeckId, GameState, PieceId, PlayerId, ZoneId};
    use crate::zones::{StackKind, ZoneRule};

    /// Two tokens then two chips, all neutral.
    fn settings() -> Settings {
        Settings::new("ops-test", PlayerSlots::new(2, 4, 2))
            .with_piece(PieceTemplate::new("token").extras(2))
            .with_piece(PieceTemplate::new("chip").extras(2))
    }

    fn build(game_box: &GameBox) -> (GameState, Vec<PieceId>) {
        let seats = [PlayerId::new("p1"), PlayerId::new("p2")];
        let state: GameState = game_box.build_state(&seats, 42).unwrap();
        let pieces = state.pieces.keys().copied().collect();
        (state, pieces)
    }

    /// State with a caller-declared board and an unrestricted hand.
    pub fn state_with(declare: impl FnOnce(&mut GameBox) -> ZoneId) -> (GameState, ZoneId, ZoneId, Vec<PieceId>) {
        let mut game_box = GameBox::new(settings());
        let board = declare(&mut game_box);
        let hand = game_box.add_zone("Hand", StackKind::Hand, None);
        let (state, pieces) = build(&game_box);
        (state, board, hand, pieces)
    }

    /// State with a deck and a hand that takes at most two tokens.
    pub fn state_with_deck() -> (GameState, DeckId, ZoneId, Vec<PieceId>) {
        let mut game_box = GameBox::new(settings());
        let deck = game_box.add_deck("Deck", None);
        let hand = game_box.declare_zone(|id| {
            crate::zones::Zone::stack(id, "Hand", StackKind::Hand)
                .with_rule(ZoneRule::new().allow_kinds(["token"]).with_max_items(2))
        });
        let (state, pieces) = build(&game_box);
        (state, deck, hand, pieces)
    }
}
