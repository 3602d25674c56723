//! State builder: settings, templates and the game box.
//!
//! A definition declares "what's in the box" once; every match is then
//! materialized from it with [`GameBox::build_state`].

pub mod game_box;
pub mod settings;

pub use game_box::GameBox;
pub use settings::{CardTemplate, DiceTemplate, MatchSeed, PieceTemplate, PlayerSlots, Settings};
