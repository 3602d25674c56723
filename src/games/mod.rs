//! Reference games built on the engine.
//!
//! - `TicTacToe`: 3x3 board, marks minted on demand
//! - `Connect4`: 6x7 gravity grid
//! - `PokerNlh`: no-limit hold'em hand with a typed betting extension

pub mod connect4;
pub mod poker;
pub mod tictactoe;

pub use connect4::Connect4;
pub use poker::{PokerNlh, PokerTable, Seat};
pub use tictactoe::TicTacToe;
