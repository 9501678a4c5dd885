//! Core Connect Four game logic: the board model, the two players, and the
//! searchable game state with its move generator.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, MoveError, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::{GameOutcome, State};
