//! Core tic-tac-toe game model: board representation, player types, and
//! terminal-result evaluation.

mod board;
mod player;

pub use board::{Board, Cell, GameResult, Move};
pub use player::Player;
