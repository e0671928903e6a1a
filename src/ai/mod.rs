//! The move engine: pure search functions and the background scheduler that
//! runs them off the interactive thread.

pub mod finder;
mod scheduler;

pub use finder::{choose_move, potential_winning_move, random_move, MINIMAX_THRESHOLD};
pub use scheduler::{ComputeOutcome, MoveScheduler};
