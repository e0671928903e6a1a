//! # Tic-Tac-Toe Minimax
//!
//! N x N tic-tac-toe against a computer opponent that never loses and takes
//! every forced win. Small boards are searched exhaustively; larger boards
//! play win/block/random to stay responsive. Computer moves run on a
//! cancellable background worker so the UI never blocks.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, and terminal-result evaluation
//! - [`ai`] — Move finder (minimax and heuristics) and the move scheduler
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
