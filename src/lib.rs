//! # Connect Four vs Alpha-Beta
//!
//! A Connect Four opponent that searches the game tree with depth-bounded
//! minimax and alpha-beta pruning over a window-counting heuristic, plus a
//! terminal front end built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Board model, players, searchable state and move generation
//! - [`ai`] — Position evaluator, alpha-beta search, agents
//! - [`session`] — One human-vs-engine game as driven by a front end
//! - [`scoreboard`] — Persistent win/loss/draw tally
//! - [`ui`] — Terminal UI: board, record, controls
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod scoreboard;
pub mod session;
pub mod ui;
