//! # Connect Four Search
//!
//! A game-tree search engine for Connect Four on the standard 6x7 grid: board model with
//! gravity and scoped win detection, a window-scanning static evaluator, center-out move
//! ordering, alpha-beta search with a transposition cache, and a time-bounded
//! iterative-deepening driver that always returns a legal move.
//!
//! Reading moves from a player, drawing the board and running the turn loop are left to
//! the caller, which talks to the engine through [`choose_move`] and [`apply_human_move`]
//! (or the [`ai::Agent`] trait).
//!
//! ## Modules
//!
//! - [`game`] — Board, players, and a game record for turn loops
//! - [`ai`] — Evaluator, move ordering, transposition cache, alpha-beta, iterative deepening
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;

pub use ai::choose_move;
pub use error::MoveError;
pub use game::{apply_human_move, Board, Player};
