//! Connect Four rules: the board with gravity and win detection, the two sides, and a
//! game record for turn loops.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Fingerprint, Placement, CENTER_COL, COLS, ROWS};
pub use player::Player;
pub use state::{apply_human_move, GameOutcome, GameState};
