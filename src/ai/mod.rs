//! Game-tree search: static evaluation, move ordering, the transposition cache, alpha-beta
//! and the time-bounded iterative-deepening driver.

mod agent;
pub mod deepening;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod transposition;

pub use agent::Agent;
pub use deepening::{choose_move, DeepeningConfig, IterativeDeepening, SearchReport};
pub use eval::{EvalWeights, Heuristic, WindowHeuristic, WINDOWS, WINDOW_COUNT};
pub use ordering::{ordered_moves, preference_rank, MoveList, MOVE_ORDER};
pub use search::{is_win_score, SearchResult, SearchStats, Searcher, INFINITY, WIN_SCORE};
pub use transposition::{Bound, TranspositionTable, TtEntry};
