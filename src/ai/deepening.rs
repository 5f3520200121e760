use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::eval::WindowHeuristic;
use super::search::{is_win_score, Searcher};
use super::transposition::TranspositionTable;
use crate::config::EngineConfig;
use crate::game::{Board, GameState, Player};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepeningConfig {
    /// Wall-clock budget per decision. Checked only between completed depths.
    pub time_budget_secs: f64,
    pub min_depth: u32,
    pub max_depth: u32,
    pub use_transposition: bool,
    pub tt_max_entries: usize,
}

impl Default for DeepeningConfig {
    fn default() -> Self {
        DeepeningConfig {
            time_budget_secs: 1.0,
            min_depth: 1,
            max_depth: 42,
            use_transposition: true,
            tt_max_entries: 1 << 20,
        }
    }
}

impl DeepeningConfig {
    /// The configured budget; negative or non-finite values count as zero.
    pub fn time_budget(&self) -> Duration {
        budget_from_secs(self.time_budget_secs)
    }
}

fn budget_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

/// Outcome of one decision: the deepest completed iteration plus effort spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub column: Option<usize>,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Time-bounded iterative deepening over [`Searcher`].
///
/// Each depth is a fresh full-window search of the same root; the cache carries move
/// ordering from one depth to the next and, when enabled, across decisions. A started
/// depth always runs to completion, so a decision can overrun its budget by the cost of
/// the last depth.
pub struct IterativeDeepening {
    config: DeepeningConfig,
    searcher: Searcher,
}

impl IterativeDeepening {
    pub fn new(config: &EngineConfig) -> Self {
        let heuristic = Box::new(WindowHeuristic::new(config.eval.clone()));
        let searcher = Searcher::with_heuristic(Player::Red, heuristic);
        Self::with_searcher(config.search.clone(), searcher)
    }

    /// Use a caller-built searcher, e.g. one with a custom heuristic. A transposition
    /// table is attached if the config asks for one and the searcher has none.
    pub fn with_searcher(config: DeepeningConfig, searcher: Searcher) -> Self {
        let searcher = if config.use_transposition && searcher.transposition().is_none() {
            searcher.with_transposition(TranspositionTable::new(config.tt_max_entries))
        } else {
            searcher
        };
        IterativeDeepening { config, searcher }
    }

    pub fn config(&self) -> &DeepeningConfig {
        &self.config
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn searcher_mut(&mut self) -> &mut Searcher {
        &mut self.searcher
    }

    /// Best column for `side` on `board`, or `None` if the game is already over.
    pub fn choose_move(&mut self, board: &Board, side: Player, budget: Duration) -> Option<usize> {
        self.think(board, side, budget).and_then(|report| report.column)
    }

    /// Deepen from `min_depth` until the budget is spent, the result is a proven win or
    /// loss, or the depth covers every empty cell. The first completed depth is always
    /// reported, however long it took. A full or already-won board yields `None`.
    pub fn think(&mut self, board: &Board, side: Player, budget: Duration) -> Option<SearchReport> {
        if let Some(winner) = board.winner() {
            debug!("{winner} has already won, nothing to search");
            return None;
        }
        if board.is_full() {
            debug!("board is full, nothing to search");
            return None;
        }

        self.searcher.set_maximizer(side);
        self.searcher.reset_stats();

        let start = Instant::now();
        let max_depth = self
            .config
            .max_depth
            .min(board.empty_count() as u32)
            .max(1);
        let min_depth = self.config.min_depth.clamp(1, max_depth);

        let mut report = None;
        for depth in min_depth..=max_depth {
            let result = self.searcher.search_root(board, depth);
            let completed = SearchReport {
                column: result.column,
                score: result.score,
                depth,
                nodes: self.searcher.stats().nodes,
                elapsed: start.elapsed(),
            };
            debug!(
                "{side} depth {depth}: column {:?} score {} nodes {} elapsed {:?}",
                completed.column, completed.score, completed.nodes, completed.elapsed
            );
            report = Some(completed);

            if is_win_score(result.score) {
                debug!("{side} result proven at depth {depth}");
                break;
            }
            if completed.elapsed >= budget {
                break;
            }
        }

        if let Some(r) = &report {
            info!(
                "{side} plays {:?} (score {}, depth {}, {} nodes, {:?})",
                r.column, r.score, r.depth, r.nodes, r.elapsed
            );
        }
        report
    }
}

impl Agent for IterativeDeepening {
    fn select_move(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let budget = self.config.time_budget();
        self.choose_move(state.board(), state.current_player(), budget)
    }

    fn name(&self) -> &str {
        "Alpha-beta"
    }
}

/// Pick a column for `side` with the default engine configuration and a fresh cache.
///
/// Returns `None` only when the board is full or already holds a four. Negative or non-finite budgets are treated
/// as zero, which still completes the first depth.
pub fn choose_move(board: &Board, side: Player, time_budget_secs: f64) -> Option<usize> {
    IterativeDeepening::new(&EngineConfig::default()).choose_move(
        board,
        side,
        budget_from_secs(time_budget_secs),
    )
}
