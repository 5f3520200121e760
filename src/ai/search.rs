use log::trace;

use super::eval::{Heuristic, WindowHeuristic};
use super::ordering::{ordered_moves, preference_rank};
use super::transposition::{Bound, TranspositionTable, TtEntry};
use crate::game::{Board, Placement, Player};

/// Base score of a won position. Heuristic scores stay far below it, so a forced win is
/// never outweighed by positional terms.
pub const WIN_SCORE: i32 = 1_000_000;

/// Search window bound, above any reachable score.
pub const INFINITY: i32 = 2 * WIN_SCORE;

/// Whether `score` reports a forced win (positive) or loss (negative).
pub fn is_win_score(score: i32) -> bool {
    score.abs() >= WIN_SCORE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` for a drawn (full) board or a depth-0 leaf.
    pub column: Option<usize>,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The board is mutated in place and every move is undone before the next sibling is
/// tried. Wins are scored `WIN_SCORE + remaining depth`, so faster wins rank higher and
/// slower losses rank less badly.
pub struct Searcher {
    maximizer: Player,
    heuristic: Box<dyn Heuristic>,
    tt: Option<TranspositionTable>,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(maximizer: Player) -> Self {
        Self::with_heuristic(maximizer, Box::new(WindowHeuristic::default()))
    }

    pub fn with_heuristic(maximizer: Player, heuristic: Box<dyn Heuristic>) -> Self {
        Searcher {
            maximizer,
            heuristic,
            tt: None,
            stats: SearchStats::default(),
        }
    }

    pub fn with_transposition(mut self, mut table: TranspositionTable) -> Self {
        table.set_perspective(self.maximizer);
        self.tt = Some(table);
        self
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn set_maximizer(&mut self, maximizer: Player) {
        self.maximizer = maximizer;
        if let Some(tt) = self.tt.as_mut() {
            tt.set_perspective(maximizer);
        }
    }

    pub fn transposition(&self) -> Option<&TranspositionTable> {
        self.tt.as_ref()
    }

    pub fn transposition_mut(&mut self) -> Option<&mut TranspositionTable> {
        self.tt.as_mut()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Full-window search of `board` with the maximizer to move.
    ///
    /// Every root move gets an exact score (or one proven worse than the best so far), and
    /// equal scores go to the column earlier in [`MOVE_ORDER`](super::MOVE_ORDER). The chosen
    /// column therefore never depends on which move the cache suggested trying first.
    pub fn search_root(&mut self, board: &Board, depth: u32) -> SearchResult {
        let mut board = *board;
        if depth == 0 || board.is_full() {
            return self.search(&mut board, depth, -INFINITY, INFINITY, true, None);
        }
        self.stats.nodes += 1;

        let mover = self.maximizer;
        let key = board.fingerprint();
        let hint = self.tt.as_ref().and_then(|tt| tt.best_move(key, mover));

        let mut best: Option<(usize, i32)> = None;
        for &col in ordered_moves(&board, hint).iter() {
            let Ok(placement) = board.apply_move(col, mover) else {
                continue;
            };
            // One below the best so far, so a tie comes back exact rather than as a bound.
            let alpha = best.map_or(-INFINITY, |(_, score)| score - 1);
            let child = self.search(&mut board, depth - 1, alpha, INFINITY, false, Some(placement));
            board.undo_move(placement);

            let improves = match best {
                None => true,
                Some((best_col, best_score)) => {
                    child.score > best_score
                        || (child.score == best_score
                            && preference_rank(col) < preference_rank(best_col))
                }
            };
            if improves {
                best = Some((col, child.score));
            }
        }

        let result = match best {
            Some((col, score)) => SearchResult {
                column: Some(col),
                score,
            },
            None => SearchResult {
                column: None,
                score: 0,
            },
        };
        if let Some(tt) = self.tt.as_mut() {
            tt.store(
                key,
                TtEntry {
                    best_column: result.column,
                    score: result.score,
                    depth,
                    bound: Bound::Exact,
                    mover,
                },
            );
        }
        trace!(
            "depth {depth}: column {:?} score {} ({} nodes so far)",
            result.column,
            result.score,
            self.stats.nodes
        );
        result
    }

    /// `last_move` is the placement that produced `board`, if any; it scopes the win check
    /// to the lines through that cell. `maximizing` tells whose turn it is.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        last_move: Option<Placement>,
    ) -> SearchResult {
        self.stats.nodes += 1;

        // Ahead of the full-board check: the move that fills the board can still complete four.
        if let Some(Placement { row, col }) = last_move {
            if board.winning_line_through(row, col) {
                let magnitude = WIN_SCORE + depth as i32;
                let score = if Player::from_cell(board.get(row, col)) == Some(self.maximizer) {
                    magnitude
                } else {
                    -magnitude
                };
                return SearchResult {
                    column: Some(col),
                    score,
                };
            }
        }

        if board.is_full() {
            return SearchResult {
                column: None,
                score: 0,
            };
        }

        if depth == 0 {
            return SearchResult {
                column: None,
                score: self.heuristic.evaluate(board, self.maximizer),
            };
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.other()
        };
        let key = board.fingerprint();

        let mut hint = None;
        if let Some(entry) = self.tt.as_ref().and_then(|tt| tt.probe(key, mover).copied()) {
            self.stats.tt_hits += 1;
            if entry.cutoff(depth, alpha, beta) {
                return SearchResult {
                    column: entry.best_column,
                    score: entry.score,
                };
            }
            hint = entry.best_column;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = SearchResult {
            column: None,
            score: if maximizing { -INFINITY } else { INFINITY },
        };

        for &col in ordered_moves(board, hint).iter() {
            let Ok(placement) = board.apply_move(col, mover) else {
                continue;
            };
            let child = self.search(board, depth - 1, alpha, beta, !maximizing, Some(placement));
            board.undo_move(placement);

            if maximizing {
                if child.score > best.score {
                    best = SearchResult {
                        column: Some(col),
                        score: child.score,
                    };
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best.score {
                    best = SearchResult {
                        column: Some(col),
                        score: child.score,
                    };
                }
                beta = beta.min(child.score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if let Some(tt) = self.tt.as_mut() {
            let bound = if best.score <= alpha_orig {
                Bound::Upper
            } else if best.score >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            tt.store(
                key,
                TtEntry {
                    best_column: best.column,
                    score: best.score,
                    depth,
                    bound,
                    mover,
                },
            );
        }

        best
    }
}
