use serde::{Deserialize, Serialize};

use super::search::WIN_SCORE;
use crate::game::{Board, Cell, Player, CENTER_COL, COLS, ROWS};

/// Number of distinct 4-cell lines on a 6x7 board.
pub const WINDOW_COUNT: usize = 69;

pub type Window = [(usize, usize); 4];

/// Every 4-cell line: 24 horizontal, 21 vertical, 12 per diagonal direction.
pub static WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut windows = [[(0, 0); 4]; WINDOW_COUNT];
    let mut n = 0;

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            windows[n] = [(row, col), (row, col + 1), (row, col + 2), (row, col + 3)];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Vertical
    let mut col = 0;
    while col < COLS {
        let mut row = 0;
        while row + 3 < ROWS {
            windows[n] = [(row, col), (row + 1, col), (row + 2, col), (row + 3, col)];
            n += 1;
            row += 1;
        }
        col += 1;
    }

    // Diagonal (top-left to bottom-right)
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            windows[n] = [
                (row, col),
                (row + 1, col + 1),
                (row + 2, col + 2),
                (row + 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (bottom-left to top-right)
    let mut row = 3;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            windows[n] = [
                (row, col),
                (row - 1, col + 1),
                (row - 2, col + 2),
                (row - 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    assert!(n == WINDOW_COUNT);
    windows
}

/// Per-window bonuses for the maximizer and penalties for the opponent.
///
/// The defaults are symmetric, so a position scores the exact negation for the other side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub four: i32,
    pub three: i32,
    pub two: i32,
    pub opp_four: i32,
    pub opp_three: i32,
    pub opp_two: i32,
    /// Per piece in the center column.
    pub center: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            four: 1000,
            three: 50,
            two: 10,
            opp_four: 1000,
            opp_three: 50,
            opp_two: 10,
            center: 6,
        }
    }
}

impl EvalWeights {
    /// Upper bound on the absolute value the evaluator can return with these weights.
    pub fn max_magnitude(&self) -> i64 {
        let per_window = [
            self.four,
            self.three,
            self.two,
            self.opp_four,
            self.opp_three,
            self.opp_two,
        ]
        .into_iter()
        .map(|w| i64::from(w).abs())
        .max()
        .unwrap_or(0);
        per_window * WINDOW_COUNT as i64 + i64::from(self.center).abs() * ROWS as i64
    }

    pub fn is_non_negative(&self) -> bool {
        [
            self.four,
            self.three,
            self.two,
            self.opp_four,
            self.opp_three,
            self.opp_two,
            self.center,
        ]
        .iter()
        .all(|&w| w >= 0)
    }
}

/// Trait for evaluating a board position from the maximizing side's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, maximizer: Player) -> i32;
}

/// Window-scanning evaluator: open threes and twos for either side plus a center bonus.
/// Windows holding pieces of both sides are dead and score nothing.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    weights: EvalWeights,
}

impl WindowHeuristic {
    pub fn new(weights: EvalWeights) -> Self {
        WindowHeuristic { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    fn score_window(&self, own: usize, opp: usize) -> i32 {
        let w = &self.weights;
        match (own, opp) {
            (4, 0) => w.four,
            (3, 0) => w.three,
            (2, 0) => w.two,
            (0, 4) => w.opp_four.saturating_neg(),
            (0, 3) => w.opp_three.saturating_neg(),
            (0, 2) => w.opp_two.saturating_neg(),
            _ => 0,
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, maximizer: Player) -> i32 {
        let own_cell = maximizer.to_cell();
        let opp_cell = maximizer.other().to_cell();

        let mut score: i32 = 0;
        for row in 0..ROWS {
            match board.get(row, CENTER_COL) {
                c if c == own_cell => score = score.saturating_add(self.weights.center),
                c if c == opp_cell => score = score.saturating_sub(self.weights.center),
                _ => {}
            }
        }

        for window in &WINDOWS {
            let mut own = 0;
            let mut opp = 0;
            for &(row, col) in window {
                match board.get(row, col) {
                    Cell::Empty => {}
                    c if c == own_cell => own += 1,
                    _ => opp += 1,
                }
            }
            score = score.saturating_add(self.score_window(own, opp));
        }

        // Strictly inside the win range, whatever the weights.
        score.clamp(-(WIN_SCORE - 1), WIN_SCORE - 1)
    }
}
