use std::ops::Deref;

use crate::game::{Board, COLS};

/// Column ordering: center-first for better alpha-beta pruning.
pub const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Position of `col` in [`MOVE_ORDER`]; lower is preferred. Off-board columns rank last.
pub fn preference_rank(col: usize) -> usize {
    MOVE_ORDER.iter().position(|&c| c == col).unwrap_or(COLS)
}

/// Fixed-capacity list of columns, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveList {
    cols: [usize; COLS],
    len: usize,
}

impl MoveList {
    fn push(&mut self, col: usize) {
        self.cols[self.len] = col;
        self.len += 1;
    }

    /// Move `col` to the front, keeping the relative order of the rest.
    /// Columns not in the list are ignored.
    pub fn promote(&mut self, col: usize) {
        if let Some(pos) = self.iter().position(|&c| c == col) {
            self.cols[..=pos].rotate_right(1);
        }
    }
}

impl Deref for MoveList {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.cols[..self.len]
    }
}

/// Legal columns in center-out order, with `hint` (typically the cached best move for
/// this exact board) tried first.
pub fn ordered_moves(board: &Board, hint: Option<usize>) -> MoveList {
    let mut moves = MoveList::default();
    for &col in &MOVE_ORDER {
        if board.is_legal_move(col) {
            moves.push(col);
        }
    }
    if let Some(col) = hint {
        moves.promote(col);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn empty_board_uses_center_out_order() {
        let moves = ordered_moves(&Board::new(), None);
        assert_eq!(&*moves, &[3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn full_columns_are_skipped() {
        let mut board = Board::from_rows(&[
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 2, 0, 0, 0],
            [0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 1, 1, 1, 0],
            [0, 0, 0, 2, 2, 2, 0],
        ])
        .unwrap();
        assert_eq!(&*ordered_moves(&board, None), &[3, 2, 4, 1, 5, 0, 6]);

        board.apply_move(3, Player::Yellow).unwrap();
        assert_eq!(&*ordered_moves(&board, None), &[2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn hint_is_promoted_to_front() {
        let moves = ordered_moves(&Board::new(), Some(5));
        assert_eq!(&*moves, &[5, 3, 2, 4, 1, 0, 6]);

        let moves = ordered_moves(&Board::new(), Some(3));
        assert_eq!(&*moves, &[3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn illegal_hint_is_ignored() {
        let mut board = Board::new();
        for _ in 0..6 {
            board.apply_move(6, Player::Red).unwrap();
        }
        let moves = ordered_moves(&board, Some(6));
        assert_eq!(&*moves, &[3, 2, 4, 1, 5, 0]);

        let moves = ordered_moves(&board, Some(11));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn preference_rank_follows_center_out_order() {
        assert_eq!(preference_rank(3), 0);
        assert_eq!(preference_rank(2), 1);
        assert_eq!(preference_rank(4), 2);
        assert_eq!(preference_rank(6), 6);
        assert_eq!(preference_rank(9), COLS);
    }

    #[test]
    fn full_board_has_no_moves() {
        let mut board = Board::new();
        let mut player = Player::Red;
        for col in 0..COLS {
            for _ in 0..6 {
                board.apply_move(col, player).unwrap();
                player = player.other();
            }
        }
        assert!(ordered_moves(&board, None).is_empty());
    }
}
