use super::player::Player;
use crate::error::{BoardError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    fn bits(self) -> u128 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => 2,
        }
    }
}

/// The cell a piece landed in. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}

/// Exact encoding of every cell, two bits each (42 cells fit in 84 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u128);

impl Fingerprint {
    pub fn value(self) -> u128 {
        self.0
    }
}

/// Directions walked by the win check: horizontal, vertical, `\` and `/`.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from a numeric grid: 0 = empty, 1 = red, 2 = yellow, row 0 on top.
    ///
    /// Rejects unknown cell values and pieces hanging over an empty cell.
    pub fn from_rows(rows: &[[u8; COLS]; ROWS]) -> Result<Self, BoardError> {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[row][col] = match value {
                    0 => Cell::Empty,
                    1 => Cell::Red,
                    2 => Cell::Yellow,
                    _ => return Err(BoardError::InvalidCell { row, col, value }),
                };
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if cells[row][col] != Cell::Empty && cells[row + 1][col] == Cell::Empty {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(Board { cells })
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column accepts a piece iff it exists and its top cell is empty.
    pub fn is_legal_move(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col] == Cell::Empty
    }

    /// Lowest empty row of a column, if any.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece for `player` into `col`, returning where it landed.
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<Placement, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = player.to_cell();
        Ok(Placement { row, col })
    }

    /// Take back the piece at `placement`, which must be the topmost piece of its column.
    pub fn undo_move(&mut self, placement: Placement) {
        let Placement { row, col } = placement;
        debug_assert!(self.cells[row][col] != Cell::Empty, "undo of an empty cell");
        debug_assert!(
            row == 0 || self.cells[row - 1][col] == Cell::Empty,
            "undo must remove the topmost piece of a column"
        );
        self.cells[row][col] = Cell::Empty;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_legal_move(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    pub fn empty_count(&self) -> usize {
        ROWS * COLS - self.piece_count()
    }

    /// Whether the piece at (row, col) is part of four in a row.
    ///
    /// Walks outward in both directions along each axis, so the cost does not depend on
    /// the rest of the board.
    pub fn winning_line_through(&self, row: usize, col: usize) -> bool {
        let cell = self.cells[row][col];
        if cell == Cell::Empty {
            return false;
        }

        AXES.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= 4
        })
    }

    /// Count contiguous `cell` pieces starting one step away from (row, col).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Full-board scan for a side owning four in a row. Used where no last move is known.
    pub fn winner(&self) -> Option<Player> {
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.winning_line_through(row, col) {
                    return Player::from_cell(self.cells[row][col]);
                }
            }
        }
        None
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let packed = self
            .cells
            .iter()
            .flatten()
            .fold(0u128, |acc, cell| (acc << 2) | cell.bits());
        Fingerprint(packed)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference check: some 4-window containing (row, col) is filled with its piece.
    fn four_contains(board: &Board, row: usize, col: usize) -> bool {
        let cell = board.get(row, col);
        if cell == Cell::Empty {
            return false;
        }
        AXES.iter().any(|&(dr, dc)| {
            (0..4).any(|back| {
                let start_r = row as isize - back * dr;
                let start_c = col as isize - back * dc;
                (0..4).all(|i| {
                    let r = start_r + i * dr;
                    let c = start_c + i * dc;
                    (0..ROWS as isize).contains(&r)
                        && (0..COLS as isize).contains(&c)
                        && board.get(r as usize, c as usize) == cell
                })
            })
        })
    }

    fn random_legal(board: &Board, rng: &mut StdRng) -> usize {
        let legal: Vec<usize> = (0..COLS).filter(|&c| board.is_legal_move(c)).collect();
        legal[rng.random_range(0..legal.len())]
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.empty_count(), 42);
    }

    #[test]
    fn test_apply_move_stacks_pieces() {
        let mut board = Board::new();

        let first = board.apply_move(3, Player::Red).unwrap();
        assert_eq!(first, Placement { row: 5, col: 3 });
        assert_eq!(board.get(5, 3), Cell::Red);

        let second = board.apply_move(3, Player::Yellow).unwrap();
        assert_eq!(second, Placement { row: 4, col: 3 });
        assert_eq!(board.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.apply_move(0, Player::Red).unwrap();
        }

        assert!(!board.is_legal_move(0));
        assert_eq!(board.next_open_row(0), None);
        assert_eq!(
            board.apply_move(0, Player::Yellow),
            Err(MoveError::ColumnFull(0))
        );
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.is_legal_move(7));
        assert_eq!(
            board.apply_move(7, Player::Red),
            Err(MoveError::InvalidColumn(7))
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            assert!(!board.is_full());
            for _ in 0..ROWS {
                board.apply_move(col, Player::Red).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn legality_matches_top_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut player = Player::Red;
            while !board.is_full() {
                for col in 0..COLS {
                    assert_eq!(board.is_legal_move(col), board.get(0, col) == Cell::Empty);
                }
                let col = random_legal(&board, &mut rng);
                board.apply_move(col, player).unwrap();
                player = player.other();
            }
        }
    }

    #[test]
    fn apply_then_undo_restores_board() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut player = Player::Red;
            while !board.is_full() {
                let before = board;
                for col in (0..COLS).filter(|&c| before.is_legal_move(c)) {
                    let placement = board.apply_move(col, player).unwrap();
                    board.undo_move(placement);
                    assert_eq!(board, before);
                }
                let col = random_legal(&board, &mut rng);
                board.apply_move(col, player).unwrap();
                player = player.other();
            }
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.apply_move(col, Player::Red).unwrap();
        }
        assert!(board.winning_line_through(5, 2));
        assert!(board.winning_line_through(5, 0));
        assert_eq!(board.winner(), Some(Player::Red));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        let mut last = None;
        for _ in 0..4 {
            last = Some(board.apply_move(3, Player::Yellow).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last, Placement { row: 2, col: 3 });
        assert!(board.winning_line_through(last.row, last.col));
        assert_eq!(board.winner(), Some(Player::Yellow));
    }

    #[test]
    fn test_diagonal_up_win() {
        let board = Board::from_rows(&[
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 1, 0, 0, 0],
            [0, 0, 1, 2, 0, 0, 0],
            [0, 1, 2, 2, 0, 0, 0],
            [1, 2, 2, 2, 0, 0, 0],
        ])
        .unwrap();
        assert!(board.winning_line_through(2, 3));
        assert!(board.winning_line_through(5, 0));
        assert!(!board.winning_line_through(3, 3));
    }

    #[test]
    fn test_diagonal_down_win() {
        let board = Board::from_rows(&[
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 2, 1, 0, 0],
            [0, 0, 0, 2, 2, 1, 0],
            [0, 0, 0, 2, 2, 2, 1],
        ])
        .unwrap();
        assert!(board.winning_line_through(2, 3));
        assert!(board.winning_line_through(4, 5));
        assert_eq!(board.winner(), Some(Player::Red));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.apply_move(col, Player::Red).unwrap();
        }
        assert!(!board.winning_line_through(5, 1));
        assert!(!board.winning_line_through(4, 1));
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn scoped_check_agrees_with_window_scan() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut board = Board::new();
            let mut player = Player::Red;
            while !board.is_full() {
                let col = random_legal(&board, &mut rng);
                let Placement { row, col } = board.apply_move(col, player).unwrap();
                assert_eq!(
                    board.winning_line_through(row, col),
                    four_contains(&board, row, col),
                    "mismatch at ({row}, {col}) on {board:?}"
                );
                player = player.other();
            }
        }
    }

    #[test]
    fn from_rows_rejects_bad_cells() {
        let mut rows = [[0u8; COLS]; ROWS];
        rows[5][2] = 3;
        assert_eq!(
            Board::from_rows(&rows),
            Err(BoardError::InvalidCell { row: 5, col: 2, value: 3 })
        );
    }

    #[test]
    fn from_rows_rejects_floating_piece() {
        let mut rows = [[0u8; COLS]; ROWS];
        rows[4][6] = 1;
        assert_eq!(
            Board::from_rows(&rows),
            Err(BoardError::FloatingPiece { row: 4, col: 6 })
        );
    }

    #[test]
    fn from_rows_matches_played_moves() {
        let mut played = Board::new();
        for (col, player) in [(3, Player::Red), (3, Player::Yellow), (4, Player::Red)] {
            played.apply_move(col, player).unwrap();
        }
        let mut rows = [[0u8; COLS]; ROWS];
        rows[5][3] = 1;
        rows[4][3] = 2;
        rows[5][4] = 1;
        assert_eq!(Board::from_rows(&rows).unwrap(), played);
    }

    #[test]
    fn fingerprint_tracks_every_cell() {
        let empty = Board::new();
        assert_eq!(empty.fingerprint().value(), 0);

        let mut red = Board::new();
        red.apply_move(0, Player::Red).unwrap();
        let mut yellow = Board::new();
        yellow.apply_move(0, Player::Yellow).unwrap();
        let mut other_col = Board::new();
        other_col.apply_move(6, Player::Red).unwrap();

        assert_ne!(red.fingerprint(), yellow.fingerprint());
        assert_ne!(red.fingerprint(), other_col.fingerprint());
        assert_ne!(red.fingerprint(), empty.fingerprint());

        // Same cells via a different move order.
        let mut a = Board::new();
        a.apply_move(2, Player::Red).unwrap();
        a.apply_move(4, Player::Yellow).unwrap();
        let mut b = Board::new();
        b.apply_move(4, Player::Yellow).unwrap();
        b.apply_move(2, Player::Red).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
