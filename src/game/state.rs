use super::board::{Board, Placement, COLS};
use super::player::Player;
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Play `column` for `side` on a copy of `board`.
///
/// This is the entry point for moves coming from outside the engine (e.g. a human
/// operator); the caller keeps its original board if the move is rejected.
pub fn apply_human_move(board: &Board, column: usize, side: Player) -> Result<Board, MoveError> {
    let mut next = *board;
    next.apply_move(column, side)?;
    Ok(next)
}

/// A board plus the bookkeeping a turn loop needs: whose turn it is, the last move and
/// the outcome once the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    last_move: Option<Placement>,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Empty board, Red to move.
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red,
            last_move: None,
            outcome: None,
        }
    }

    /// Resume from an arbitrary position. The outcome is recovered with a full-board scan.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let outcome = match board.winner() {
            Some(winner) => Some(GameOutcome::Winner(winner)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        };
        GameState {
            board,
            current_player: to_move,
            last_move: None,
            outcome,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<Placement> {
        self.last_move
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns that still accept a piece, left to right. Empty once the game is over.
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..COLS).filter(|&col| self.board.is_legal_move(col)).collect()
    }

    /// Apply a move and return the new state, leaving `self` untouched.
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let placement = self.board.apply_move(column, self.current_player)?;

        if self.board.winning_line_through(placement.row, placement.col) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.last_move = Some(placement);
        self.current_player = self.current_player.other();
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
