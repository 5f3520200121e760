use crate::game::GameState;

/// Interface between a turn loop and anything that picks columns.
pub trait Agent {
    /// Column to play for `state.current_player()`, or `None` once the game is over or
    /// the board is full.
    fn select_move(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
