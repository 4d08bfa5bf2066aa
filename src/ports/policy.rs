//! Policy port - abstraction for move selection and post-game learning
//!
//! The game loop only talks to this trait. Weighted learners and the random
//! baseline are adapters behind it.

use crate::{
    Result,
    tictactoe::{Board, Outcome},
};

/// What a policy decided for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The board reached by the chosen move
    Move(Board),
    /// The board was already terminal; no move was made
    Finished(Outcome),
}

impl Decision {
    pub fn board(&self) -> Option<&Board> {
        match self {
            Decision::Move(board) => Some(board),
            Decision::Finished(_) => None,
        }
    }
}

/// Policy trait - unified interface for every player
///
/// # Examples
///
/// ```no_run
/// use ttt_weights::{
///     ports::{Decision, Policy},
///     tictactoe::Board,
/// };
///
/// fn first_move(policy: &mut dyn Policy) -> ttt_weights::Result<Option<Board>> {
///     Ok(policy.next_move(&Board::empty())?.board().copied())
/// }
/// ```
pub trait Policy: Send {
    /// Choose the next board given the current one.
    ///
    /// Returns [`Decision::Finished`] without moving if `board` is terminal.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read or no successor exists.
    fn next_move(&mut self, board: &Board) -> Result<Decision>;

    /// Called once per finished game with every board of the game, the
    /// opening and the terminal board included.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for policies that never learn.
    fn on_game_end(&mut self, _history: &[Board]) -> Result<()> {
        Ok(())
    }

    /// Name used in standings and logs
    fn name(&self) -> &str;

    /// Reseed the policy's random number generator.
    ///
    /// Tournaments call this with a fixed seed for reproducible runs.
    fn set_rng_seed(&mut self, seed: u64);
}
