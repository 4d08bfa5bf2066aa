//! Single-game loop

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    ports::{Decision, Policy},
    tictactoe::{Board, GameResult, Player},
};

/// Every board of a finished game, opening and terminal board included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub history: Vec<Board>,
    pub result: GameResult,
}

impl GameRecord {
    /// Moves made during the game
    pub fn moves(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn final_board(&self) -> Option<&Board> {
        self.history.last()
    }

    pub fn winner(&self) -> Option<Player> {
        self.result.winner()
    }
}

/// Plays one game between two policies and hands them the history.
///
/// # Examples
///
/// ```
/// use ttt_weights::{pipeline::GameRunner, policy::RandomPolicy};
///
/// let mut x = RandomPolicy::with_seed("x", 1);
/// let mut o = RandomPolicy::with_seed("o", 2);
/// let record = GameRunner::new().play(&mut x, &mut o)?;
/// assert!(record.moves() <= 9);
/// # Ok::<(), ttt_weights::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GameRunner {
    start: Board,
}

impl GameRunner {
    /// Games start from the empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Games start from `start` instead of the empty board
    pub fn from_board(start: Board) -> Self {
        Self { start }
    }

    /// Play until the board is terminal, then call `on_game_end` on both
    /// policies, X first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if a policy answers a live board with
    /// anything but a single legal move. Policy and store errors propagate.
    pub fn play(&self, x: &mut dyn Policy, o: &mut dyn Policy) -> Result<GameRecord> {
        let mut current = self.start;
        let mut history = vec![current];

        let result = loop {
            let (finished, outcome) = current.is_terminal();
            if let (true, Some(result)) = (finished, outcome.result()) {
                break result;
            }

            let player: &mut dyn Policy = match current.next_to_move() {
                Player::X => &mut *x,
                Player::O => &mut *o,
            };
            let next = match player.next_move(&current)? {
                Decision::Move(next) if is_successor(&current, &next) => next,
                Decision::Move(next) => {
                    return Err(Error::IllegalMove {
                        policy: player.name().to_string(),
                        board: next.to_string(),
                    });
                }
                Decision::Finished(_) => {
                    return Err(Error::IllegalMove {
                        policy: player.name().to_string(),
                        board: current.to_string(),
                    });
                }
            };
            history.push(next);
            current = next;
        };

        debug!(
            x = x.name(),
            o = o.name(),
            %result,
            moves = history.len() - 1,
            "game finished"
        );
        x.on_game_end(&history)?;
        o.on_game_end(&history)?;

        Ok(GameRecord { history, result })
    }
}

/// Whether `next` is one move on from `current`, up to symmetry
fn is_successor(current: &Board, next: &Board) -> bool {
    next.moves_played() == current.moves_played() + 1
        && current
            .successors(false)
            .filter_map(Result::ok)
            .any(|candidate| candidate == *next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PolicyConfig,
        policy::{RandomPolicy, WeightedPolicy},
        store::{StateStore, lock_store},
    };

    struct Cheater;

    impl Policy for Cheater {
        fn next_move(&mut self, board: &Board) -> Result<Decision> {
            // two marks at once
            let first = board.place(2, 2).or_else(|_| board.place(0, 0))?;
            let second = first.place(1, 1).or_else(|_| first.place(0, 1))?;
            Ok(Decision::Move(second))
        }

        fn name(&self) -> &str {
            "cheater"
        }

        fn set_rng_seed(&mut self, _seed: u64) {}
    }

    #[test]
    fn test_random_game_terminates() {
        for seed in 0..20 {
            let mut x = RandomPolicy::with_seed("x", seed);
            let mut o = RandomPolicy::with_seed("o", seed + 100);
            let record = GameRunner::new().play(&mut x, &mut o).unwrap();

            assert!(record.moves() >= 5 && record.moves() <= 9);
            let last = record.final_board().unwrap();
            let (finished, outcome) = last.is_terminal();
            assert!(finished);
            assert_eq!(outcome.result(), Some(record.result));
            assert!(record.history[0].same_grid(&Board::empty()));
        }
    }

    #[test]
    fn test_history_is_a_move_sequence() {
        let mut x = RandomPolicy::with_seed("x", 4);
        let mut o = RandomPolicy::with_seed("o", 5);
        let record = GameRunner::new().play(&mut x, &mut o).unwrap();
        for (index, board) in record.history.iter().enumerate() {
            assert_eq!(board.moves_played(), index);
        }
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut x = Cheater;
        let mut o = RandomPolicy::with_seed("o", 1);
        let result = GameRunner::new().play(&mut x, &mut o);
        assert!(matches!(result, Err(Error::IllegalMove { policy, .. }) if policy == "cheater"));
    }

    #[test]
    fn test_terminal_start_plays_no_moves() {
        let start = Board::parse("XXX/OO-/---").unwrap();
        let mut x = RandomPolicy::with_seed("x", 1);
        let mut o = RandomPolicy::with_seed("o", 2);
        let record = GameRunner::from_board(start).play(&mut x, &mut o).unwrap();
        assert_eq!(record.moves(), 0);
        assert_eq!(record.result, GameResult::XWon);
    }

    #[test]
    fn test_learning_players_update_store() {
        let store = StateStore::new().shared();
        let mut x = WeightedPolicy::new("x", store.clone(), PolicyConfig::new().with_seed(1)).unwrap();
        let mut o = RandomPolicy::with_seed("o", 2);
        let record = GameRunner::new().play(&mut x, &mut o).unwrap();

        let guard = lock_store(&store).unwrap();
        for board in &record.history {
            assert_eq!(guard.get_weight(board).play_count, 1);
        }
        assert_eq!(guard.len(), record.history.len());
    }
}
