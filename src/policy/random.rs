//! Uniform random baseline

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::{Decision, Policy},
    tictactoe::Board,
};

/// Picks uniformly among the successors of the current board. Never learns.
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn next_move(&mut self, board: &Board) -> Result<Decision> {
        let (finished, outcome) = board.is_terminal();
        if finished {
            return Ok(Decision::Finished(outcome));
        }

        let candidates = board.successors(false).collect::<Result<Vec<_>>>()?;
        if candidates.is_empty() {
            return Err(Error::NoSuccessors {
                board: board.to_string(),
            });
        }
        let index = self.rng.random_range(0..candidates.len());
        Ok(Decision::Move(candidates[index]))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Outcome;

    #[test]
    fn test_random_policy_moves_once() {
        let mut policy = RandomPolicy::with_seed("Random", 21);
        let board = Board::parse("X--/-O-/---").unwrap();
        match policy.next_move(&board).unwrap() {
            Decision::Move(next) => {
                assert_eq!(next.moves_played(), 3);
                let legal = board
                    .successors(false)
                    .map(|s| s.unwrap())
                    .any(|s| s.same_grid(&next));
                assert!(legal);
            }
            Decision::Finished(outcome) => panic!("unexpected finish: {outcome}"),
        }
    }

    #[test]
    fn test_random_policy_reports_finished() {
        let mut policy = RandomPolicy::new("Random");
        let full = Board::parse("XOX/XOO/OXX").unwrap();
        assert_eq!(
            policy.next_move(&full).unwrap(),
            Decision::Finished(Outcome::Draw)
        );
    }

    #[test]
    fn test_reseeding_repeats_choices() {
        let mut policy = RandomPolicy::new("Random");
        let board = Board::empty();

        policy.set_rng_seed(99);
        let first: Vec<Decision> = (0..5).map(|_| policy.next_move(&board).unwrap()).collect();
        policy.set_rng_seed(99);
        let second: Vec<Decision> = (0..5).map(|_| policy.next_move(&board).unwrap()).collect();

        for (a, b) in first.iter().zip(&second) {
            assert!(a.board().unwrap().same_grid(b.board().unwrap()));
        }
    }
}
