//! Perturbed-weight policy backed by a shared state store

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, trace};

use crate::{
    Error, Result,
    config::PolicyConfig,
    ports::{Decision, Policy},
    store::{SharedStore, lock_store},
    tictactoe::{Board, Player},
};

/// Picks the successor whose stored weight, scaled by Normal(1, σ) noise,
/// is best for the player to move: highest for X, lowest for O.
///
/// Ties keep the first successor in row-major order. When the input is the
/// empty board, the chosen opening is rotated a random number of quarter
/// turns so every corner and edge gets played; the canonical state is
/// unchanged.
///
/// # Examples
///
/// ```
/// use ttt_weights::{
///     config::PolicyConfig,
///     policy::WeightedPolicy,
///     ports::{Decision, Policy},
///     store::StateStore,
///     tictactoe::Board,
/// };
///
/// let store = StateStore::new().shared();
/// let mut policy =
///     WeightedPolicy::new("learner", store, PolicyConfig::new().with_seed(7)).unwrap();
///
/// match policy.next_move(&Board::empty()).unwrap() {
///     Decision::Move(board) => assert_eq!(board.moves_played(), 1),
///     Decision::Finished(_) => unreachable!(),
/// }
/// ```
pub struct WeightedPolicy {
    name: String,
    store: SharedStore,
    rng: StdRng,
    noise: Normal<f64>,
    learn: bool,
    dedupe: bool,
}

impl WeightedPolicy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the noise standard
    /// deviation is unusable.
    pub fn new(name: impl Into<String>, store: SharedStore, config: PolicyConfig) -> Result<Self> {
        config.validate()?;
        let noise = Normal::new(1.0, config.noise_std_dev).map_err(|e| {
            Error::InvalidConfiguration {
                message: format!("noise distribution: {e}"),
            }
        })?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(random()),
        };

        Ok(Self {
            name: name.into(),
            store,
            rng,
            noise,
            learn: config.learn,
            dedupe: config.dedupe_successors,
        })
    }

    /// Handle to the store this policy reads and trains
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn learns(&self) -> bool {
        self.learn
    }

    /// Switch learning on or off, e.g. to freeze weights for evaluation
    pub fn set_learning(&mut self, learn: bool) {
        self.learn = learn;
    }
}

impl Policy for WeightedPolicy {
    fn next_move(&mut self, board: &Board) -> Result<Decision> {
        let (finished, outcome) = board.is_terminal();
        if finished {
            return Ok(Decision::Finished(outcome));
        }

        let candidates = board.successors(self.dedupe).collect::<Result<Vec<_>>>()?;
        let maximize = board.next_to_move() == Player::X;

        let mut best: Option<(Board, f64)> = None;
        {
            let store = lock_store(&self.store)?;
            for candidate in candidates {
                let weight = store.get_weight(&candidate).weight;
                let score = weight * self.noise.sample(&mut self.rng);
                trace!(policy = %self.name, candidate = %candidate.encode(), weight, score, "scored");

                let better = match best {
                    None => true,
                    Some((_, best_score)) if maximize => score > best_score,
                    Some((_, best_score)) => score < best_score,
                };
                if better {
                    best = Some((candidate, score));
                }
            }
        }

        let (mut choice, score) = best.ok_or_else(|| Error::NoSuccessors {
            board: board.to_string(),
        })?;
        if board.moves_played() == 0 {
            let turns = self.rng.random_range(0..4);
            choice = choice.rotate(turns);
        }

        debug!(
            policy = %self.name,
            player = %board.next_to_move(),
            choice = %choice.encode(),
            score,
            "selected move"
        );
        Ok(Decision::Move(choice))
    }

    fn on_game_end(&mut self, history: &[Board]) -> Result<()> {
        if !self.learn {
            return Ok(());
        }

        let last = history.last().ok_or(Error::EmptyHistory)?;
        let result = last.outcome().result().ok_or_else(|| Error::UnfinishedGame {
            board: last.to_string(),
        })?;

        lock_store(&self.store)?.apply_game_history(history, result);
        debug!(policy = %self.name, %result, states = history.len(), "learned from game");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
