//! Round-robin tournaments

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::game::GameRunner;
use crate::{
    Error, Result,
    ports::{Observer, Policy},
    tictactoe::GameResult,
};

/// Win/draw/loss tally of one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl PlayerRecord {
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}

/// Per-player tallies keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings {
    records: BTreeMap<String, PlayerRecord>,
}

impl Standings {
    fn with_players<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            records: names
                .into_iter()
                .map(|name| (name.to_string(), PlayerRecord::default()))
                .collect(),
        }
    }

    /// Credit a finished game to both players
    pub fn record(&mut self, x_name: &str, o_name: &str, result: GameResult) {
        let (x_delta, o_delta) = match result {
            GameResult::XWon => ((1, 0, 0), (0, 0, 1)),
            GameResult::OWon => ((0, 0, 1), (1, 0, 0)),
            GameResult::Draw => ((0, 1, 0), (0, 1, 0)),
        };
        for (name, (wins, draws, losses)) in [(x_name, x_delta), (o_name, o_delta)] {
            let entry = self.records.entry(name.to_string()).or_default();
            entry.wins += wins;
            entry.draws += draws;
            entry.losses += losses;
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.get(name)
    }

    /// Players in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Games played in total (each game counts once)
    pub fn games_played(&self) -> usize {
        self.records.values().map(PlayerRecord::games).sum::<usize>() / 2
    }
}

/// Games in a round robin: every ordered pair of distinct players, `rounds` times
pub fn match_count(rounds: usize, players: usize) -> usize {
    if players < 2 {
        return 0;
    }
    rounds * players * (players - 1)
}

/// Round robin where every player meets every other as both X and O.
///
/// # Examples
///
/// ```
/// use ttt_weights::{
///     pipeline::Tournament,
///     policy::RandomPolicy,
///     ports::Policy,
/// };
///
/// let mut players: Vec<Box<dyn Policy>> = vec![
///     Box::new(RandomPolicy::new("a")),
///     Box::new(RandomPolicy::new("b")),
/// ];
/// let standings = Tournament::new(3).with_seed(1).run(&mut players)?;
/// assert_eq!(standings.games_played(), 6);
/// # Ok::<(), ttt_weights::Error>(())
/// ```
pub struct Tournament {
    rounds: usize,
    seed: Option<u64>,
    runner: GameRunner,
    observers: Vec<Box<dyn Observer>>,
}

impl Tournament {
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            seed: None,
            runner: GameRunner::new(),
            observers: Vec::new(),
        }
    }

    /// Reseed every player from this seed before the first game
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_runner(mut self, runner: GameRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play the tournament.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if two players share a name;
    /// game, policy and observer errors propagate.
    pub fn run(&mut self, players: &mut [Box<dyn Policy>]) -> Result<Standings> {
        let mut names = HashSet::new();
        for player in players.iter() {
            if !names.insert(player.name().to_string()) {
                return Err(Error::InvalidConfiguration {
                    message: format!("duplicate player name '{}'", player.name()),
                });
            }
        }

        if let Some(seed) = self.seed {
            for (index, player) in players.iter_mut().enumerate() {
                player.set_rng_seed(seed.wrapping_add(index as u64));
            }
        }

        let total = match_count(self.rounds, players.len());
        info!(rounds = self.rounds, players = players.len(), total, "starting tournament");
        for observer in &mut self.observers {
            observer.on_tournament_start(total)?;
        }

        let mut standings = Standings::with_players(players.iter().map(|p| p.name()));
        let mut game_num = 0;
        for x_index in 0..players.len() {
            for o_index in 0..players.len() {
                if x_index == o_index {
                    continue;
                }
                for _ in 0..self.rounds {
                    let (x, o) = pair_mut(players, x_index, o_index);
                    let record = self.runner.play(x.as_mut(), o.as_mut())?;
                    game_num += 1;

                    standings.record(x.name(), o.name(), record.result);
                    for observer in &mut self.observers {
                        observer.on_game_end(game_num, x.name(), o.name(), &record)?;
                    }
                }
            }
        }

        info!(games = game_num, "tournament finished");
        for observer in &mut self.observers {
            observer.on_tournament_end(&standings)?;
        }
        Ok(standings)
    }
}

/// Two distinct elements of a slice, mutably
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (left, right) = items.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}
