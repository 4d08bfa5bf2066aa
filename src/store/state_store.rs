//! Weight table keyed by canonical state, bucketed by move count

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    snapshot::StoreSnapshot,
    weight::{OutcomeAdjustments, WeightRecord},
};
use crate::{
    Error, Result,
    tictactoe::{Board, GameResult},
    types::{BUCKET_COUNT, CanonicalKey, DEFAULT_WEIGHT},
};

/// Handle for policies that train against one table
pub type SharedStore = Arc<Mutex<StateStore>>;

/// Lock a shared store, reporting a poisoned lock as an error
pub fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, StateStore>> {
    store.lock().map_err(|_| Error::StoreUnavailable {
        message: "a previous holder of the store lock panicked".to_string(),
    })
}

/// Every canonical state seen in committed games with its learned weight.
///
/// States live in the bucket matching their move count. Lookups of unseen
/// states return a default record without inserting it; only
/// [`StateStore::record_outcome`] commits a state.
///
/// # Examples
///
/// ```
/// use ttt_weights::{store::StateStore, tictactoe::{Board, GameResult}};
///
/// let mut store = StateStore::new();
/// let board = Board::parse("X--/---/---").unwrap();
/// assert_eq!(store.get_weight(&board).weight, 0.7);
///
/// store.record_outcome(&board, GameResult::XWon);
/// store.record_outcome(&board.rotate(1), GameResult::Draw);
///
/// let record = store.get_weight(&board);
/// assert_eq!(record.play_count, 2);
/// assert!((record.weight - 0.85).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "StoreSnapshot", try_from = "StoreSnapshot")]
pub struct StateStore {
    buckets: Vec<HashMap<CanonicalKey, WeightRecord>>,
    default_weight: f64,
    adjustments: OutcomeAdjustments,
}

impl StateStore {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_WEIGHT, OutcomeAdjustments::default())
    }

    pub fn with_default_weight(default_weight: f64) -> Self {
        Self::with_config(default_weight, OutcomeAdjustments::default())
    }

    pub fn with_adjustments(adjustments: OutcomeAdjustments) -> Self {
        Self::with_config(DEFAULT_WEIGHT, adjustments)
    }

    pub fn with_config(default_weight: f64, adjustments: OutcomeAdjustments) -> Self {
        Self {
            buckets: vec![HashMap::new(); BUCKET_COUNT],
            default_weight,
            adjustments,
        }
    }

    /// Wrap the store for sharing between policies
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn adjustments(&self) -> OutcomeAdjustments {
        self.adjustments
    }

    fn bucket(&self, board: &Board) -> &HashMap<CanonicalKey, WeightRecord> {
        &self.buckets[board.moves_played()]
    }

    /// Weight of the board's canonical state, or a default record if unseen
    pub fn get_weight(&self, board: &Board) -> WeightRecord {
        self.bucket(board)
            .get(board.canonical_key())
            .copied()
            .unwrap_or_else(|| WeightRecord::fresh(self.default_weight))
    }

    /// Weight of the board's canonical state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if the state has never been recorded.
    pub fn get_weight_strict(&self, board: &Board) -> Result<WeightRecord> {
        self.bucket(board)
            .get(board.canonical_key())
            .copied()
            .ok_or_else(|| Error::UnknownKey {
                key: board.canonical_key().to_string(),
            })
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.bucket(board).contains_key(board.canonical_key())
    }

    /// Credit one finished result to the board's canonical state
    pub fn record_outcome(&mut self, board: &Board, result: GameResult) -> WeightRecord {
        let adjustment = self.adjustments.for_result(result);
        let default_weight = self.default_weight;
        let record = self.buckets[board.moves_played()]
            .entry(*board.canonical_key())
            .or_insert_with(|| WeightRecord::fresh(default_weight));
        record.update(adjustment);
        trace!(
            state = %board.canonical_key(),
            %result,
            weight = record.weight,
            play_count = record.play_count,
            "recorded outcome"
        );
        *record
    }

    /// Credit every board of a finished game with the game's result
    pub fn apply_game_history(&mut self, history: &[Board], result: GameResult) {
        for board in history {
            self.record_outcome(board, result);
        }
        debug!(states = history.len(), %result, "applied game history");
    }

    /// Number of distinct canonical states recorded
    pub fn len(&self) -> usize {
        self.buckets.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(HashMap::is_empty)
    }

    /// Number of states recorded with the given move count
    pub fn bucket_len(&self, moves_played: usize) -> usize {
        self.buckets.get(moves_played).map_or(0, HashMap::len)
    }

    /// Known states with their records for the given move counts
    pub fn known_states(&self, moves_played: &[usize]) -> Vec<(CanonicalKey, WeightRecord)> {
        moves_played
            .iter()
            .filter_map(|&moves| self.buckets.get(moves))
            .flat_map(|bucket| bucket.iter().map(|(key, record)| (*key, *record)))
            .collect()
    }

    /// All recorded states as (move count, key, record)
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CanonicalKey, &WeightRecord)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(moves, bucket)| bucket.iter().map(move |(key, record)| (moves, key, record)))
    }

    /// Forget every recorded state
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Insert a record as-is, for restoring snapshots
    pub(crate) fn contains_key(&self, key: &CanonicalKey) -> bool {
        self.buckets[key.moves_played()].contains_key(key)
    }

    pub(crate) fn restore(&mut self, key: CanonicalKey, record: WeightRecord) {
        self.buckets[key.moves_played()].insert(key, record);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
