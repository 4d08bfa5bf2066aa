//! Versioned, order-stable form of a [`StateStore`] for persistence

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    state_store::StateStore,
    weight::{OutcomeAdjustments, WeightRecord},
};
use crate::{Error, Result, types::CanonicalKey};

/// Snapshot format version written by this crate
pub const SNAPSHOT_VERSION: u32 = 1;

/// One persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: CanonicalKey,
    pub moves_played: usize,
    pub weight: f64,
    pub play_count: u64,
}

/// Everything needed to rebuild a store.
///
/// Entries are sorted by move count, then key, so identical stores always
/// produce identical files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub default_weight: f64,
    pub adjustments: OutcomeAdjustments,
    pub entries: Vec<SnapshotEntry>,
}

impl StateStore {
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut entries: Vec<SnapshotEntry> = self
            .iter()
            .map(|(moves_played, key, record)| SnapshotEntry {
                key: *key,
                moves_played,
                weight: record.weight,
                play_count: record.play_count,
            })
            .collect();
        entries.sort_by(|a, b| (a.moves_played, a.key).cmp(&(b.moves_played, b.key)));

        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            default_weight: self.default_weight(),
            adjustments: self.adjustments(),
            entries,
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a snapshot written by a
    /// newer format version, and [`Error::InvalidSnapshotEntry`] for an entry
    /// whose recorded move count disagrees with its key, whose weight is not
    /// finite, or whose key already appeared earlier in the snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "snapshot version {} is newer than supported version {SNAPSHOT_VERSION}",
                    snapshot.version
                ),
            });
        }
        if snapshot.entries.is_empty() {
            warn!("loading a snapshot with no recorded states");
        }

        let mut store = StateStore::with_config(snapshot.default_weight, snapshot.adjustments);
        for (index, entry) in snapshot.entries.into_iter().enumerate() {
            let invalid = |reason: String| Error::InvalidSnapshotEntry {
                index,
                key: entry.key.to_string(),
                reason,
            };
            if entry.key.moves_played() != entry.moves_played {
                return Err(invalid(format!(
                    "recorded in bucket {} but the key has {} moves",
                    entry.moves_played,
                    entry.key.moves_played()
                )));
            }
            if !entry.weight.is_finite() {
                return Err(invalid(format!("weight {} is not finite", entry.weight)));
            }
            if store.contains_key(&entry.key) {
                return Err(invalid("duplicate key".to_string()));
            }
            store.restore(
                entry.key,
                WeightRecord {
                    weight: entry.weight,
                    play_count: entry.play_count,
                },
            );
        }
        Ok(store)
    }
}

impl From<StateStore> for StoreSnapshot {
    fn from(store: StateStore) -> Self {
        store.snapshot()
    }
}

impl TryFrom<StoreSnapshot> for StateStore {
    type Error = Error;

    fn try_from(snapshot: StoreSnapshot) -> Result<Self> {
        StateStore::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Board, GameResult};

    fn trained_store() -> StateStore {
        let mut store = StateStore::new();
        let history = [
            Board::empty(),
            Board::parse("----X----").unwrap(),
            Board::parse("O---X----").unwrap(),
        ];
        store.apply_game_history(&history, GameResult::XWon);
        store.record_outcome(&history[1], GameResult::Draw);
        store
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = trained_store();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.entries.len(), 3);

        let restored = StateStore::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_entries_sorted_by_bucket() {
        let snapshot = trained_store().snapshot();
        let moves: Vec<usize> = snapshot.entries.iter().map(|e| e.moves_played).collect();
        assert_eq!(moves, vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_newer_version() {
        let mut snapshot = trained_store().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            StateStore::from_snapshot(snapshot),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    fn rejected_entry(snapshot: StoreSnapshot) -> (usize, String) {
        match StateStore::from_snapshot(snapshot) {
            Err(Error::InvalidSnapshotEntry { index, key, .. }) => (index, key),
            other => panic!("expected InvalidSnapshotEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_mismatched_bucket() {
        let mut snapshot = trained_store().snapshot();
        snapshot.entries[0].moves_played = 5;
        assert_eq!(rejected_entry(snapshot), (0, "---------".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let mut snapshot = trained_store().snapshot();
        let mut copy = snapshot.entries[1].clone();
        copy.weight = 0.1;
        snapshot.entries.push(copy);
        assert_eq!(rejected_entry(snapshot), (3, "----X----".to_string()));
    }

    #[test]
    fn test_rejects_non_finite_weight() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut snapshot = trained_store().snapshot();
            snapshot.entries[2].weight = weight;
            let (index, _) = rejected_entry(snapshot);
            assert_eq!(index, 2);
        }
    }

    #[test]
    fn test_json_rejects_non_canonical_key() {
        let json = r#"{
            "version": 1,
            "default_weight": 0.7,
            "adjustments": {"x_won": 1.0, "o_won": 0.0, "draw": 0.7},
            "entries": [{"key": "X--------", "moves_played": 1, "weight": 1.0, "play_count": 1}]
        }"#;
        assert!(serde_json::from_str::<StateStore>(json).is_err());
    }
}
