//! Learned weights for canonical board states

pub mod snapshot;
pub mod state_store;
pub mod weight;

pub use snapshot::{SNAPSHOT_VERSION, SnapshotEntry, StoreSnapshot};
pub use state_store::{SharedStore, StateStore, lock_store};
pub use weight::{OutcomeAdjustments, WeightRecord};
