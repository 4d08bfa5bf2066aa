//! Repository port for state store persistence.

use std::path::Path;

use crate::{Result, store::StateStore};

/// Port for persisting and loading a [`StateStore`].
///
/// Implementations decide the storage format; every one of them must
/// preserve each canonical state with its weight and play count.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_weights::{ports::StoreRepository, store::StateStore};
///
/// fn checkpoint<R: StoreRepository>(
///     repo: &R,
///     store: &StateStore,
///     path: &Path,
/// ) -> ttt_weights::Result<()> {
///     repo.save(store, path)
/// }
/// ```
pub trait StoreRepository {
    /// Save a store to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written or
    /// serialization fails.
    fn save(&self, store: &StateStore, path: &Path) -> Result<()>;

    /// Load a store from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing, unreadable, or holds an
    /// invalid snapshot.
    fn load(&self, path: &Path) -> Result<StateStore>;
}
