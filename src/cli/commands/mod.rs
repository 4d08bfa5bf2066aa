//! Subcommand implementations

pub mod inspect;
pub mod play;
pub mod tournament;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{
    adapters::repository_for_path,
    config::PolicyConfig,
    policy::{RandomPolicy, WeightedPolicy},
    ports::Policy,
    store::{SharedStore, StateStore},
};

/// Kinds of player a command can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    Weighted,
    Random,
}

pub(crate) fn load_store(path: &Path) -> Result<StateStore> {
    repository_for_path(path)
        .load(path)
        .with_context(|| format!("failed to load store from {}", path.display()))
}

pub(crate) fn save_store(store: &StateStore, path: &Path) -> Result<()> {
    repository_for_path(path)
        .save(store, path)
        .with_context(|| format!("failed to save store to {}", path.display()))
}

pub(crate) fn lock(store: &SharedStore) -> Result<std::sync::MutexGuard<'_, StateStore>> {
    crate::store::lock_store(store).context("store lock poisoned")
}

pub(crate) fn build_player(
    kind: PolicyKind,
    name: &str,
    store: &SharedStore,
    config: &PolicyConfig,
) -> Result<Box<dyn Policy>> {
    Ok(match kind {
        PolicyKind::Weighted => Box::new(
            WeightedPolicy::new(name, store.clone(), config.clone())
                .with_context(|| format!("failed to create weighted player '{name}'"))?,
        ),
        PolicyKind::Random => match config.seed {
            Some(seed) => Box::new(RandomPolicy::with_seed(name, seed)),
            None => Box::new(RandomPolicy::new(name)),
        },
    })
}
