//! Game loop and tournament pipeline
//!
//! - Playing single games between two policies
//! - Round-robin tournaments with standings
//! - Observers for progress, logs and metrics

pub mod game;
pub mod observers;
pub mod tournament;

pub use game::{GameRecord, GameRunner};
pub use observers::{LoggingObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use tournament::{PlayerRecord, Standings, Tournament, match_count};

pub use crate::ports::{Observer, Policy};
