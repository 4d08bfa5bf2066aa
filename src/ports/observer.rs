//! Observer port - abstraction for tournament observation
//!
//! Observers collect data while games are played without coupling the
//! tournament loop to progress bars, logs or metrics.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error, Result,
    pipeline::{GameRecord, Standings},
};

/// Observer trait for monitoring a tournament
///
/// # Event Sequence
///
/// 1. `on_tournament_start(total_games)` once
/// 2. `on_game_end(...)` after every game
/// 3. `on_tournament_end(standings)` once
///
/// # Examples
///
/// ```no_run
/// use ttt_weights::{pipeline::GameRecord, ports::Observer};
///
/// struct GameCounter {
///     games: usize,
/// }
///
/// impl Observer for GameCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _x_name: &str,
///         _o_name: &str,
///         _record: &GameRecord,
///     ) -> ttt_weights::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called before the first game.
    fn on_tournament_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game, once both players have seen the history.
    ///
    /// `game_num` counts from 1.
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _x_name: &str,
        _o_name: &str,
        _record: &GameRecord,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the last game.
    fn on_tournament_end(&mut self, _standings: &Standings) -> Result<()> {
        Ok(())
    }
}

/// Shared handle, so the caller can read an observer back after a run
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_tournament_start(&mut self, total_games: usize) -> Result<()> {
        lock(self)?.on_tournament_start(total_games)
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        x_name: &str,
        o_name: &str,
        record: &GameRecord,
    ) -> Result<()> {
        lock(self)?.on_game_end(game_num, x_name, o_name, record)
    }

    fn on_tournament_end(&mut self, standings: &Standings) -> Result<()> {
        lock(self)?.on_tournament_end(standings)
    }
}

fn lock<O>(observer: &Arc<Mutex<O>>) -> Result<MutexGuard<'_, O>> {
    observer.lock().map_err(|_| Error::ObserverUnavailable {
        message: "observer lock poisoned".to_string(),
    })
}
