//! Observer implementations for tournaments

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{game::GameRecord, tournament::Standings};
use crate::{Result, ports::Observer, tictactoe::GameResult};

/// Progress bar observer - shows tournament progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    draws: usize,
    o_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            draws: 0,
            o_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} D:{} O:{}", self.x_wins, self.draws, self.o_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_tournament_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        _x_name: &str,
        _o_name: &str,
        record: &GameRecord,
    ) -> Result<()> {
        match record.result {
            GameResult::XWon => self.x_wins += 1,
            GameResult::OWon => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_tournament_end(&mut self, _standings: &Standings) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Logs tournament milestones through `tracing`.
///
/// Emits about `checkpoints` info lines over a tournament; every game is
/// logged at debug level.
pub struct LoggingObserver {
    checkpoints: usize,
    interval: usize,
}

impl LoggingObserver {
    pub fn new(checkpoints: usize) -> Self {
        Self {
            checkpoints: checkpoints.max(1),
            interval: 1,
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Observer for LoggingObserver {
    fn on_tournament_start(&mut self, total_games: usize) -> Result<()> {
        self.interval = (total_games / self.checkpoints).max(1);
        info!(total_games, "tournament started");
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        x_name: &str,
        o_name: &str,
        record: &GameRecord,
    ) -> Result<()> {
        debug!(game_num, x = x_name, o = o_name, result = %record.result, moves = record.moves(), "game");
        if game_num.is_multiple_of(self.interval) {
            info!(game_num, "tournament progress");
        }
        Ok(())
    }

    fn on_tournament_end(&mut self, standings: &Standings) -> Result<()> {
        for (name, record) in standings.iter() {
            info!(
                player = name,
                wins = record.wins,
                draws = record.draws,
                losses = record.losses,
                "final standing"
            );
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_games: usize,
    total_moves: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_win_rate(&self) -> f64 {
        rate(self.x_wins, self.total_games)
    }

    pub fn o_win_rate(&self) -> f64 {
        rate(self.o_wins, self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total_games)
    }

    pub fn avg_game_length(&self) -> f64 {
        rate(self.total_moves, self.total_games)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.x_win_rate(),
            o_win_rate: self.o_win_rate(),
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Summary of tournament metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _x_name: &str,
        _o_name: &str,
        record: &GameRecord,
    ) -> Result<()> {
        self.total_games += 1;
        self.total_moves += record.moves();
        match record.result {
            GameResult::XWon => self.x_wins += 1,
            GameResult::OWon => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
        Ok(())
    }
}
