//! Weight records and the outcome adjustment table

use serde::{Deserialize, Serialize};

use crate::{tictactoe::GameResult, types::DEFAULT_WEIGHT};

/// Learned weight of a canonical state and how often it has been credited
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub weight: f64,
    pub play_count: u64,
}

impl WeightRecord {
    /// Record for a state that has never been credited
    pub fn fresh(default_weight: f64) -> Self {
        Self {
            weight: default_weight,
            play_count: 0,
        }
    }

    /// Fold one more observation into the running average.
    ///
    /// `weight = (play_count * weight + adjustment) / (play_count + 1)`,
    /// then `play_count` is incremented.
    pub fn update(&mut self, adjustment: f64) {
        let count = self.play_count as f64;
        self.weight = (count * self.weight + adjustment) / (count + 1.0);
        self.play_count += 1;
    }
}

impl Default for WeightRecord {
    fn default() -> Self {
        Self::fresh(DEFAULT_WEIGHT)
    }
}

/// Target value each finished result pulls a state's weight toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeAdjustments {
    pub x_won: f64,
    pub o_won: f64,
    pub draw: f64,
}

impl OutcomeAdjustments {
    pub fn for_result(&self, result: GameResult) -> f64 {
        match result {
            GameResult::XWon => self.x_won,
            GameResult::OWon => self.o_won,
            GameResult::Draw => self.draw,
        }
    }
}

impl Default for OutcomeAdjustments {
    fn default() -> Self {
        Self {
            x_won: 1.0,
            o_won: 0.0,
            draw: 0.7,
        }
    }
}
