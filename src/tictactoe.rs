//! Tic-Tac-Toe board, symmetry and move generation

pub mod board;
pub mod lines;
pub mod moves;
pub mod symmetry;

pub use board::{Board, Cell, GameResult, Outcome, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use moves::{Successors, successors};
pub use symmetry::{D4Transform, SquareGrid, all_transforms, are_equivalent};
