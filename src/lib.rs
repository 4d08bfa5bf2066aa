//! Tic-tac-toe players that learn a weight per symmetry-canonical state
//!
//! This crate provides:
//! - An immutable, validated board whose identity ignores rotations and reflections
//! - A generic dihedral symmetry engine for square grids
//! - A bucketed state store updated from finished games
//! - Weighted and random policies, a game loop and round-robin tournaments
//! - Store persistence and a command-line front end

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod store;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::CanonicalKey;
