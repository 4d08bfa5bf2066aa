//! CLI infrastructure for the ttt-weights toolkit
//!
//! Subcommands for training, running tournaments, inspecting stores and
//! watching single games.

pub mod commands;
pub mod output;
