//! Core types and capabilities for the tic-tac-toe engine
//!
//! This crate provides the data model shared by the rules engine and players:
//! - `Board` / `ReadOnlyBoard`: square grids of optional marks, with the `Grid`
//!   trait supplying rows, columns, diagonals, corners and free cells
//! - `Mark`: the symbol a player places
//! - `Outcome`: winner, tie or ongoing
//! - `TryMoves` / `Player`: the contract between the game and its players
//! - `GameError`: the shared error taxonomy

pub mod board;
pub mod error;
pub mod mark;
pub mod outcome;
pub mod player;

// Re-export main types for convenience
pub use board::{Board, Grid, ReadOnlyBoard};
pub use error::GameError;
pub use mark::Mark;
pub use outcome::Outcome;
pub use player::{Player, TryMoves};
