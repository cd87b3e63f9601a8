//! Error taxonomy shared by the board, the rules engine and the players
//!
//! Every failure aborts the operation that raised it and is handed back to the
//! immediate caller. Nothing in the core retries.

use crate::mark::Mark;

/// Errors raised by board, game and player operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// An index, dimension or setting fell outside its valid bounds
    #[error("Out of range: {0}")]
    OutOfRange(String),
    /// A write targeted a cell that already holds a mark
    #[error("Cell {index} is already occupied by {mark}")]
    StateConflict { index: usize, mark: Mark },
    /// A mutation was attempted through a read-only view, or a player has no
    /// way to produce a move
    #[error("Capability denied: {0}")]
    CapabilityDenied(String),
    /// A strategy chain ran out of options; the chain itself is broken
    #[error("Logic error: {0}")]
    LogicError(String),
    /// A mark was empty, or two players were given the same mark
    #[error("Invalid mark: {0}")]
    InvalidMark(String),
    /// The move input source failed before producing a move
    #[error("Input error: {0}")]
    Input(String),
}

impl GameError {
    pub(crate) fn index_out_of_range(index: usize, size: usize) -> Self {
        GameError::OutOfRange(format!(
            "index {} is outside the board (0..{})",
            index, size
        ))
    }
}
