//! Capabilities exchanged between the rules engine and its players
//!
//! A `Player` is asked for a move through `best_move`, and receives the game as
//! a `TryMoves` view. Through that view it can read the board, ask who the
//! opponent is, and play speculative moves on a private overlay that never
//! touches the official board.

use std::rc::Rc;

use crate::board::ReadOnlyBoard;
use crate::error::GameError;
use crate::mark::Mark;
use crate::outcome::Outcome;

/// Look-ahead access to a game in progress
///
/// While a speculative overlay exists, every read (`board`, `game_over`) sees
/// the overlay instead of the official board.
pub trait TryMoves {
    /// Snapshot of the active board (speculative if present, else official)
    fn board(&self) -> ReadOnlyBoard;

    /// The player who is not about to move
    fn opponent(&self) -> Rc<dyn Player>;

    /// Scan the active board for a winner or a tie
    fn game_over(&self) -> Outcome;

    /// Place `mark` at `location` on the speculative overlay
    ///
    /// The overlay is copied from the official board on the first attempt of a
    /// sequence. The location must be an empty cell of the overlay.
    ///
    /// # Errors
    ///
    /// `OutOfRange` or `StateConflict` from the overlay board.
    fn attempt(&mut self, location: usize, mark: &Mark) -> Result<(), GameError>;

    /// Clear `location` on the overlay, or drop the whole overlay when `None`
    ///
    /// Does nothing when no overlay exists.
    fn undo(&mut self, location: Option<usize>);
}

/// Anything that can choose a move for a mark
///
/// # Example
///
/// ```rust
/// use tictactoe_core::{GameError, Grid, Mark, Player, TryMoves};
///
/// /// Always plays the lowest free cell
/// struct FirstFree {
///     mark: Mark,
/// }
///
/// impl Player for FirstFree {
///     fn mark(&self) -> &Mark {
///         &self.mark
///     }
///
///     fn best_move(&self, game: &mut dyn TryMoves) -> Result<usize, GameError> {
///         game.board()
///             .available()
///             .first()
///             .copied()
///             .ok_or_else(|| GameError::LogicError("no possible moves".to_string()))
///     }
/// }
/// ```
pub trait Player {
    /// The mark this player places; fixed for the player's lifetime
    fn mark(&self) -> &Mark;

    /// Choose the board index to play next
    ///
    /// Implementations that speculate must leave the game without an overlay
    /// when they return, whether they succeed or fail.
    fn best_move(&self, game: &mut dyn TryMoves) -> Result<usize, GameError>;
}
