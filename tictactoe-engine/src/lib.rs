//! Tic-tac-toe rules engine and players
//!
//! This crate drives a game between two players on top of `tictactoe-core`:
//! - `Game`: turn order, the official board and the speculative overlay that
//!   players use to try moves before committing one
//! - `rules::outcome`: win and tie detection on any square board
//! - `HumanPlayer`: moves supplied by a callback
//! - `CpuPlayer`: moves chosen by a chain of strategies, from random guesses
//!   up to a full minimax search
//!
//! ```
//! use std::rc::Rc;
//! use tictactoe_engine::{CpuPlayer, Difficulty, Game, Mark, Outcome};
//!
//! let x = CpuPlayer::new(Mark::new("X")?).with_difficulty(Difficulty::Hard);
//! let o = CpuPlayer::new(Mark::new("O")?).with_difficulty(Difficulty::Hard);
//! let mut game = Game::new(3, Rc::new(x), Rc::new(o))?;
//!
//! assert_eq!(game.run()?, Outcome::Tie);
//! # Ok::<(), tictactoe_engine::GameError>(())
//! ```

pub mod cpu;
pub mod game;
pub mod human;
pub mod rules;

pub use cpu::{CpuPlayer, Difficulty, Strategy};
pub use game::Game;
pub use human::{HumanPlayer, MoveRequest};

// Re-export core types so callers only need one dependency
pub use tictactoe_core::{
    Board, GameError, Grid, Mark, Outcome, Player, ReadOnlyBoard, TryMoves,
};
