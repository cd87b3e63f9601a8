//! The rules engine
//!
//! `Game` owns the official board, the two players and the turn cursor. It
//! drives the turn loop and, through its `TryMoves` implementation, lets
//! players explore hypothetical moves on a private overlay board.

use std::fmt;
use std::rc::Rc;

use tictactoe_core::{Board, GameError, Mark, Outcome, Player, ReadOnlyBoard, TryMoves};
use tracing::{debug, info};

use crate::rules;

/// A game between two players on a square board
///
/// The speculative overlay, when present, supersedes the official board for
/// every read made through `TryMoves`. Committing a move always discards it.
pub struct Game {
    players: [Rc<dyn Player>; 2],
    next_player: usize,
    official: Board,
    speculative: Option<Board>,
}

impl Game {
    /// Create a game on an empty board; `first` moves first
    pub fn new(
        dimension: usize,
        first: Rc<dyn Player>,
        second: Rc<dyn Player>,
    ) -> Result<Self, GameError> {
        Self::with_board(Board::new(dimension)?, first, second)
    }

    /// Create a game that resumes from `board`, with `first` to move
    ///
    /// # Errors
    ///
    /// `InvalidMark` when both players use the same mark.
    pub fn with_board(
        board: Board,
        first: Rc<dyn Player>,
        second: Rc<dyn Player>,
    ) -> Result<Self, GameError> {
        if first.mark() == second.mark() {
            return Err(GameError::InvalidMark(format!(
                "both players use {}",
                first.mark()
            )));
        }

        Ok(Self {
            players: [first, second],
            next_player: 0,
            official: board,
            speculative: None,
        })
    }

    /// The authoritative board, ignoring any speculative overlay
    pub fn official_board(&self) -> &Board {
        &self.official
    }

    /// Both players in turn order
    pub fn players(&self) -> &[Rc<dyn Player>; 2] {
        &self.players
    }

    /// The player about to move
    pub fn current_player(&self) -> &Rc<dyn Player> {
        &self.players[self.next_player]
    }

    /// Whether a speculative overlay currently exists
    pub fn is_speculating(&self) -> bool {
        self.speculative.is_some()
    }

    /// Commit a move for the current player and pass the turn
    ///
    /// Any speculative overlay is discarded first.
    ///
    /// # Errors
    ///
    /// `OutOfRange` or `StateConflict` when `location` is not a free cell. The
    /// turn does not advance in that case.
    pub fn play(&mut self, location: usize) -> Result<(), GameError> {
        self.speculative = None;

        let mark = self.players[self.next_player].mark().clone();
        self.official.set(location, mark.clone())?;
        debug!(mark = %mark, location, "Committed move");

        self.next_player = (self.next_player + 1) % self.players.len();
        Ok(())
    }

    /// Play turns until the game ends
    pub fn run(&mut self) -> Result<Outcome, GameError> {
        self.run_with(|_, _, _| {})
    }

    /// Play turns until the game ends, calling `on_move` after each commit
    ///
    /// The observer receives the official board, the mark just placed and its
    /// location.
    ///
    /// # Errors
    ///
    /// Whatever a player's `best_move` returns, and `OutOfRange` or
    /// `StateConflict` when a player picks a cell it may not take.
    pub fn run_with<F>(&mut self, mut on_move: F) -> Result<Outcome, GameError>
    where
        F: FnMut(&Board, &Mark, usize),
    {
        self.speculative = None;

        loop {
            let outcome = self.game_over();
            if outcome.is_over() {
                info!(outcome = %outcome, "Game finished");
                return Ok(outcome);
            }

            let player = Rc::clone(&self.players[self.next_player]);
            let location = player.best_move(self)?;
            self.play(location)?;

            on_move(&self.official, player.mark(), location);
        }
    }

    fn active_board(&self) -> &Board {
        self.speculative.as_ref().unwrap_or(&self.official)
    }
}

impl TryMoves for Game {
    fn board(&self) -> ReadOnlyBoard {
        ReadOnlyBoard::new(self.active_board())
    }

    fn opponent(&self) -> Rc<dyn Player> {
        let index = (self.next_player + 1) % self.players.len();
        Rc::clone(&self.players[index])
    }

    fn game_over(&self) -> Outcome {
        rules::outcome(self.active_board())
    }

    fn attempt(&mut self, location: usize, mark: &Mark) -> Result<(), GameError> {
        let official = &self.official;
        let board = self.speculative.get_or_insert_with(|| official.clone());
        board.set(location, mark.clone())
    }

    fn undo(&mut self, location: Option<usize>) {
        match location {
            Some(location) => {
                if let Some(board) = self.speculative.as_mut() {
                    board.clear(location);
                }
            }
            None => self.speculative = None,
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks: Vec<&Mark> = self.players.iter().map(|p| p.mark()).collect();
        f.debug_struct("Game")
            .field("players", &marks)
            .field("next_player", &self.next_player)
            .field("official", &self.official)
            .field("speculative", &self.speculative)
            .finish()
    }
}
