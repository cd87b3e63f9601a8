//! Human players
//!
//! The engine never talks to a terminal itself. A `HumanPlayer` forwards each
//! move request to a callback supplied by the surrounding application, which
//! is responsible for prompting and re-prompting until it has a usable index.

use std::fmt;

use tictactoe_core::{GameError, Mark, Player, ReadOnlyBoard, TryMoves};

/// Callback that asks a person for a move on the given board
pub type MoveRequest = Box<dyn Fn(&ReadOnlyBoard) -> Result<usize, GameError>>;

/// A player whose moves come from outside the engine
pub struct HumanPlayer {
    mark: Mark,
    request: Option<MoveRequest>,
}

impl HumanPlayer {
    /// Create a player with no input source; asking it for a move fails
    /// until one is configured with `set_input`
    pub fn new(mark: Mark) -> Self {
        Self { mark, request: None }
    }

    /// Create a player that asks `request` for every move
    pub fn with_input<F>(mark: Mark, request: F) -> Self
    where
        F: Fn(&ReadOnlyBoard) -> Result<usize, GameError> + 'static,
    {
        Self {
            mark,
            request: Some(Box::new(request)),
        }
    }

    /// Replace the input source
    pub fn set_input<F>(&mut self, request: F)
    where
        F: Fn(&ReadOnlyBoard) -> Result<usize, GameError> + 'static,
    {
        self.request = Some(Box::new(request));
    }
}

impl Player for HumanPlayer {
    fn mark(&self) -> &Mark {
        &self.mark
    }

    fn best_move(&self, game: &mut dyn TryMoves) -> Result<usize, GameError> {
        let request = self.request.as_ref().ok_or_else(|| {
            GameError::CapabilityDenied(format!(
                "no move input configured for player {}",
                self.mark
            ))
        })?;
        request(&game.board())
    }
}

impl fmt::Debug for HumanPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumanPlayer")
            .field("mark", &self.mark)
            .field("has_input", &self.request.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use std::rc::Rc;
    use tictactoe_core::Grid;

    fn mark(symbol: &str) -> Mark {
        Mark::new(symbol).unwrap()
    }

    #[test]
    fn test_missing_input_is_denied() {
        let player = Rc::new(HumanPlayer::new(mark("X")));
        let mut game = Game::new(3, player.clone(), Rc::new(HumanPlayer::new(mark("O")))).unwrap();

        let err = player.best_move(&mut game).unwrap_err();
        assert!(matches!(err, GameError::CapabilityDenied(_)));
    }

    #[test]
    fn test_request_sees_current_board() {
        // Picks the highest free cell
        let player = Rc::new(HumanPlayer::with_input(mark("X"), |board| {
            Ok(*board.available().last().unwrap())
        }));
        let mut game = Game::new(3, player.clone(), Rc::new(HumanPlayer::new(mark("O")))).unwrap();

        assert_eq!(player.best_move(&mut game).unwrap(), 8);
        game.play(8).unwrap();
        game.play(7).unwrap();
        assert_eq!(player.best_move(&mut game).unwrap(), 6);
    }

    #[test]
    fn test_set_input_replaces_source() {
        let mut player = HumanPlayer::new(mark("X"));
        player.set_input(|_| Ok(3));
        let player = Rc::new(player);
        let mut game = Game::new(3, player.clone(), Rc::new(HumanPlayer::new(mark("O")))).unwrap();

        assert_eq!(player.best_move(&mut game).unwrap(), 3);
    }

    #[test]
    fn test_input_errors_propagate() {
        let player = Rc::new(HumanPlayer::with_input(mark("X"), |_| {
            Err(GameError::Input("stdin closed".to_string()))
        }));
        let mut game = Game::new(3, player.clone(), Rc::new(HumanPlayer::new(mark("O")))).unwrap();

        assert_eq!(
            player.best_move(&mut game).unwrap_err(),
            GameError::Input("stdin closed".to_string())
        );
    }
}
