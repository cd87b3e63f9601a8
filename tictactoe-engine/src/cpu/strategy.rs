//! Move-selection strategies
//!
//! Each strategy looks at the game through `TryMoves` and either names a cell
//! or returns `None` to let the next strategy in the chain decide. Strategies
//! that speculate always drop the overlay before returning, so they can be
//! chained in any order.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tictactoe_core::{GameError, Grid, Mark, Outcome, TryMoves};

use super::minimax;
use super::CpuPlayer;

/// A named step in a CPU player's decision chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Any free cell, uniformly at random
    RandomGuess,
    /// A cell that wins on the spot
    WinIfPossible,
    /// A cell the opponent could use to end the game on their next move
    BlockIfNecessary,
    /// The center cell when it is free
    CenterIfAvailable,
    /// The best cell found by exhaustive search
    Minimax,
}

impl Strategy {
    /// Run this strategy on behalf of `player`
    pub fn apply(
        self,
        player: &CpuPlayer,
        game: &mut dyn TryMoves,
    ) -> Result<Option<usize>, GameError> {
        match self {
            Strategy::RandomGuess => {
                let mut rng = player.rng.borrow_mut();
                Ok(random_guess(&game.board(), &mut *rng))
            }
            Strategy::WinIfPossible => win_if_possible(game, &player.mark),
            Strategy::BlockIfNecessary => block_if_necessary(game),
            Strategy::CenterIfAvailable => Ok(center_if_available(&game.board())),
            Strategy::Minimax => minimax::best_move(game, &player.mark, player.pruning),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::RandomGuess => "random_guess",
            Strategy::WinIfPossible => "win_if_possible",
            Strategy::BlockIfNecessary => "block_if_necessary",
            Strategy::CenterIfAvailable => "center_if_available",
            Strategy::Minimax => "minimax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick a free cell uniformly at random
///
/// Returns `None` only when the board is full.
pub fn random_guess<G, R>(board: &G, rng: &mut R) -> Option<usize>
where
    G: Grid + ?Sized,
    R: Rng + ?Sized,
{
    board.available().choose(rng).copied()
}

/// The first free cell (ascending) where `mark` wins immediately
pub fn win_if_possible(
    game: &mut dyn TryMoves,
    mark: &Mark,
) -> Result<Option<usize>, GameError> {
    for cell in game.board().available() {
        if probe(game, cell, mark)?.winner() == Some(mark) {
            return Ok(Some(cell));
        }
    }
    Ok(None)
}

/// The first free cell (ascending) where the opponent's mark would end the
/// game, so the caller can take it first
pub fn block_if_necessary(game: &mut dyn TryMoves) -> Result<Option<usize>, GameError> {
    let opponent = game.opponent();
    let mark = opponent.mark();

    for cell in game.board().available() {
        if probe(game, cell, mark)?.is_over() {
            return Ok(Some(cell));
        }
    }
    Ok(None)
}

/// The center index (`size / 2`) when that cell is free
///
/// Only the true center on odd dimensions.
pub fn center_if_available<G: Grid + ?Sized>(board: &G) -> Option<usize> {
    let center = board.center();
    (board.exists(center) && board.get(center).is_none()).then_some(center)
}

/// Speculatively play `mark` at `cell`, read the outcome, then drop the overlay
fn probe(game: &mut dyn TryMoves, cell: usize, mark: &Mark) -> Result<Outcome, GameError> {
    let result = game.attempt(cell, mark).map(|()| game.game_over());
    game.undo(None);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::human::HumanPlayer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::rc::Rc;
    use tictactoe_core::Board;

    fn mark(symbol: &str) -> Mark {
        Mark::new(symbol).unwrap()
    }

    fn board_from(symbols: &[Option<&str>]) -> Board {
        Board::from_cells(symbols.iter().map(|s| s.map(mark)).collect()).unwrap()
    }

    /// X to move against O on the given board
    fn game_on(symbols: &[Option<&str>]) -> Game {
        Game::with_board(
            board_from(symbols),
            Rc::new(HumanPlayer::new(mark("X"))),
            Rc::new(HumanPlayer::new(mark("O"))),
        )
        .unwrap()
    }

    #[test]
    fn test_win_if_possible_finds_bottom_row() {
        let mut game = game_on(&[
            Some("O"), Some("X"), Some("O"),
            Some("O"), None, None,
            Some("X"), None, Some("X"),
        ]);

        assert_eq!(win_if_possible(&mut game, &mark("X")).unwrap(), Some(7));
        assert!(!game.is_speculating());
    }

    #[test]
    fn test_win_if_possible_without_win() {
        let mut game = game_on(&[
            Some("X"), None, None,
            None, Some("O"), None,
            None, None, None,
        ]);

        assert_eq!(win_if_possible(&mut game, &mark("X")).unwrap(), None);
        assert!(!game.is_speculating());
        assert_eq!(game.official_board().available().len(), 7);
    }

    #[test]
    fn test_win_if_possible_ignores_opponent_wins() {
        // O could win at 8, X cannot win anywhere
        let mut game = game_on(&[
            Some("O"), Some("X"), None,
            Some("X"), Some("O"), None,
            None, None, None,
        ]);
        assert_eq!(win_if_possible(&mut game, &mark("X")).unwrap(), None);
    }

    #[test]
    fn test_block_if_necessary_finds_diagonal_threat() {
        let mut game = game_on(&[
            Some("O"), None, None,
            Some("X"), Some("O"), None,
            None, None, None,
        ]);

        assert_eq!(block_if_necessary(&mut game).unwrap(), Some(8));
        assert!(!game.is_speculating());
    }

    #[test]
    fn test_block_if_necessary_without_threat() {
        let mut game = game_on(&[
            Some("O"), None, None,
            None, Some("X"), None,
            None, None, None,
        ]);
        assert_eq!(block_if_necessary(&mut game).unwrap(), None);
    }

    #[test]
    fn test_block_if_necessary_covers_last_cell_tie() {
        // O filling the last cell ends the game in a tie
        let mut game = game_on(&[
            Some("X"), Some("O"), Some("X"),
            Some("X"), Some("O"), Some("O"),
            Some("O"), Some("X"), None,
        ]);
        assert_eq!(block_if_necessary(&mut game).unwrap(), Some(8));
    }

    #[test]
    fn test_center_if_available() {
        let empty = Board::new(3).unwrap();
        assert_eq!(center_if_available(&empty), Some(4));

        let taken = board_from(&[
            None, None, None,
            None, Some("O"), None,
            None, None, None,
        ]);
        assert_eq!(center_if_available(&taken), None);

        // Even dimensions fall back to size / 2
        assert_eq!(center_if_available(&Board::new(4).unwrap()), Some(8));
    }

    #[test]
    fn test_random_guess_picks_free_cells() {
        let board = board_from(&[
            Some("X"), Some("O"), Some("X"),
            None, Some("O"), None,
            Some("O"), Some("X"), Some("X"),
        ]);
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for _ in 0..50 {
            let cell = random_guess(&board, &mut rng).unwrap();
            assert!(cell == 3 || cell == 5);
        }
    }

    #[test]
    fn test_random_guess_on_full_board() {
        let board = board_from(&[Some("X"); 9]);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        assert_eq!(random_guess(&board, &mut rng), None);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::WinIfPossible.to_string(), "win_if_possible");
        assert_eq!(Strategy::Minimax.name(), "minimax");
    }
}
