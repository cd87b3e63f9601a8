//! Exhaustive game-tree search
//!
//! Negamax over the speculative overlay, with optional alpha-beta pruning.
//! Scores are from the perspective of the side to move: a win is worth
//! `WIN_SCORE` minus the number of plies it took, a tie is worth zero.
//! Children are searched in ascending cell order and the best move only
//! changes on a strictly better score, so pruning never changes the chosen
//! cell, only how many positions are visited.

use tictactoe_core::{GameError, Grid, Mark, Outcome, TryMoves};
use tracing::debug;

/// Score of an immediate win
pub const WIN_SCORE: i32 = 100;

const INFINITY: i32 = i32::MAX;

/// Result of a search from the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Value for the side to move
    pub score: i32,
    /// Best cell, `None` when the game is already over
    pub location: Option<usize>,
    /// Positions visited, root included
    pub nodes: u64,
}

/// Search the current position with `mark` to move
///
/// The overlay is discarded before returning, whether or not the search
/// succeeded.
pub fn evaluate(
    game: &mut dyn TryMoves,
    mark: &Mark,
    pruning: bool,
) -> Result<Evaluation, GameError> {
    let opponent = game.opponent();
    let mut open = game.board().available();
    let mut search = Search { pruning, nodes: 0 };

    let result = search.negamax(
        game,
        mark,
        opponent.mark(),
        &mut open,
        0,
        -INFINITY,
        INFINITY,
    );
    game.undo(None);

    let (score, location) = result?;
    debug!(
        mark = %mark,
        score,
        ?location,
        nodes = search.nodes,
        pruning,
        "Minimax search finished"
    );

    Ok(Evaluation {
        score,
        location,
        nodes: search.nodes,
    })
}

/// The cell minimax picks for `mark`, or `None` on a finished game
pub fn best_move(
    game: &mut dyn TryMoves,
    mark: &Mark,
    pruning: bool,
) -> Result<Option<usize>, GameError> {
    Ok(evaluate(game, mark, pruning)?.location)
}

struct Search {
    pruning: bool,
    nodes: u64,
}

impl Search {
    /// `open` holds the free cells of the active board in ascending order and
    /// is restored before returning
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        game: &mut dyn TryMoves,
        to_move: &Mark,
        waiting: &Mark,
        open: &mut Vec<usize>,
        depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<(i32, Option<usize>), GameError> {
        self.nodes += 1;

        match game.game_over() {
            // Only the side that just moved can have completed a line
            Outcome::Winner(_) => return Ok((depth - WIN_SCORE, None)),
            Outcome::Tie => return Ok((0, None)),
            Outcome::Ongoing => {}
        }

        let mut best = (-INFINITY, None);

        for slot in 0..open.len() {
            let cell = open.remove(slot);
            let child = game.attempt(cell, to_move).and_then(|()| {
                self.negamax(game, waiting, to_move, open, depth + 1, -beta, -alpha)
            });
            game.undo(Some(cell));
            open.insert(slot, cell);

            let score = -child?.0;
            if score > best.0 {
                best = (score, Some(cell));
            }

            if self.pruning {
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
        }

        Ok(best)
    }
}
