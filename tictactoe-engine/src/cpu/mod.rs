//! Computer players
//!
//! A `CpuPlayer` picks moves by running an ordered chain of strategies and
//! taking the first one that has an opinion. The chain comes from the
//! configured `Difficulty` unless one is injected with `with_strategies`.

pub mod minimax;
pub mod strategy;

use std::cell::RefCell;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tictactoe_core::{GameError, Mark, Player, TryMoves};
use tracing::{debug, trace};

pub use strategy::Strategy;

/// How hard the computer tries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Random moves only
    Easy = 1,
    /// Win, block, take the center, otherwise random
    #[default]
    Medium = 2,
    /// Exhaustive search
    Hard = 3,
}

impl Difficulty {
    /// Numeric level, 1 to 3
    pub fn level(self) -> u8 {
        self as u8
    }

    /// The strategy chain played at this level
    ///
    /// The hard chain has no random fallback so that a gap in the search
    /// surfaces as a `LogicError` instead of a silent random move.
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            Difficulty::Easy => vec![Strategy::RandomGuess],
            Difficulty::Medium => vec![
                Strategy::WinIfPossible,
                Strategy::BlockIfNecessary,
                Strategy::CenterIfAvailable,
                Strategy::RandomGuess,
            ],
            Difficulty::Hard => vec![Strategy::Minimax],
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(GameError::OutOfRange(format!(
                "difficulty must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.level()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// A computer-controlled player
pub struct CpuPlayer {
    mark: Mark,
    difficulty: Difficulty,
    chain: Option<Vec<Strategy>>,
    pruning: bool,
    rng: RefCell<ChaCha20Rng>,
}

impl CpuPlayer {
    /// Create a medium-difficulty player with an entropy-seeded RNG and
    /// alpha-beta pruning enabled
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            difficulty: Difficulty::default(),
            chain: None,
            pruning: true,
            rng: RefCell::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Reseed the RNG for reproducible random moves
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(ChaCha20Rng::seed_from_u64(seed));
        self
    }

    /// Play at `difficulty` unless a custom chain is set
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Toggle alpha-beta pruning in the minimax search
    ///
    /// Both settings choose the same moves; pruning only visits fewer nodes.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Use `chain` instead of the difficulty's strategy chain
    pub fn with_strategies(mut self, chain: Vec<Strategy>) -> Self {
        self.chain = Some(chain);
        self
    }

    /// The configured level, even when a custom chain overrides it
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Change difficulty by numeric level
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `level` is 1, 2 or 3.
    pub fn set_difficulty(&mut self, level: u8) -> Result<(), GameError> {
        self.difficulty = Difficulty::try_from(level)?;
        Ok(())
    }

    /// Whether minimax cuts branches with alpha-beta
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// The chain `best_move` will run, in order
    pub fn strategies(&self) -> Vec<Strategy> {
        match &self.chain {
            Some(chain) => chain.clone(),
            None => self.difficulty.strategies(),
        }
    }
}

impl Player for CpuPlayer {
    fn mark(&self) -> &Mark {
        &self.mark
    }

    fn best_move(&self, game: &mut dyn TryMoves) -> Result<usize, GameError> {
        let chain = self.strategies();

        for strategy in &chain {
            if let Some(location) = strategy.apply(self, game)? {
                debug!(mark = %self.mark, strategy = %strategy, location, "Strategy chose a move");
                return Ok(location);
            }
            trace!(mark = %self.mark, strategy = %strategy, "Strategy had no opinion");
        }

        Err(GameError::LogicError(format!(
            "no possible moves for {} after trying {:?}",
            self.mark, chain
        )))
    }
}

impl fmt::Debug for CpuPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuPlayer")
            .field("mark", &self.mark)
            .field("difficulty", &self.difficulty)
            .field("chain", &self.chain)
            .field("pruning", &self.pruning)
            .finish_non_exhaustive()
    }
}
