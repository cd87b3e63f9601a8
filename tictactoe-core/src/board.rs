//! Square boards of optional marks
//!
//! This module provides the board data structure and its read-only snapshot:
//! - `Grid`: read derivations shared by every board-shaped type
//! - `Board`: the mutable grid with write-once-until-cleared cells
//! - `ReadOnlyBoard`: a frozen copy handed to players
//!
//! Boards carry no rule knowledge. Lines are exposed here, but deciding what a
//! line means is left to the rules engine.

use tracing::{debug, warn};

use crate::error::GameError;
use crate::mark::Mark;

/// Read access to a square grid of cells stored in row-major order
///
/// Implementors only supply `dimension` and `cells`; every derived view is
/// computed from those two.
pub trait Grid {
    /// Side length of the board
    fn dimension(&self) -> usize;

    /// All cells in row-major order, always `dimension²` long
    fn cells(&self) -> &[Option<Mark>];

    /// Number of cells
    fn size(&self) -> usize {
        self.cells().len()
    }

    /// Whether `index` addresses a cell of this board
    fn exists(&self, index: usize) -> bool {
        index < self.size()
    }

    /// The mark at `index`, or `None` when the cell is empty
    ///
    /// Reading outside the board is reported as a warning and yields `None`.
    /// Callers that need strict bounds use `exists` first.
    fn get(&self, index: usize) -> Option<&Mark> {
        match self.cells().get(index) {
            Some(cell) => cell.as_ref(),
            None => {
                warn!(index, size = self.size(), "Read outside the board");
                None
            }
        }
    }

    /// Owned copy of every cell, index by index
    fn to_sequence(&self) -> Vec<Option<Mark>> {
        self.cells().to_vec()
    }

    /// Indices of the empty cells in ascending order
    fn available(&self) -> Vec<usize> {
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether no empty cell remains
    fn is_full(&self) -> bool {
        self.cells().iter().all(Option::is_some)
    }

    /// The cells of row `row`, left to right
    fn row(&self, row: usize) -> Result<Vec<Option<&Mark>>, GameError> {
        let dimension = self.dimension();
        if row >= dimension {
            return Err(GameError::OutOfRange(format!(
                "row {} is outside 0..{}",
                row, dimension
            )));
        }
        let start = row * dimension;
        Ok(self.cells()[start..start + dimension]
            .iter()
            .map(Option::as_ref)
            .collect())
    }

    /// The cells of column `column`, top to bottom
    fn column(&self, column: usize) -> Result<Vec<Option<&Mark>>, GameError> {
        let dimension = self.dimension();
        if column >= dimension {
            return Err(GameError::OutOfRange(format!(
                "column {} is outside 0..{}",
                column, dimension
            )));
        }
        Ok((0..dimension)
            .map(|row| self.cells()[row * dimension + column].as_ref())
            .collect())
    }

    /// The main diagonal (`left = true`) or the anti-diagonal, as
    /// `(index, cell)` pairs ordered from the top row down
    fn diagonal(&self, left: bool) -> Vec<(usize, Option<&Mark>)> {
        let dimension = self.dimension();
        (0..dimension)
            .map(|row| {
                let column = if left { row } else { dimension - 1 - row };
                row * dimension + column
            })
            .map(|index| (index, self.cells()[index].as_ref()))
            .collect()
    }

    /// The four corner indices, always in the order
    /// top-left, top-right, bottom-left, bottom-right
    fn corners(&self) -> [usize; 4] {
        let dimension = self.dimension();
        let size = self.size();
        [0, dimension - 1, size - dimension, size - 1]
    }

    /// `floor(size / 2)`: the true center only when the dimension is odd
    fn center(&self) -> usize {
        self.size() / 2
    }
}

/// A square board of optional marks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dimension: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Create an empty board with `dimension²` cells
    pub fn new(dimension: usize) -> Result<Self, GameError> {
        if dimension < 1 {
            return Err(GameError::OutOfRange(format!(
                "board dimension must be at least 1, got {}",
                dimension
            )));
        }
        let size = dimension.checked_mul(dimension).ok_or_else(|| {
            GameError::OutOfRange(format!("board dimension {} is too large", dimension))
        })?;

        Ok(Self {
            dimension,
            cells: vec![None; size],
        })
    }

    /// Build a board from row-major cells
    ///
    /// The number of cells must be a perfect square of at least one, and the
    /// cells are copied as given (no turn-order validation).
    pub fn from_cells(cells: Vec<Option<Mark>>) -> Result<Self, GameError> {
        let dimension = (1..=cells.len())
            .find(|d| d * d >= cells.len())
            .unwrap_or(0);
        if dimension == 0 || dimension * dimension != cells.len() {
            return Err(GameError::OutOfRange(format!(
                "{} cells do not form a square board",
                cells.len()
            )));
        }
        Ok(Self { dimension, cells })
    }

    /// Place `mark` at `index`
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the index is not on the board, `StateConflict` when
    /// the cell already holds a mark. Neither case modifies the board.
    pub fn set(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        let size = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| GameError::index_out_of_range(index, size))?;

        if let Some(existing) = cell {
            return Err(GameError::StateConflict {
                index,
                mark: existing.clone(),
            });
        }

        *cell = Some(mark);
        Ok(())
    }

    /// Empty the cell at `index`
    ///
    /// Clearing an empty cell or an index outside the board does nothing.
    pub fn clear(&mut self, index: usize) {
        match self.cells.get_mut(index) {
            Some(cell) => *cell = None,
            None => debug!(index, "Ignoring clear outside the board"),
        }
    }
}

impl Grid for Board {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }
}

/// A frozen snapshot of a board
///
/// The snapshot owns its own copy of the cells, so later changes to the source
/// board are never visible through it. Every mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyBoard {
    board: Board,
}

impl ReadOnlyBoard {
    /// Snapshot the current contents of `board`
    pub fn new(board: &Board) -> Self {
        Self {
            board: board.clone(),
        }
    }

    /// Always fails with `CapabilityDenied`
    pub fn set(&self, index: usize, _mark: Mark) -> Result<(), GameError> {
        Err(GameError::CapabilityDenied(format!(
            "cannot set cell {} on a read-only board",
            index
        )))
    }

    /// Always fails with `CapabilityDenied`
    pub fn clear(&self, index: usize) -> Result<(), GameError> {
        Err(GameError::CapabilityDenied(format!(
            "cannot clear cell {} on a read-only board",
            index
        )))
    }

    /// An independent, mutable copy of the snapshot
    pub fn to_board(&self) -> Board {
        self.board.clone()
    }
}

impl From<&Board> for ReadOnlyBoard {
    fn from(board: &Board) -> Self {
        ReadOnlyBoard::new(board)
    }
}

impl Grid for ReadOnlyBoard {
    fn dimension(&self) -> usize {
        self.board.dimension
    }

    fn cells(&self) -> &[Option<Mark>] {
        &self.board.cells
    }
}
