//! Win and tie detection

use tictactoe_core::{Grid, Mark, Outcome};

/// Scan every line of `board` for a winner, then check for a tie
///
/// Lines are checked in the order rows `0..n`, columns `0..n`, main diagonal,
/// anti-diagonal, and the first complete line decides the winner.
pub fn outcome<G: Grid + ?Sized>(board: &G) -> Outcome {
    let dimension = board.dimension();

    let rows = (0..dimension).filter_map(|row| board.row(row).ok());
    let columns = (0..dimension).filter_map(|column| board.column(column).ok());
    let diagonals = [true, false].into_iter().map(|left| {
        board
            .diagonal(left)
            .into_iter()
            .map(|(_, cell)| cell)
            .collect::<Vec<_>>()
    });

    for line in rows.chain(columns).chain(diagonals) {
        if let Some(mark) = uniform_mark(&line) {
            return Outcome::Winner(mark.clone());
        }
    }

    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    }
}

/// The mark filling every cell of `line`, if there is one
fn uniform_mark<'a>(line: &[Option<&'a Mark>]) -> Option<&'a Mark> {
    let first = (*line.first()?)?;
    line.iter().all(|cell| *cell == Some(first)).then_some(first)
}
