//! Terminal rendering and prompting
//!
//! Cells are shown to people with 1-based labels; everything else in the
//! program uses 0-based indices.

use std::io::{BufRead, Write};

use tictactoe_engine::{GameError, Grid, Mark};

/// Draw `board` as text, showing free cells by label
///
/// ```text
///  X | 2 | 3
/// ---+---+---
///  4 | O | 6
/// ---+---+---
///  7 | 8 | 9
/// ```
pub fn render<G: Grid + ?Sized>(board: &G) -> String {
    let labels: Vec<String> = (0..board.size())
        .map(|index| match board.get(index) {
            Some(mark) => mark.to_string(),
            None => (index + 1).to_string(),
        })
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);

    let rule = vec!["-".repeat(width + 2); board.dimension()].join("+");
    let rows: Vec<String> = labels
        .chunks(board.dimension().max(1))
        .map(|row| {
            row.iter()
                .map(|label| format!(" {:^width$} ", label, width = width))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    let mut text = rows.join(&format!("\n{}\n", rule));
    text.push('\n');
    text
}

/// Ask `mark`'s player for a free cell until one is given
///
/// Returns the 0-based index.
///
/// # Errors
///
/// `Input` when the input stream ends or cannot be read.
pub fn prompt_move<G, R, W>(
    board: &G,
    mark: &Mark,
    input: &mut R,
    output: &mut W,
) -> Result<usize, GameError>
where
    G: Grid + ?Sized,
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let size = board.size();

    loop {
        write!(output, "Player {}, choose a cell (1-{}): ", mark, size).map_err(io_error)?;
        output.flush().map_err(io_error)?;

        let line = read_line(input)?
            .ok_or_else(|| GameError::Input("input closed while waiting for a move".to_string()))?;
        let answer = line.trim();

        let label = match answer.parse::<usize>() {
            Ok(label) => label,
            Err(_) => {
                writeln!(output, "{:?} is not a cell number.", answer).map_err(io_error)?;
                continue;
            }
        };

        if label == 0 || label > size {
            writeln!(output, "Cell {} is not on the board.", label).map_err(io_error)?;
            continue;
        }

        let index = label - 1;
        if let Some(owner) = board.get(index) {
            writeln!(output, "Cell {} is already taken by {}.", label, owner).map_err(io_error)?;
            continue;
        }

        return Ok(index);
    }
}

/// Ask a yes/no question; a closed input counts as no
pub fn confirm<R, W>(question: &str, input: &mut R, output: &mut W) -> Result<bool, GameError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        write!(output, "{} [y/n] ", question).map_err(io_error)?;
        output.flush().map_err(io_error)?;

        let Some(line) = read_line(input)? else {
            return Ok(false);
        };

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.").map_err(io_error)?,
        }
    }
}

/// `None` at end of input
fn read_line<R: BufRead + ?Sized>(input: &mut R) -> Result<Option<String>, GameError> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_error)?;
    Ok((read > 0).then_some(line))
}

fn io_error(err: std::io::Error) -> GameError {
    GameError::Input(err.to_string())
}
