//! Game outcome as seen by the rules engine

use std::fmt;

use crate::mark::Mark;

/// State of a game after scanning the active board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Some line is filled with a single mark
    Winner(Mark),
    /// The board is full and nobody completed a line
    Tie,
    /// Moves remain and nobody has won
    Ongoing,
}

impl Outcome {
    /// Whether the game has ended, by win or tie
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning mark, if any
    pub fn winner(&self) -> Option<&Mark> {
        match self {
            Outcome::Winner(mark) => Some(mark),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} wins", mark),
            Outcome::Tie => f.write_str("tie"),
            Outcome::Ongoing => f.write_str("in progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_helpers() {
        let zero = Mark::new("0").unwrap();
        let won = Outcome::Winner(zero.clone());

        assert!(won.is_over());
        assert_eq!(won.winner(), Some(&zero));
        assert!(Outcome::Tie.is_over());
        assert!(!Outcome::Ongoing.is_over());
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(won.to_string(), "0 wins");
    }
}
