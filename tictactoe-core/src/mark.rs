//! Player marks

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// The token a player's moves place on the board
///
/// Any non-blank string is a valid mark. Falsy-looking symbols such as `"0"`
/// are ordinary marks and win lines like any other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mark(String);

impl Mark {
    /// Create a mark, rejecting empty or whitespace-only symbols
    pub fn new(symbol: impl Into<String>) -> Result<Self, GameError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(GameError::InvalidMark(format!(
                "{:?} is blank",
                symbol
            )));
        }
        Ok(Self(symbol))
    }

    /// The symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mark {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::new(s)
    }
}

impl TryFrom<String> for Mark {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mark::new(value)
    }
}

impl From<Mark> for String {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_marks() {
        assert_eq!(Mark::new("X").unwrap().as_str(), "X");
        assert_eq!("0".parse::<Mark>().unwrap().to_string(), "0");
    }

    #[test]
    fn test_blank_marks_rejected() {
        assert!(matches!(Mark::new(""), Err(GameError::InvalidMark(_))));
        assert!(matches!(Mark::new("  "), Err(GameError::InvalidMark(_))));
    }
}
