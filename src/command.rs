use crate::{ParseCommandError, Position};
use std::str::FromStr;

/// Token that ends the session.
pub const ABORT_TOKEN: &str = "a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open(Position),
    Flag(Position),
    Chord(Position),
    Abort,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses `"i j"`, `"f i j"` (or `"fi j"`), `"c i j"` or the abort token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(ParseCommandError::Empty);
        }
        if line == ABORT_TOKEN {
            return Ok(Command::Abort);
        }

        let (marker, rest) = match line.chars().next() {
            Some(marker @ ('f' | 'c')) => (Some(marker), &line[1..]),
            _ => (None, line),
        };

        let malformed = || ParseCommandError::Malformed(line.to_string());
        let mut parts = rest.split_whitespace();
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let (row, col): (isize, isize) = (
            row.parse().map_err(|_| malformed())?,
            col.parse().map_err(|_| malformed())?,
        );
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return Err(ParseCommandError::NegativeCoordinate(line.to_string()));
        };
        let pos = Position::new(row, col);

        Ok(match marker {
            Some('f') => Command::Flag(pos),
            Some('c') => Command::Chord(pos),
            _ => Command::Open(pos),
        })
    }
}
