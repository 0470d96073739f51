use crate::{AdjacencyRule, Cell, ConfigError};
use std::mem;

/// Parameters for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    pub rule: AdjacencyRule,
    /// Render unopened mines as `,` (debug aid).
    pub reveal_mines: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            mines: 10,
            rule: AdjacencyRule::Standard,
            reveal_mines: false,
        }
    }
}

impl BoardConfig {
    pub fn new(width: usize, height: usize, mines: usize, rule: AdjacencyRule) -> Self {
        Self {
            width,
            height,
            mines,
            rule,
            reveal_mines: false,
        }
    }

    pub fn with_reveal_mines(mut self, reveal_mines: bool) -> Self {
        self.reveal_mines = reveal_mines;
        self
    }

    /// Checks dimensions and mine count, returning the total number of cells.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        // The grid must fit in a single allocation.
        let total = width
            .checked_mul(height)
            .filter(|&total| {
                total
                    .checked_mul(mem::size_of::<Cell>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(ConfigError::BoardTooLarge { width, height })?;
        if self.mines > total {
            return Err(ConfigError::TooManyMines {
                width,
                height,
                mines: self.mines,
            });
        }
        Ok(total)
    }
}
