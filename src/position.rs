use std::fmt;

/// A cell coordinate, `row` counted down from the top and `col` right from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Applies a relative offset, returning `None` if either coordinate would go negative.
    pub fn offset(self, (d_row, d_col): (isize, isize)) -> Option<Position> {
        Some(Position::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        ))
    }

    pub(crate) fn to_nd_index(self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
