use crate::Position;

/// State of a single grid square. Mutated only by the owning board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    mine: bool,
    opened: bool,
    flagged: bool,
    position: Position,
}

impl Cell {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            mine: false,
            opened: false,
            flagged: false,
            position,
        }
    }

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn open(&mut self) {
        self.opened = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }

    // Only called while the board is being laid out.
    pub(crate) fn set_mine(&mut self) {
        self.mine = true;
    }
}
