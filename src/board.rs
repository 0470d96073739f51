use crate::{AdjacencyRule, BoardConfig, Cell, GameError, Position, Result};
use log::{debug, info, trace};
use ndarray::Array2;
use rand::{seq::index, Rng};
use std::{collections::VecDeque, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Number of cells that went from closed to opened.
    Revealed(usize),
    HitMine(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    width: usize,
    height: usize,
    mine_count: usize,
    rule: AdjacencyRule,
    offsets: &'static [(isize, isize)],
    reveal_mines: bool,
    playing: bool,
}

impl Board {
    /// Builds a board with mines placed by the thread-local RNG.
    pub fn new(config: &BoardConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds a board, choosing `config.mines` distinct cells uniformly from the row-major grid.
    pub fn with_rng<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self> {
        let mut board = Self::empty(config)?;
        let total = board.width * board.height;
        for idx in index::sample(rng, total, config.mines).into_iter() {
            let pos = Position::new(idx / board.width, idx % board.width);
            board.cells[pos.to_nd_index()].set_mine();
        }
        board.mine_count = config.mines;
        debug!(
            "created {}x{} board with {} mines ({} adjacency)",
            board.width, board.height, board.mine_count, board.rule
        );
        Ok(board)
    }

    /// Builds a board with mines at exactly the given positions. `config.mines` is ignored;
    /// the mine count is the number of distinct positions.
    pub fn from_mine_positions(config: &BoardConfig, mines: &[Position]) -> Result<Self> {
        let mut board = Self::empty(&BoardConfig { mines: 0, ..*config })?;
        for &pos in mines {
            board.check_bounds(pos)?;
            board.cells[pos.to_nd_index()].set_mine();
        }
        board.mine_count = board.cells.iter().filter(|cell| cell.is_mine()).count();
        debug!(
            "created {}x{} board from fixed layout with {} mines",
            board.width, board.height, board.mine_count
        );
        Ok(board)
    }

    fn empty(config: &BoardConfig) -> Result<Self> {
        config.validate()?;
        let cells = Array2::from_shape_fn((config.height, config.width), |(row, col)| {
            Cell::new(Position::new(row, col))
        });
        Ok(Self {
            cells,
            width: config.width,
            height: config.height,
            mine_count: 0,
            rule: config.rule,
            offsets: config.rule.offsets(),
            reveal_mines: config.reveal_mines,
            playing: true,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn rule(&self) -> AdjacencyRule {
        self.rule
    }

    pub fn reveals_mines(&self) -> bool {
        self.reveal_mines
    }

    pub fn set_reveal_mines(&mut self, reveal_mines: bool) {
        self.reveal_mines = reveal_mines;
    }

    /// False from the moment a mine is opened.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True when every cell is either a mine or opened.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.is_opened())
    }

    pub fn state(&self) -> GameState {
        if !self.playing {
            GameState::Lost
        } else if self.is_solved() {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    pub fn is_over(&self) -> bool {
        self.state() != GameState::Playing
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        self.check_bounds(pos)?;
        Ok(&self.cells[pos.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn flag_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_flagged()).count()
    }

    pub fn neighbors(&self, pos: Position) -> Result<Vec<Position>> {
        self.check_bounds(pos)?;
        Ok(self.neighbors_of(pos).collect())
    }

    pub fn count_mines(&self, pos: Position) -> Result<u8> {
        self.check_bounds(pos)?;
        Ok(self.count_mines_at(pos))
    }

    pub fn count_flags(&self, pos: Position) -> Result<u8> {
        self.check_bounds(pos)?;
        Ok(self.count_flags_at(pos))
    }

    /// Opens a cell. Opening an already-opened cell is treated as a chord.
    pub fn open(&mut self, pos: Position) -> Result<RevealOutcome> {
        self.check_bounds(pos)?;
        if self.is_over() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = if self.cells[pos.to_nd_index()].is_opened() {
            self.chord_unchecked(pos)
        } else {
            self.reveal(pos)
        };
        self.log_if_solved();
        Ok(outcome)
    }

    /// Opens every closed, unflagged neighbor of an opened cell whose flag count matches
    /// its mine count. Anything else is a no-op.
    pub fn chord(&mut self, pos: Position) -> Result<RevealOutcome> {
        self.check_bounds(pos)?;
        if self.is_over() || !self.cells[pos.to_nd_index()].is_opened() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.chord_unchecked(pos);
        self.log_if_solved();
        Ok(outcome)
    }

    /// Flips the flag on a closed cell. Opened cells cannot be flagged.
    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        self.check_bounds(pos)?;
        if self.is_over() {
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.cells[pos.to_nd_index()];
        if cell.is_opened() {
            return Ok(FlagOutcome::NoChange);
        }
        cell.toggle_flag();
        Ok(if cell.is_flagged() {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    pub fn display_char(&self, pos: Position) -> Result<char> {
        Ok(self.cell_char(self.cell(pos)?))
    }

    fn cell_char(&self, cell: &Cell) -> char {
        if cell.is_opened() {
            char::from(b'0' + self.count_mines_at(cell.position()))
        } else if cell.is_flagged() {
            '!'
        } else if cell.is_mine() && self.reveal_mines {
            ','
        } else {
            '.'
        }
    }

    fn chord_unchecked(&mut self, pos: Position) -> RevealOutcome {
        if self.count_mines_at(pos) != self.count_flags_at(pos) {
            return RevealOutcome::NoChange;
        }

        let targets: Vec<Position> = self
            .neighbors_of(pos)
            .filter(|&target| {
                let cell = &self.cells[target.to_nd_index()];
                !cell.is_opened() && !cell.is_flagged()
            })
            .collect();

        let mut opened = 0;
        for target in targets {
            match self.reveal(target) {
                RevealOutcome::HitMine(mine) => return RevealOutcome::HitMine(mine),
                RevealOutcome::Revealed(count) => opened += count,
                RevealOutcome::NoChange => {}
            }
        }

        if opened == 0 {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed(opened)
        }
    }

    // Opens a closed cell and cascades through zero-count cells with a work queue.
    // The cascade never chords through cells that are already open.
    fn reveal(&mut self, start: Position) -> RevealOutcome {
        let cell = &self.cells[start.to_nd_index()];
        if cell.is_opened() {
            return RevealOutcome::NoChange;
        }
        if cell.is_mine() {
            self.playing = false;
            info!("mine detonated at {start}");
            return RevealOutcome::HitMine(start);
        }

        let mut opened = 0;
        let mut pending = VecDeque::from([start]);
        while let Some(pos) = pending.pop_front() {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.is_opened() {
                continue;
            }
            cell.open();
            opened += 1;

            if self.count_mines_at(pos) == 0 {
                let cells = &self.cells;
                pending.extend(
                    self.neighbors_of(pos)
                        .filter(|next| !cells[next.to_nd_index()].is_opened()),
                );
            }
        }

        trace!("opening {start} revealed {opened} cells");
        RevealOutcome::Revealed(opened)
    }

    fn log_if_solved(&self) {
        if self.playing && self.is_solved() {
            info!("board solved");
        }
    }

    fn neighbors_of(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.offsets
            .iter()
            .filter_map(move |&offset| pos.offset(offset))
            .filter(move |&next| self.contains(next))
    }

    fn count_mines_at(&self, pos: Position) -> u8 {
        self.neighbors_of(pos)
            .filter(|next| self.cells[next.to_nd_index()].is_mine())
            .count() as u8
    }

    fn count_flags_at(&self, pos: Position) -> u8 {
        self.neighbors_of(pos)
            .filter(|next| self.cells[next.to_nd_index()].is_flagged())
            .count() as u8
    }

    fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row.iter() {
                write!(f, "{} ", self.cell_char(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
