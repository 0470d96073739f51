use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Unknown adjacency rule {0:?}")]
    UnknownAdjacencyRule(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("too many mines ({mines}) for board size {width}x{height}")]
    TooManyMines {
        width: usize,
        height: usize,
        mines: usize,
    },
    #[error("board size {width}x{height} is too large")]
    BoardTooLarge { width: usize, height: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Expected two whitespace-separated integers, got {0:?}")]
    Malformed(String),
    #[error("Coordinates in {0:?} must not be negative")]
    NegativeCoordinate(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
