pub mod adjacency;
pub mod board;
pub mod cell;
pub mod command;
pub mod config;
pub mod error;
pub mod position;
pub mod session;

pub use adjacency::AdjacencyRule;
pub use board::{Board, FlagOutcome, GameState, RevealOutcome};
pub use cell::Cell;
pub use command::{Command, ABORT_TOKEN};
pub use config::BoardConfig;
pub use error::{ConfigError, GameError, ParseCommandError, Result};
pub use position::Position;
pub use session::Session;
