use crate::GameError;
use std::{fmt, str::FromStr};

type Offset = (isize, isize);

const ORTHOGONAL: [Offset; 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const DIAGONAL: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
#[rustfmt::skip]
const STANDARD: [Offset; 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];
const KNIGHT: [Offset; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Which cells count as neighbors of a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdjacencyRule {
    /// All eight surrounding cells.
    #[default]
    Standard,
    Orthogonal,
    Diagonal,
    /// The eight squares a chess knight can jump to.
    Knight,
}

impl AdjacencyRule {
    /// All rules in setup-menu order.
    pub const ALL: [AdjacencyRule; 4] = [
        AdjacencyRule::Standard,
        AdjacencyRule::Orthogonal,
        AdjacencyRule::Diagonal,
        AdjacencyRule::Knight,
    ];

    pub fn offsets(self) -> &'static [Offset] {
        match self {
            AdjacencyRule::Standard => &STANDARD,
            AdjacencyRule::Orthogonal => &ORTHOGONAL,
            AdjacencyRule::Diagonal => &DIAGONAL,
            AdjacencyRule::Knight => &KNIGHT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AdjacencyRule::Standard => "standard",
            AdjacencyRule::Orthogonal => "orthogonal",
            AdjacencyRule::Diagonal => "diagonal",
            AdjacencyRule::Knight => "knight",
        }
    }

    /// Maps a 1-based menu choice onto a rule.
    pub fn from_menu_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }
}

impl FromStr for AdjacencyRule {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(AdjacencyRule::Standard),
            "orthogonal" | "ortho" => Ok(AdjacencyRule::Orthogonal),
            "diagonal" | "diag" => Ok(AdjacencyRule::Diagonal),
            "knight" => Ok(AdjacencyRule::Knight),
            _ => Err(GameError::UnknownAdjacencyRule(s.to_string())),
        }
    }
}

impl fmt::Display for AdjacencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
