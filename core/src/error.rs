use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Illegal action: {0}")]
    IllegalAction(IllegalAction),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board needs at least one row and one column")]
    EmptyBoard,
    #[error("{requested} mines requested but only {available} cells can hold one")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("mine density must be a fraction below one")]
    InvalidDensity,
    #[error("mine listed twice at {0:?}")]
    DuplicateMine(Coord2),
    #[error("expected {expected} mines but {placed} were placed")]
    MineCountMismatch {
        expected: CellCount,
        placed: CellCount,
    },
    #[error("board dimensions {rows}x{cols} are not supported")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("flag budget has {remaining} flags left out of {total}")]
    InvalidFlagBudget {
        remaining: CellCount,
        total: CellCount,
    },
    #[error("configuration could not be parsed")]
    Malformed,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("flagged tiles cannot be revealed")]
    RevealFlagged,
    #[error("revealed tiles cannot be flagged")]
    FlagRevealed,
    #[error("only revealed tiles can be chorded")]
    ChordHidden,
    #[error("tiles without adjacent mines cannot be chorded")]
    ChordZero,
    #[error("no flags left")]
    NoFlagsLeft,
    #[error("tile belongs to different coordinates")]
    CoordsMismatch,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

impl From<IllegalAction> for GameError {
    fn from(action: IllegalAction) -> Self {
        Self::IllegalAction(action)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
