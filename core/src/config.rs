use serde::{Deserialize, Serialize};

use crate::*;

/// Rule switches that differ between minesweeper variants.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub first_click: FirstClick,
    pub win: WinRule,
}

/// How many mines a board gets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinesSpec {
    /// Exactly this many mines.
    Count(CellCount),
    /// `numerator / denominator` of all cells, rounded down.
    Density {
        numerator: CellCount,
        denominator: CellCount,
    },
}

impl MinesSpec {
    pub fn resolve(self, total_cells: CellCount) -> Result<CellCount> {
        match self {
            Self::Count(mines) => Ok(mines),
            Self::Density {
                numerator,
                denominator,
            } => {
                if denominator == 0 || numerator >= denominator {
                    return Err(ConfigIssue::InvalidDensity.into());
                }
                let mines = u32::from(total_cells) * u32::from(numerator) / u32::from(denominator);
                // strictly below `total_cells`
                Ok(mines as CellCount)
            }
        }
    }
}

/// Serialized form of a [`GameConfig`], validated on conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpec {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: MinesSpec,
    #[serde(default)]
    pub rules: Rules,
}

/// Validated dimensions, mine count, and rules of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSpec", into = "GameSpec")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
    rules: Rules,
}

impl GameConfig {
    /// Fails unless the board has at least one cell free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }

        let available = mult(rows, cols) - 1;
        if mines > available {
            return Err(ConfigIssue::TooManyMines {
                requested: mines,
                available,
            }
            .into());
        }

        Ok(Self {
            size,
            mines,
            rules: Rules::default(),
        })
    }

    pub fn from_spec(spec: GameSpec) -> Result<Self> {
        let size = (spec.rows, spec.cols);
        let mines = spec.mines.resolve(mult(spec.rows, spec.cols))?;
        Ok(Self::new(size, mines)?.with_rules(spec.rules))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: GameSpec = serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not parse game config: {err}");
            GameError::InvalidConfiguration(ConfigIssue::Malformed)
        })?;
        Self::from_spec(spec)
    }

    pub const fn with_rules(self, rules: Rules) -> Self {
        Self { rules, ..self }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn rules(&self) -> Rules {
        self.rules
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl TryFrom<GameSpec> for GameConfig {
    type Error = GameError;

    fn try_from(spec: GameSpec) -> Result<Self> {
        Self::from_spec(spec)
    }
}

impl From<GameConfig> for GameSpec {
    fn from(config: GameConfig) -> Self {
        Self {
            rows: config.size.0,
            cols: config.size.1,
            mines: MinesSpec::Count(config.mines),
            rules: config.rules,
        }
    }
}

/// Classic presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub const fn size_and_mines(self) -> (Coord2, CellCount) {
        match self {
            Self::Beginner => ((9, 9), 10),
            Self::Intermediate => ((16, 16), 40),
            Self::Expert => ((16, 30), 99),
        }
    }

    pub fn config(self) -> GameConfig {
        let (size, mines) = self.size_and_mines();
        GameConfig {
            size,
            mines,
            rules: Rules::default(),
        }
    }
}
