use serde::{Deserialize, Serialize};

use crate::*;

/// Flags the player may still place, starting at the mine count.
///
/// The budget is capped: it never goes negative and never grows past the mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BudgetSpec")]
pub struct FlagBudget {
    remaining: CellCount,
    total: CellCount,
}

#[derive(Deserialize)]
struct BudgetSpec {
    remaining: CellCount,
    total: CellCount,
}

impl TryFrom<BudgetSpec> for FlagBudget {
    type Error = GameError;

    fn try_from(BudgetSpec { remaining, total }: BudgetSpec) -> Result<Self> {
        if remaining > total {
            return Err(ConfigIssue::InvalidFlagBudget { remaining, total }.into());
        }
        Ok(Self { remaining, total })
    }
}

impl FlagBudget {
    pub const fn new(total: CellCount) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    pub const fn remaining(&self) -> CellCount {
        self.remaining
    }

    pub const fn placed(&self) -> CellCount {
        self.total.saturating_sub(self.remaining)
    }

    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    fn take(&mut self) -> Result<()> {
        if self.is_exhausted() {
            return Err(IllegalAction::NoFlagsLeft.into());
        }
        self.remaining -= 1;
        Ok(())
    }

    fn give_back(&mut self) {
        self.remaining = self.remaining.saturating_add(1).min(self.total);
    }

    /// Accounts for flags placed by the engine itself, such as the automatic flags of a won game.
    pub(crate) fn spend_all(&mut self) {
        self.remaining = 0;
    }
}

impl Board {
    /// Flips the flag on a hidden tile, charging or refunding `budget`. Returns whether the tile is
    /// now flagged.
    pub fn toggle_flag(&mut self, coords: Coord2, budget: &mut FlagBudget) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let tile = self[coords];

        if tile.was_revealed {
            return Err(IllegalAction::FlagRevealed.into());
        }

        if tile.is_flagged {
            budget.give_back();
        } else {
            budget.take()?;
        }

        let tile = self.tile_mut(coords);
        tile.is_flagged = !tile.is_flagged;
        Ok(tile.is_flagged)
    }
}
