use serde::{Deserialize, Serialize};

use crate::*;

/// Result of one player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continue,
    Loss,
    Win,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Loss | Self::Win)
    }
}

/// What it takes to win.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Every safe tile revealed and every mine flagged.
    #[default]
    FlagAllMines,
    /// Every safe tile revealed, flags do not matter.
    RevealAllSafe,
}

impl Board {
    /// Whether the tile at `coords` is a mine, i.e. revealing it lost the game.
    pub fn check_loss(&self, coords: Coord2) -> Result<bool> {
        Ok(self.get(coords)?.has_mine)
    }

    pub fn check_win(&self, rule: WinRule) -> bool {
        self.tiles().all(|tile| match (tile.has_mine, rule) {
            (true, WinRule::FlagAllMines) => tile.is_flagged && !tile.was_revealed,
            (true, WinRule::RevealAllSafe) => !tile.was_revealed,
            (false, _) => tile.was_revealed,
        })
    }

    /// Final disclosure of a lost game: reveals every unflagged mine and every flag placed on a
    /// safe tile.
    ///
    /// Tiles already revealed are skipped, so running it again changes nothing. Returns how many
    /// tiles were disclosed.
    pub fn disclose_mines(&mut self, mines: &MinePlacement) -> CellCount {
        let mut disclosed = 0;

        for coords in mines.iter() {
            if self[coords].is_open_to_reveal() {
                self.expose(coords);
                disclosed += 1;
            }
        }

        for coords in self.coords() {
            let tile = self[coords];
            if tile.is_flagged && !tile.has_mine && !tile.was_revealed {
                self.expose(coords);
                disclosed += 1;
            }
        }

        log::debug!("Disclosed {disclosed} tiles after loss");
        disclosed
    }

    /// Flags every mine still hidden, used when a game is won without flagging.
    pub(crate) fn flag_remaining_mines(&mut self, mines: &MinePlacement) -> CellCount {
        let mut flagged = 0;
        for coords in mines.iter() {
            let tile = self.tile_mut(coords);
            if !tile.is_flagged {
                tile.is_flagged = true;
                flagged += 1;
            }
        }
        flagged
    }
}
