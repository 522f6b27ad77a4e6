use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One cell of the board.
///
/// `mines_around` is only meaningful once `was_revealed` is set. A tile is never flagged and
/// revealed at the same time during play; the only exception is a wrong flag disclosed after a
/// loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub coords: Coord2,
    pub has_mine: bool,
    pub was_revealed: bool,
    pub is_flagged: bool,
    pub mines_around: u8,
}

impl Tile {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            has_mine: false,
            was_revealed: false,
            is_flagged: false,
            mines_around: 0,
        }
    }

    pub const fn is_hidden(&self) -> bool {
        !self.was_revealed
    }

    /// Hidden and not protected by a flag.
    pub const fn is_open_to_reveal(&self) -> bool {
        !self.was_revealed && !self.is_flagged
    }

    pub const fn view(&self) -> CellView {
        match (self.was_revealed, self.is_flagged, self.has_mine) {
            (false, false, _) => CellView::Hidden,
            (false, true, _) => CellView::Flagged,
            (true, _, true) => CellView::Mine,
            (true, true, false) => CellView::WrongFlag,
            (true, false, false) => CellView::Revealed(self.mines_around),
        }
    }
}

/// Player-visible state of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine disclosed after the game was lost.
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
    /// Flag placed on a safe tile, disclosed after the game was lost.
    WrongFlag,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_follows_tile_flags() {
        let mut tile = Tile::new((0, 0));
        assert_eq!(tile.view(), CellView::Hidden);

        tile.is_flagged = true;
        assert_eq!(tile.view(), CellView::Flagged);
        assert!(!tile.is_open_to_reveal());

        tile.was_revealed = true;
        assert_eq!(tile.view(), CellView::WrongFlag);

        tile.is_flagged = false;
        tile.mines_around = 3;
        assert_eq!(tile.view(), CellView::Revealed(3));

        tile.has_mine = true;
        assert_eq!(tile.view(), CellView::Mine);
    }
}
