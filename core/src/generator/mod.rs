use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places the mines of one game on a blank board, exactly once, when the first tile is revealed.
///
/// The returned placement must list exactly the mines armed on the board, `config.mines()` of them;
/// [`MinePlacement::from_coords`] builds and arms both in one step.
pub trait MinePlacer {
    fn place(
        &mut self,
        board: &mut Board,
        config: &GameConfig,
        first_move: Coord2,
    ) -> Result<MinePlacement>;

    /// Rejects configs this placer can never satisfy, before any game is played with them.
    fn check(&self, _config: &GameConfig) -> Result<()> {
        Ok(())
    }
}

/// How much of the first revealed area is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstClick {
    /// Mines may land anywhere, including the first revealed tile.
    Unprotected,
    /// The first revealed tile never holds a mine.
    #[default]
    Safe,
    /// The first revealed tile and its neighbors never hold a mine, so the first reveal opens an
    /// area.
    Opening,
}

/// Coordinates of every mine on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinePlacement {
    mines: HashSet<Coord2>,
}

impl MinePlacement {
    /// Collects `mines` and arms them on `board`.
    ///
    /// Fails on coordinates outside the board and on duplicates, leaving the board untouched.
    pub fn from_coords(board: &mut Board, mines: impl IntoIterator<Item = Coord2>) -> Result<Self> {
        let placement = Self::collect(board, mines)?;
        placement.arm(board);
        Ok(placement)
    }

    /// Validated set of `mines`, nothing armed yet.
    fn collect(board: &Board, mines: impl IntoIterator<Item = Coord2>) -> Result<Self> {
        let mut placement = Self::default();
        for coords in mines {
            let coords = board.validate_coords(coords)?;
            if !placement.insert(coords) {
                return Err(ConfigIssue::DuplicateMine(coords).into());
            }
        }
        Ok(placement)
    }

    /// Whether the board carries exactly these mines and no others.
    pub fn matches(&self, board: &Board) -> bool {
        board.mine_count() == self.len() && self.iter().all(|coords| board[coords].has_mine)
    }

    pub fn len(&self) -> CellCount {
        // bounded by the board size
        self.mines.len() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().copied()
    }

    /// Marks every coordinate of the placement as a mine on `board`.
    fn arm(&self, board: &mut Board) {
        for coords in self.iter() {
            board.tile_mut(coords).has_mine = true;
        }
    }

    fn insert(&mut self, coords: Coord2) -> bool {
        self.mines.insert(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_arms_the_board() {
        let mut board = Board::new((3, 3)).unwrap();

        let placement = MinePlacement::from_coords(&mut board, [(0, 0), (2, 1)]).unwrap();

        assert_eq!(placement.len(), 2);
        assert!(placement.matches(&board));
        assert!(board[(2, 1)].has_mine);
    }

    #[test]
    fn from_coords_rejects_bad_input_untouched() {
        let mut board = Board::new((3, 3)).unwrap();

        assert_eq!(
            MinePlacement::from_coords(&mut board, [(1, 1), (1, 1)]),
            Err(GameError::InvalidConfiguration(ConfigIssue::DuplicateMine((1, 1))))
        );
        assert_eq!(
            MinePlacement::from_coords(&mut board, [(1, 1), (3, 0)]),
            Err(GameError::OutOfBounds((3, 0)))
        );
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn placement_must_match_board() {
        let mut board = Board::new((2, 2)).unwrap();
        let mut tile = board.get((0, 0)).unwrap();
        tile.has_mine = true;
        board.set((0, 0), tile).unwrap();

        assert!(!MinePlacement::default().matches(&board));
        assert!(!MinePlacement::collect(&board, [(1, 1)]).unwrap().matches(&board));
        assert!(MinePlacement::collect(&board, [(0, 0)]).unwrap().matches(&board));
    }
}
