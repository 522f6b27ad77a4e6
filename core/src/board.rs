use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Neighbors of a single cell, never more than eight.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Rows × cols grid of tiles, fixed in size for the lifetime of a game.
///
/// Deserialization checks the dimensions and that every tile sits at its own coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSpec")]
pub struct Board {
    #[serde(skip_serializing)]
    size: Coord2,
    tiles: Array2<Tile>,
}

/// Unchecked board as read from serialized data.
#[derive(Deserialize)]
struct BoardSpec {
    tiles: Array2<Tile>,
}

impl TryFrom<BoardSpec> for Board {
    type Error = GameError;

    fn try_from(spec: BoardSpec) -> Result<Self> {
        let (rows, cols) = spec.tiles.dim();
        if rows == 0 || cols == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        let (Ok(row_count), Ok(col_count)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigIssue::BoardTooLarge { rows, cols }.into());
        };
        let board = Self {
            size: (row_count, col_count),
            tiles: spec.tiles,
        };

        for (tile, coords) in board.tiles.iter().zip(board.coords()) {
            if tile.coords != coords {
                return Err(IllegalAction::CoordsMismatch.into());
            }
            if tile.was_revealed && tile.mines_around != board.adjacent_mine_count(coords) {
                return Err(ConfigIssue::Malformed.into());
            }
        }
        Ok(board)
    }
}

impl Board {
    /// Creates a board of hidden, unflagged, mine-free tiles, coordinates assigned row-major.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        Ok(Self::blank(size))
    }

    pub(crate) fn blank(size: Coord2) -> Self {
        let mut tiles = Array2::from_elem(size.to_nd_index(), Tile::new((0, 0)));
        for (tile, coords) in tiles.iter_mut().zip(row_major(size)) {
            *tile = Tile::new(coords);
        }
        Self { size, tiles }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Replaces the tile at `coords`; the replacement must carry the same coordinates.
    pub fn set(&mut self, coords: Coord2, tile: Tile) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if tile.coords != coords {
            return Err(IllegalAction::CoordsMismatch.into());
        }
        *self.tile_mut(coords) = tile;
        Ok(())
    }

    /// The up to eight in-bounds cells around `coords`, excluding `coords` itself.
    pub fn neighbors(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    /// Row-major iteration over every tile.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        row_major(self.size)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.was_revealed)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.is_flagged)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.has_mine)
    }

    /// Number of mines around `coords`, counted from the board rather than the cache.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |tile| tile.has_mine)
    }

    pub fn adjacent_flag_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |tile| tile.is_flagged)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Tile) -> bool) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| pred(&self[pos]))
            .count() as u8
    }

    fn count_tiles(&self, pred: impl Fn(&Tile) -> bool) -> CellCount {
        // the board holds at most `Coord::MAX * Coord::MAX` tiles
        self.tiles.iter().filter(|&tile| pred(tile)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn new_board_is_blank_and_row_major() {
        let board = Board::new((2, 3)).unwrap();

        assert_eq!(board.size(), (2, 3));
        assert_eq!(board.total_cells(), 6);
        let coords: Vec<_> = board.tiles().map(|tile| tile.coords).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert!(board.tiles().all(|tile| *tile == Tile::new(tile.coords)));
        assert_eq!(board.coords().collect::<Vec<_>>(), coords);
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        let expected = Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard));

        assert_eq!(Board::new((0, 4)), expected);
        assert_eq!(Board::new((4, 0)), expected);
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let board = Board::new((2, 2)).unwrap();

        assert_eq!(board.get((2, 0)), Err(GameError::OutOfBounds((2, 0))));
        assert_eq!(board.get((0, 2)), Err(GameError::OutOfBounds((0, 2))));
        assert_eq!(board.get((1, 1)).unwrap().coords, (1, 1));
    }

    #[test]
    fn set_keeps_coordinates_fixed() {
        let mut board = Board::new((2, 2)).unwrap();
        let mut tile = board.get((0, 1)).unwrap();
        tile.has_mine = true;

        assert_eq!(
            board.set((1, 0), tile),
            Err(GameError::IllegalAction(IllegalAction::CoordsMismatch))
        );
        assert_eq!(board.set((0, 1), tile), Ok(()));
        assert!(board[(0, 1)].has_mine);
        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn neighbors_are_bounded_and_exclude_center() {
        for rows in 1..6 {
            for cols in 1..6 {
                let board = Board::new((rows, cols)).unwrap();
                for center in board.coords() {
                    let neighbors = board.neighbors(center).unwrap();
                    assert!(neighbors.len() <= 8);
                    for &pos in &neighbors {
                        assert_ne!(pos, center);
                        assert!(board.validate_coords(pos).is_ok());
                        assert!(pos.0.abs_diff(center.0) <= 1 && pos.1.abs_diff(center.1) <= 1);
                    }
                }
            }
        }
    }

    fn board_json(tiles: Array2<Tile>) -> serde_json::Value {
        serde_json::json!({ "tiles": serde_json::to_value(tiles).unwrap() })
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let mut board = Board::new((3, 4)).unwrap();
        board.tile_mut((0, 1)).has_mine = true;
        board.expose((0, 0));

        let json = serde_json::to_value(&board).unwrap();
        let restored: Board = serde_json::from_value(json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.size(), (3, 4));
        assert_eq!(restored.neighbors((2, 3)).unwrap().len(), 3);
    }

    #[test]
    fn deserialize_rejects_oversized_boards() {
        let tiles = Array2::from_elem((256, 1), Tile::new((0, 0)));

        let err = serde_json::from_value::<Board>(board_json(tiles)).unwrap_err();

        assert!(err.to_string().contains("256x1"));
    }

    #[test]
    fn deserialize_rejects_empty_boards() {
        let tiles = Array2::from_elem((0, 3), Tile::new((0, 0)));

        assert!(serde_json::from_value::<Board>(board_json(tiles)).is_err());
    }

    #[test]
    fn deserialize_rejects_misplaced_tiles() {
        let mut tiles = Board::new((2, 2)).unwrap().tiles;
        tiles[[1, 0]].coords = (0, 1);

        let err = serde_json::from_value::<Board>(board_json(tiles)).unwrap_err();

        assert!(err.to_string().contains("different coordinates"));
    }

    #[test]
    fn deserialize_rejects_stale_counts() {
        let mut board = Board::new((2, 2)).unwrap();
        board.tile_mut((1, 1)).has_mine = true;
        board.expose((0, 0));
        let mut tiles = board.tiles.clone();
        tiles[[0, 0]].mines_around = 0;

        assert!(serde_json::from_value::<Board>(board_json(tiles)).is_err());
    }

    #[test]
    fn neighbors_of_out_of_bounds_cell_fail() {
        let board = Board::new((3, 3)).unwrap();

        assert_eq!(board.neighbors((3, 1)), Err(GameError::OutOfBounds((3, 1))));
    }
}
