use alloc::vec::Vec;

use super::*;

/// Placement from a predetermined list of mine coordinates, ignoring the first move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    /// Checks the mines against `board` and collects them, without arming anything.
    pub fn layout(&self, board: &Board) -> Result<MinePlacement> {
        MinePlacement::collect(board, self.mines.iter().copied())
    }
}

impl MinePlacer for FixedPlacer {
    fn place(
        &mut self,
        board: &mut Board,
        config: &GameConfig,
        _first_move: Coord2,
    ) -> Result<MinePlacement> {
        self.check(config)?;
        let placement = MinePlacement::from_coords(board, self.mines.iter().copied())?;
        log::debug!("Laid out {} fixed mines", placement.len());
        Ok(placement)
    }

    fn check(&self, config: &GameConfig) -> Result<()> {
        let placement = self.layout(&Board::new(config.size())?)?;
        if placement.len() != config.mines() {
            return Err(ConfigIssue::MineCountMismatch {
                expected: config.mines(),
                placed: placement.len(),
            }
            .into());
        }
        Ok(())
    }
}
