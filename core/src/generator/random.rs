use alloc::vec::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Placement strategy that keeps the first revealed area clear according to [`FirstClick`], but
/// other than that is purely random.
///
/// The generator is seeded once and keeps its stream across games, so a seed replays a whole
/// session.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn reserved(board: &Board, first_move: Coord2, first_click: FirstClick) -> Vec<Coord2> {
        use FirstClick::*;

        match first_click {
            Unprotected => Vec::new(),
            Safe => Vec::from([first_move]),
            Opening => {
                let mut reserved = Vec::from([first_move]);
                reserved.extend(board.iter_neighbors(first_move));
                reserved
            }
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(
        &mut self,
        board: &mut Board,
        config: &GameConfig,
        first_move: Coord2,
    ) -> Result<MinePlacement> {
        use FirstClick::*;

        let first_move = board.validate_coords(first_move)?;
        let total_cells = board.total_cells();
        let mines = config.mines();

        let mut first_click = config.rules().first_click;
        if first_click == Opening {
            let opening = Self::reserved(board, first_move, Opening).len() as CellCount;
            if mines + opening > total_cells {
                log::warn!("Cannot keep an opening around {first_move:?}, fallback to simple safe");
                first_click = Safe;
            }
        }

        let reserved = Self::reserved(board, first_move, first_click);
        let mut candidates: Vec<Coord2> = board
            .coords()
            .filter(|coords| !reserved.contains(coords))
            .collect();

        let available = candidates.len() as CellCount;
        if mines > available {
            return Err(ConfigIssue::TooManyMines {
                requested: mines,
                available,
            }
            .into());
        }

        let mut placement = MinePlacement::default();
        for _ in 0..mines {
            let pick = self.rng.random_range(0..candidates.len());
            placement.insert(candidates.swap_remove(pick));
        }
        placement.arm(board);

        log::debug!(
            "Placed {} mines on {:?} board, first move {:?} ({:?})",
            placement.len(),
            board.size(),
            first_move,
            first_click
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mines: CellCount, first_click: FirstClick) -> GameConfig {
        let rules = Rules {
            first_click,
            ..Default::default()
        };
        GameConfig::new(size, mines).unwrap().with_rules(rules)
    }

    #[test]
    fn places_exact_number_of_distinct_mines() {
        for seed in 0..20 {
            let config = config((9, 9), 10, FirstClick::Safe);
            let mut board = Board::new(config.size()).unwrap();

            let placement = RandomPlacer::new(seed)
                .place(&mut board, &config, (4, 4))
                .unwrap();

            assert_eq!(placement.len(), 10);
            assert_eq!(board.mine_count(), 10);
            assert!(placement.iter().all(|coords| board[coords].has_mine));
            assert!(!placement.contains((4, 4)));
        }
    }

    #[test]
    fn opening_keeps_neighbors_clear() {
        for seed in 0..20 {
            let config = config((8, 8), 40, FirstClick::Opening);
            let mut board = Board::new(config.size()).unwrap();

            RandomPlacer::new(seed)
                .place(&mut board, &config, (0, 3))
                .unwrap();

            assert!(!board[(0, 3)].has_mine);
            assert_eq!(board.adjacent_mine_count((0, 3)), 0);
            assert_eq!(board.mine_count(), 40);
        }
    }

    #[test]
    fn crowded_opening_falls_back_to_safe() {
        let config = config((3, 3), 8, FirstClick::Opening);
        let mut board = Board::new(config.size()).unwrap();

        let placement = RandomPlacer::new(7)
            .place(&mut board, &config, (1, 1))
            .unwrap();

        assert_eq!(placement.len(), 8);
        assert!(!board[(1, 1)].has_mine);
        assert_eq!(board.adjacent_mine_count((1, 1)), 8);
    }

    #[test]
    fn unprotected_can_fill_every_cell_but_one() {
        let config = config((2, 2), 3, FirstClick::Unprotected);
        let mut board = Board::new(config.size()).unwrap();

        let placement = RandomPlacer::new(1)
            .place(&mut board, &config, (0, 0))
            .unwrap();

        assert_eq!(placement.len(), 3);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = config((16, 30), 99, FirstClick::Safe);
        let mut first = Board::new(config.size()).unwrap();
        let mut second = Board::new(config.size()).unwrap();

        let a = RandomPlacer::new(42).place(&mut first, &config, (8, 8)).unwrap();
        let b = RandomPlacer::new(42).place(&mut second, &config, (8, 8)).unwrap();

        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_bounds_first_move_leaves_board_blank() {
        let config = config((3, 3), 2, FirstClick::Safe);
        let mut board = Board::new(config.size()).unwrap();

        let result = RandomPlacer::new(3).place(&mut board, &config, (3, 0));

        assert_eq!(result, Err(GameError::OutOfBounds((3, 0))));
        assert_eq!(board.mine_count(), 0);
    }
}
