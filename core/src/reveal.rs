use alloc::collections::VecDeque;
use core::ops::BitOr;

use crate::*;

/// What a reveal uncovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exposure {
    Unchanged,
    Safe,
    /// A mine was revealed at the given coordinates.
    Mine(Coord2),
}

impl Exposure {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Used to merge exposures when revealing several tiles at once
impl BitOr for Exposure {
    type Output = Exposure;

    fn bitor(self, rhs: Self) -> Self::Output {
        use Exposure::*;
        match (self, rhs) {
            // the first mine wins
            (Mine(coords), _) => Mine(coords),
            (_, Mine(coords)) => Mine(coords),
            (Safe, _) => Safe,
            (_, Safe) => Safe,
            (Unchanged, Unchanged) => Unchanged,
        }
    }
}

impl Board {
    /// Reveals one hidden tile and caches its adjacent mine count.
    ///
    /// Already revealed tiles are left alone, flagged tiles are rejected.
    pub fn reveal_single(&mut self, coords: Coord2) -> Result<Exposure> {
        let coords = self.validate_coords(coords)?;
        let tile = self[coords];

        if tile.was_revealed {
            return Ok(Exposure::Unchanged);
        }
        if tile.is_flagged {
            return Err(IllegalAction::RevealFlagged.into());
        }

        self.expose(coords);
        Ok(if tile.has_mine {
            Exposure::Mine(coords)
        } else {
            Exposure::Safe
        })
    }

    /// Reveals `coords` and, when it has no adjacent mines, the whole zero region around it plus
    /// its border.
    ///
    /// The region is walked breadth-first with an explicit frontier; `was_revealed` marks visited
    /// tiles and flagged tiles stop the spread.
    pub fn flood_reveal(&mut self, coords: Coord2) -> Result<Exposure> {
        let exposure = self.reveal_single(coords)?;
        if exposure != Exposure::Safe || self[coords].mines_around != 0 {
            return Ok(exposure);
        }

        let mut frontier: VecDeque<Coord2> = self.hidden_neighbors(coords).collect();
        log::trace!("Starting flood-fill from {coords:?}, initial neighbors: {frontier:?}");

        while let Some(visit_coords) = frontier.pop_front() {
            if !self[visit_coords].is_open_to_reveal() {
                continue;
            }

            let visit_count = self.expose(visit_coords);
            log::trace!("Flood revealed tile at {visit_coords:?}, mine count: {visit_count}");

            if visit_count == 0 {
                frontier.extend(self.hidden_neighbors(visit_coords));
            }
        }

        Ok(exposure)
    }

    /// Reveals every unflagged neighbor of a revealed number once the flags around it match the
    /// number.
    ///
    /// An unsatisfied number is left alone.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<Exposure> {
        let coords = self.validate_coords(coords)?;
        let tile = self[coords];

        if !tile.was_revealed {
            return Err(IllegalAction::ChordHidden.into());
        }
        if tile.mines_around == 0 {
            return Err(IllegalAction::ChordZero.into());
        }
        if self.adjacent_flag_count(coords) != tile.mines_around {
            return Ok(Exposure::Unchanged);
        }

        let targets: Neighbors = self.hidden_neighbors(coords).collect();
        let mut exposure = Exposure::Unchanged;
        for target in targets {
            exposure = exposure | self.flood_reveal(target)?;
        }
        Ok(exposure)
    }

    /// Whether a chord at `coords` would reveal anything.
    pub fn is_chordable(&self, coords: Coord2) -> bool {
        let Ok(coords) = self.validate_coords(coords) else {
            return false;
        };
        let tile = self[coords];

        tile.was_revealed
            && !tile.has_mine
            && tile.mines_around > 0
            && self.adjacent_flag_count(coords) == tile.mines_around
            && self.hidden_neighbors(coords).next().is_some()
    }

    /// Marks the tile revealed and returns its freshly computed mine count.
    pub(crate) fn expose(&mut self, coords: Coord2) -> u8 {
        let mines_around = self.adjacent_mine_count(coords);
        let tile = self.tile_mut(coords);
        tile.was_revealed = true;
        tile.mines_around = mines_around;
        mines_around
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_open_to_reveal())
    }
}
