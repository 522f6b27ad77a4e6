use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first reveal places the mines)
/// - Ready -> Won / Lost (first reveal ends the game)
/// - Active -> Won / Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// Mines not placed yet
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagReport {
    /// Whether the tile carries a flag now
    pub flagged: bool,
    pub flags_remaining: CellCount,
    pub outcome: Outcome,
}

/// One game session: owns the board, the mines, the flag budget, and the generator that places the
/// mines.
///
/// Every action either completes fully, including its flood-fill and the win/loss check, or fails
/// without touching the board.
#[derive(Clone, Debug)]
pub struct PlayEngine<P = RandomPlacer> {
    config: GameConfig,
    placer: P,
    board: Board,
    mines: Option<MinePlacement>,
    flags: FlagBudget,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine<RandomPlacer> {
    /// New game with randomly placed mines; the same seed replays the same layouts.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_placer(config, RandomPlacer::new(seed))
    }
}

impl PlayEngine<FixedPlacer> {
    /// New game with mines at the given coordinates, regardless of the first click.
    pub fn with_mines(size: Coord2, mines: &[Coord2], rules: Rules) -> Result<Self> {
        let placer = FixedPlacer::new(mines);
        let config = GameConfig::new(size, placer.mine_count())?.with_rules(rules);
        placer.check(&config)?;

        Ok(Self::from_placer(config, placer))
    }
}

impl<P: MinePlacer> PlayEngine<P> {
    pub fn from_placer(config: GameConfig, placer: P) -> Self {
        Self {
            config,
            placer,
            board: Board::blank(config.size()),
            mines: None,
            flags: FlagBudget::new(config.mines()),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Discards the current game and starts a new one with the same config.
    pub fn reset(&mut self) {
        self.board = Board::blank(self.config.size());
        self.mines = None;
        self.flags = FlagBudget::new(self.config.mines());
        self.state = EngineState::Ready;
        self.triggered_mine = None;
        log::debug!("New game on {:?} board", self.config.size());
    }

    /// Discards the current game and starts a new one with `config`.
    ///
    /// A config the placer cannot satisfy is rejected and the current game goes on.
    pub fn restart(&mut self, config: GameConfig) -> Result<()> {
        self.placer.check(&config)?;
        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags.remaining()
    }

    /// Mine coordinates, known once the first reveal placed them.
    pub fn mines(&self) -> Option<&MinePlacement> {
        self.mines.as_ref()
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let tile = self.board.get(coords)?;
        Ok(if self.triggered_mine == Some(coords) {
            CellView::Exploded
        } else {
            tile.view()
        })
    }

    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        !self.state.is_finished() && self.board.is_chordable(coords)
    }

    /// Reveals a hidden tile, flooding zero regions. The first reveal of a game places the mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let tile = self.board[coords];
        if tile.is_flagged {
            return Err(IllegalAction::RevealFlagged.into());
        }
        if tile.was_revealed {
            return Ok(Outcome::Continue);
        }

        self.ensure_mines(coords)?;
        let exposure = self.board.flood_reveal(coords)?;
        self.settle(exposure)
    }

    /// Reveals the unflagged neighbors of a revealed number whose flags match it.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let exposure = self.board.chord_reveal(coords)?;
        self.settle(exposure)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let flagged = self.board.toggle_flag(coords, &mut self.flags)?;
        let outcome = self.settle(Exposure::Unchanged)?;
        Ok(FlagReport {
            flagged,
            flags_remaining: self.flags.remaining(),
            outcome,
        })
    }

    /// Places the mines on a copy of the board and keeps it only if the placement is consistent.
    fn ensure_mines(&mut self, first_move: Coord2) -> Result<()> {
        if self.mines.is_none() {
            let mut armed = self.board.clone();
            let placement = self.placer.place(&mut armed, &self.config, first_move)?;
            if placement.len() != self.config.mines() || !placement.matches(&armed) {
                log::warn!(
                    "Rejected placement of {} mines, {} armed on the board",
                    placement.len(),
                    armed.mine_count()
                );
                return Err(ConfigIssue::MineCountMismatch {
                    expected: self.config.mines(),
                    placed: placement.len(),
                }
                .into());
            }
            self.board = armed;
            self.mines = Some(placement);
            self.state = EngineState::Active;
            log::debug!("Game started at {first_move:?}");
        }
        Ok(())
    }

    /// Runs the win/loss evaluation after a mutation.
    fn settle(&mut self, exposure: Exposure) -> Result<Outcome> {
        if let Exposure::Mine(coords) = exposure {
            if self.board.check_loss(coords)? {
                self.lose(coords);
                return Ok(Outcome::Loss);
            }
        }

        if self.mines.is_some() && self.board.check_win(self.config.rules().win) {
            self.win();
            return Ok(Outcome::Win);
        }
        Ok(Outcome::Continue)
    }

    fn lose(&mut self, triggered: Coord2) {
        self.state = EngineState::Lost;
        self.triggered_mine = Some(triggered);
        if let Some(mines) = &self.mines {
            self.board.disclose_mines(mines);
        }
        log::debug!("Game lost at {triggered:?}");
    }

    fn win(&mut self) {
        self.state = EngineState::Won;
        if let Some(mines) = &self.mines {
            self.board.flag_remaining_mines(mines);
        }
        self.flags.spend_all();
        log::debug!("Game won");
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
