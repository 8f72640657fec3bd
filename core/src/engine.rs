use alloc::vec::{Drain, Vec};
use core::time::Duration;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Fresh grid, mines not placed yet.
    #[default]
    Ready,
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Coarse result exposed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Won,
    Lost,
}

impl From<EngineState> for GameResult {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Ready | EngineState::Playing => Self::InProgress,
            EngineState::Won => Self::Won,
            EngineState::Lost => Self::Lost,
        }
    }
}

/// Pending work while a reveal cascades.
#[derive(Copy, Clone, Debug)]
enum Visit {
    /// Flood-fill step, always processed.
    Any(Coord2),
    /// Chord step, skipped if the cell stopped being covered meanwhile.
    IfCovered(Coord2),
}

/// A Minesweeper board and the rules that drive it.
///
/// The board owns its random source, so a game is reproducible from the seed
/// given at construction.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    placement: Placement,
    rng: SmallRng,
    grid: Array2<Cell>,
    mine_count: CellCount,
    open_count: CellCount,
    flags_remaining: i32,
    state: EngineState,
    elapsed: Duration,
    triggered_mine: Option<Coord2>,
    events: Vec<BoardEvent>,
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut board = Self {
            config,
            placement: Placement::default(),
            rng: SmallRng::seed_from_u64(seed),
            grid: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            open_count: 0,
            flags_remaining: 0,
            state: EngineState::Ready,
            elapsed: Duration::ZERO,
            triggered_mine: None,
            events: Vec::new(),
        };
        board.new_game();
        board
    }

    pub fn with_placement(config: GameConfig, placement: Placement, seed: u64) -> Result<Self> {
        let mut board = Self::new(config, seed);
        board.set_placement(placement)?;
        board.new_game();
        Ok(board)
    }

    /// Board whose every game uses `layout`, bypassing the density cap.
    pub fn with_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        let mut board = Self::new(config, 0);
        board.placement = Placement::Fixed(layout);
        board
    }

    /// Sanitizes and stores a new configuration, applied by the next
    /// [`Board::new_game`].
    pub fn configure(&mut self, rows: Coord, columns: Coord, mines: CellCount) {
        self.config = GameConfig::new((rows, columns), mines);
        if let Placement::Fixed(layout) = &self.placement {
            if layout.game_config() != self.config {
                log::debug!("Fixed layout no longer matches the configuration, dropping it");
                self.placement = Placement::default();
            }
        }
    }

    /// Switches the placement strategy, applied by the next [`Board::new_game`].
    pub fn set_placement(&mut self, placement: Placement) -> Result<()> {
        if let Placement::Fixed(layout) = &placement {
            if layout.size() != self.config.size {
                return Err(GameError::LayoutMismatch);
            }
            self.config = layout.game_config();
        }
        self.placement = placement;
        Ok(())
    }

    /// Replaces the whole grid with a fresh covered one.
    pub fn new_game(&mut self) {
        self.grid = Array2::default(self.config.size.to_nd_index());
        self.mine_count = self.config.mines;
        self.open_count = 0;
        self.flags_remaining = i32::from(self.config.mines);
        self.state = EngineState::Ready;
        self.elapsed = Duration::ZERO;
        self.triggered_mine = None;
        self.events.clear();
        log::debug!(
            "New game {}x{} with {} mines",
            self.config.rows(),
            self.config.columns(),
            self.config.mines
        );
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.grid.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn open_count(&self) -> CellCount {
        self.open_count
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn game_result(&self) -> GameResult {
        self.state.into()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Mines minus flags placed, negative when over-flagged.
    pub fn flags_remaining(&self) -> i32 {
        self.flags_remaining
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// # Panics
    ///
    /// When `coords` is outside the board, see [`Board::get`].
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords.to_nd_index()).copied()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.neighbors_of(coords)
    }

    /// Accumulates frame time while a game is being played.
    pub fn advance_time(&mut self, delta: Duration) {
        if self.state.is_playing() {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Whether revealing this number would open its neighbors.
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        match self.get(coords) {
            Some(Cell {
                content: CellContent::Count(count),
                cover: Cover::Open | Cover::Flagged,
            }) if !self.state.is_finished() => count == self.count_flagged_neighbors(coords),
            _ => false,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cover = match self.cell_at(coords).cover {
            Cover::Covered => {
                self.flags_remaining -= 1;
                Cover::Flagged
            }
            Cover::Flagged => {
                self.flags_remaining += 1;
                Cover::Covered
            }
            Cover::Open => return Ok(FlagOutcome::NoChange),
        };

        self.set_cover(coords, cover);
        self.events.push(BoardEvent::FlagsChanged {
            remaining: self.flags_remaining,
        });
        Ok(FlagOutcome::Changed)
    }

    /// Opens a covered cell, flooding through empty regions. Afterwards any
    /// numbered cell the cascade touches, already open or even flagged, opens
    /// its covered neighbors once its flagged neighbors match the number. The
    /// first call of a game places the mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.state.is_ready() {
            self.place_mines(coords);
        }

        let opened_before = self.open_count;
        let mut pending = Vec::from([Visit::Any(coords)]);

        while let Some(visit) = pending.pop() {
            let coords = match visit {
                Visit::Any(coords) => coords,
                Visit::IfCovered(coords) if self.cell_at(coords).is_covered() => coords,
                Visit::IfCovered(_) => continue,
            };

            if self.visit(coords, &mut pending) {
                self.lose(coords);
                return Ok(RevealOutcome::HitMine);
            }
        }

        debug_assert_eq!(self.open_count, self.count_open());
        if self.open_count == self.safe_cell_count() {
            self.win();
            return Ok(RevealOutcome::Won);
        }

        Ok(if self.open_count == opened_before {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed
        })
    }

    /// One step of a reveal cascade: open if covered, then chord if satisfied
    /// whatever the cover. Returns `true` when a mine was opened.
    fn visit(&mut self, coords: Coord2, pending: &mut Vec<Visit>) -> bool {
        let cell = self.cell_at(coords);

        match cell.cover {
            Cover::Covered => {
                self.set_cover(coords, Cover::Open);
                self.open_count += 1;
                log::trace!("Opened {:?}: {:?}", coords, cell.content);

                match cell.content {
                    CellContent::Mine => return true,
                    CellContent::Empty => {
                        let neighbors: Vec<_> = self.neighbors(coords).collect();
                        pending.extend(neighbors.into_iter().rev().map(Visit::Any));
                    }
                    CellContent::Count(_) => {}
                }
            }
            // only the open step is skipped, numbers still chord
            Cover::Open | Cover::Flagged => {}
        }

        if let CellContent::Count(count) = cell.content {
            if count == self.count_flagged_neighbors(coords) {
                let covered: Vec<_> = self
                    .neighbors(coords)
                    .filter(|&pos| self.cell_at(pos).is_covered())
                    .collect();
                pending.extend(covered.into_iter().rev().map(Visit::IfCovered));
            }
        }

        false
    }

    fn place_mines(&mut self, first: Coord2) {
        let layout = self.placement.place(self.config, first, &mut self.rng);
        for &coords in layout.mine_coords() {
            self.plant_mine(coords);
        }

        let placed = layout.mine_count();
        if placed != self.mine_count {
            self.flags_remaining -= i32::from(self.mine_count) - i32::from(placed);
            self.events.push(BoardEvent::FlagsChanged {
                remaining: self.flags_remaining,
            });
        }
        self.mine_count = placed;
        self.state = EngineState::Playing;
        self.events.push(BoardEvent::MinesPlaced { first });
        log::debug!("Game started at {:?} with {} mines", first, self.mine_count);
    }

    fn plant_mine(&mut self, coords: Coord2) {
        self.grid[coords.to_nd_index()].content = CellContent::Mine;
        for pos in self.neighbors(coords) {
            let cell = &mut self.grid[pos.to_nd_index()];
            cell.content = cell.content.incremented();
        }
    }

    fn set_cover(&mut self, coords: Coord2, cover: Cover) {
        let cell = &mut self.grid[coords.to_nd_index()];
        cell.cover = cover;
        let cell = *cell;
        self.events.push(BoardEvent::CellChanged { coords, cell });
    }

    fn win(&mut self) {
        self.state = EngineState::Won;
        self.events.push(BoardEvent::Won {
            elapsed: self.elapsed,
        });
        log::debug!("Game won after {:?}", self.elapsed);
    }

    fn lose(&mut self, coords: Coord2) {
        self.state = EngineState::Lost;
        self.triggered_mine = Some(coords);
        self.events.push(BoardEvent::Lost { coords });
        log::debug!("Game lost on mine at {:?}", coords);
    }

    fn safe_cell_count(&self) -> CellCount {
        cell_total(self.rows(), self.columns()) - self.mine_count
    }

    fn count_open(&self) -> CellCount {
        self.grid.iter().filter(|cell| cell.is_open()).count() as CellCount
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_flagged())
            .count() as u8
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
