use rand::rngs::SmallRng;

use crate::*;
pub use random::*;

mod random;

/// Decides where the mines of a game go, once the first cell is known.
pub trait MinePlacer {
    fn place(&self, config: GameConfig, first: Coord2, rng: &mut SmallRng) -> MineLayout;
}

/// Replays a predetermined layout, ignoring the first cell.
impl MinePlacer for MineLayout {
    fn place(&self, _config: GameConfig, _first: Coord2, _rng: &mut SmallRng) -> MineLayout {
        self.clone()
    }
}

/// Placement strategy owned by a board.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Placement {
    /// Uniform retries until every mine lands outside the safe zone.
    #[default]
    Rejection,
    /// Partial shuffle of the cells outside the safe zone, bounded work.
    Shuffle,
    Fixed(MineLayout),
}

impl MinePlacer for Placement {
    fn place(&self, config: GameConfig, first: Coord2, rng: &mut SmallRng) -> MineLayout {
        match self {
            Self::Rejection => RejectionSampler.place(config, first, rng),
            Self::Shuffle => ShuffleSampler.place(config, first, rng),
            Self::Fixed(layout) => layout.place(config, first, rng),
        }
    }
}

/// Number of cells outside the safe zone around `first`.
fn available_cells(config: GameConfig, first: Coord2) -> CellCount {
    // the zone is `first` plus its in-bounds neighbors
    let zone = 1 + NeighborIter::new(first, config.size).count() as CellCount;
    config.total_cells().saturating_sub(zone)
}

/// Caps the requested mine count to what fits outside the safe zone.
fn feasible_mines(config: GameConfig, first: Coord2) -> CellCount {
    let available = available_cells(config, first);
    if config.mines > available {
        log::warn!(
            "Cannot fit {} mines outside the safe zone, placing {} instead",
            config.mines,
            available
        );
        available
    } else {
        config.mines
    }
}
