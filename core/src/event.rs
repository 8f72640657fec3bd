use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Change notifications recorded by a [`Board`] for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A cell's cover changed.
    CellChanged { coords: Coord2, cell: Cell },
    FlagsChanged { remaining: i32 },
    /// Mines went down around the first revealed cell, the clock may start.
    MinesPlaced { first: Coord2 },
    /// Every safe cell is open. Carries the time to submit as a score.
    Won { elapsed: Duration },
    Lost { coords: Coord2 },
}
