//! Board logic for Minesweeper: deferred mine placement, neighbor counts,
//! flood-fill and chorded reveals, flag bookkeeping and win/loss detection.
//!
//! Rendering, timers and input handling belong to the caller, which owns a
//! [`Board`], feeds coordinates into it and polls [`BoardEvent`]s back out.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod event;
mod generator;
mod types;

/// Cells kept free of mines around the first reveal.
pub const SAFE_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, columns)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Sanitizes the requested board: at least one row and column, and never
    /// more mines than fit outside the first-click safe zone.
    pub fn new((rows, columns): Coord2, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        let mines = mines.min(Self::max_mines_for((rows, columns)));
        Self::new_unchecked((rows, columns), mines)
    }

    /// One mine per six cells, clamped like [`GameConfig::new`].
    pub fn recommended(size: Coord2) -> Self {
        let total = cell_total(size.0.max(1), size.1.max(1));
        Self::new(size, total / 6)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    pub const fn max_mines_for(size: Coord2) -> CellCount {
        cell_total(size.0, size.1).saturating_sub(SAFE_ZONE_CELLS)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_total(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Mine positions for one game, kept in placement order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_coords: Vec<Coord2>,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_coords: Vec::new(),
        }
    }

    /// Builds a layout from explicit coordinates, duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            layout.insert(coords);
        }

        Ok(layout)
    }

    /// Adds a mine, returns `false` if one was already there.
    pub(crate) fn insert(&mut self, coords: Coord2) -> bool {
        let slot = &mut self.mine_mask[coords.to_nd_index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.mine_coords.push(coords);
        true
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count())
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.mine_mask.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by the cell count, which fits `CellCount`
        self.mine_coords.len() as CellCount
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines in the order they were placed.
    pub fn mine_coords(&self) -> &[Coord2] {
        &self.mine_coords
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_dimensions_and_mine_cap() {
        let config = GameConfig::new((0, 0), 10);
        assert_eq!(config.size, (1, 1));
        assert_eq!(config.mines, 0);

        let config = GameConfig::new((3, 3), 5);
        assert_eq!(config.mines, 0);

        let config = GameConfig::new((4, 4), 100);
        assert_eq!(config.mines, 7);

        let config = GameConfig::new((10, 10), 20);
        assert_eq!(config.mines, 20);
    }

    #[test]
    fn recommended_uses_one_mine_per_six_cells() {
        assert_eq!(GameConfig::recommended((12, 12)).mines, 24);
        assert_eq!(GameConfig::recommended((3, 3)).mines, 0);
    }

    #[test]
    fn presets_respect_the_cap() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(GameConfig::new(config.size, config.mines), config);
        }
    }

    #[test]
    fn config_serializes_as_plain_fields() {
        let config = GameConfig::new((5, 7), 4);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"size":[5,7],"mines":4}"#);

        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn layout_rejects_out_of_bounds_and_dedupes() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );

        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 0), (2, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.mine_coords(), &[(0, 0), (2, 1)]);
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 1)));
    }
}
