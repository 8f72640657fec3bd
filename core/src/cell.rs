use serde::{Deserialize, Serialize};

/// What lies under a cell. A cell is never both a mine and a count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Mine,
    /// Number of adjacent mines, always in `1..=8`.
    Count(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, zero for empty cells and mines.
    pub const fn number(self) -> u8 {
        match self {
            Self::Count(count) => count,
            Self::Empty | Self::Mine => 0,
        }
    }

    /// Bumps the adjacent count by one, mines stay mines.
    pub(crate) const fn incremented(self) -> Self {
        match self {
            Self::Empty => Self::Count(1),
            Self::Count(count) => Self::Count(count + 1),
            Self::Mine => Self::Mine,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    Covered,
    Open,
    Flagged,
}

impl Default for Cover {
    fn default() -> Self {
        Self::Covered
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub cover: Cover,
}

impl Cell {
    pub const fn is_covered(self) -> bool {
        matches!(self.cover, Cover::Covered)
    }

    pub const fn is_open(self) -> bool {
        matches!(self.cover, Cover::Open)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_walks_empty_to_counts_and_skips_mines() {
        let content = CellContent::Empty.incremented().incremented();

        assert_eq!(content, CellContent::Count(2));
        assert_eq!(CellContent::Mine.incremented(), CellContent::Mine);
    }
}
