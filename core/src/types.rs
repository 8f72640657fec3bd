use ndarray::Array2;

/// Row or column index, and row or column count. Boards top out at 255×255.
pub type Coord = u8;

/// Cell and mine tallies; 255×255 still fits.
pub type CellCount = u16;

/// A cell position as `(row, column)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

/// Converts a `(row, column)` position into the `[row, column]` index the
/// board's `Array2` storage expects.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a `rows`×`columns` board.
pub const fn cell_total(rows: Coord, columns: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(columns as CellCount)
}

/// Whether `coords` lies in the inclusive 3×3 square centered on `center`.
pub const fn within_one(center: Coord2, coords: Coord2) -> bool {
    center.0.abs_diff(coords.0) <= 1 && center.1.abs_diff(coords.1) <= 1
}

/// Neighbor lookup on row-major grids.
pub trait GridNeighbors {
    fn neighbors_of(&self, coords: Coord2) -> NeighborIter;
}

impl<T> GridNeighbors for Array2<T> {
    fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        let (rows, columns) = self.dim();
        // boards are built from `Coord` sizes, so both axes fit
        NeighborIter::new(coords, (rows as Coord, columns as Coord))
    }
}

/// Lazy walk over the Moore neighborhood of `center`.
///
/// The 3×3 window is clipped to the board up front, then scanned row by row,
/// left to right, skipping the center. Edge cells yield five neighbors and
/// corners three.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    /// Last row and column of the clipped window, inclusive.
    last: Coord2,
    /// First column of the clipped window, where each new row restarts.
    first_column: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    /// `bounds` is the board size as `(rows, columns)`. A center outside the
    /// board yields whatever part of its window overlaps the board.
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, column) = center;
        let (rows, columns) = bounds;
        let first = (row.saturating_sub(1), column.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows.saturating_sub(1)),
            column.saturating_add(1).min(columns.saturating_sub(1)),
        );
        let empty = rows == 0 || columns == 0 || first.0 > last.0 || first.1 > last.1;

        Self {
            center,
            last,
            first_column: first.1,
            cursor: (!empty).then_some(first),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.cursor?;
            let (row, column) = current;

            self.cursor = if column < self.last.1 {
                Some((row, column + 1))
            } else if row < self.last.0 {
                Some((row + 1, self.first_column))
            } else {
                None
            };

            if current != self.center {
                return Some(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn interior_cell_has_eight_neighbors_in_row_major_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn window_is_clipped_for_centers_past_the_edge() {
        let neighbors: Vec<_> = NeighborIter::new((3, 1), (3, 3)).collect();

        assert_eq!(neighbors, [(2, 0), (2, 1), (2, 2)]);
        assert_eq!(NeighborIter::new((9, 9), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((0, 0), (0, 4)).count(), 0);
    }

    #[test]
    fn restarting_scans_the_same_cells() {
        let first = NeighborIter::new((0, 2), (2, 3));
        let again = first.clone();

        assert!(first.eq(again));
        assert_eq!(cell_total(255, 255), 65025);
    }

    #[test]
    fn within_one_is_the_inclusive_square() {
        assert!(within_one((1, 1), (0, 0)));
        assert!(within_one((1, 1), (2, 2)));
        assert!(within_one((0, 0), (0, 0)));
        assert!(!within_one((1, 1), (3, 1)));
        assert!(!within_one((0, 0), (0, 2)));
    }
}
