use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Draws uniformly random cells and keeps the ones that are free and outside
/// the 3×3 square around the first cell.
///
/// There is no bound on the number of draws. With the mine count capped to the
/// cells available outside the safe zone it finishes with probability one, but
/// dense boards can take many retries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectionSampler;

impl MinePlacer for RejectionSampler {
    fn place(&self, config: GameConfig, first: Coord2, rng: &mut SmallRng) -> MineLayout {
        let (rows, columns) = config.size;
        let target = feasible_mines(config, first);
        let mut layout = MineLayout::empty(config.size);
        let mut draws: u64 = 0;

        while layout.mine_count() < target {
            let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
            draws += 1;
            if !within_one(first, coords) {
                layout.insert(coords);
            }
        }

        log::debug!(
            "Placed {} mines around {:?} in {} draws",
            layout.mine_count(),
            first,
            draws
        );
        layout
    }
}

/// Partial Fisher-Yates shuffle over the cells outside the safe zone.
///
/// Same distribution as [`RejectionSampler`] but with linear, bounded work.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShuffleSampler;

impl MinePlacer for ShuffleSampler {
    fn place(&self, config: GameConfig, first: Coord2, rng: &mut SmallRng) -> MineLayout {
        let (rows, columns) = config.size;
        let target = usize::from(feasible_mines(config, first));
        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .filter(|&coords| !within_one(first, coords))
            .collect();

        let mut layout = MineLayout::empty(config.size);
        for i in 0..target {
            let pick = rng.random_range(i..candidates.len());
            candidates.swap(i, pick);
            layout.insert(candidates[i]);
        }

        log::debug!(
            "Shuffled {} mines around {:?}",
            layout.mine_count(),
            first
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(layout: &MineLayout, config: GameConfig, first: Coord2) {
        assert_eq!(layout.size(), config.size);
        assert_eq!(layout.mine_count(), config.mines);
        for &coords in layout.mine_coords() {
            assert!(!within_one(first, coords), "mine at {coords:?} near {first:?}");
            assert!(layout.contains_mine(coords));
        }
    }

    #[test]
    fn rejection_keeps_safe_zone_clear() {
        let config = GameConfig::new((9, 9), 72);
        for seed in 0..8 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let first = (4, 4);
            let layout = RejectionSampler.place(config, first, &mut rng);
            assert_valid(&layout, config, first);
        }
    }

    #[test]
    fn rejection_handles_corner_first_cell() {
        let config = GameConfig::new((5, 5), 16);
        let mut rng = SmallRng::seed_from_u64(7);
        let layout = RejectionSampler.place(config, (0, 0), &mut rng);
        assert_valid(&layout, config, (0, 0));
    }

    #[test]
    fn shuffle_keeps_safe_zone_clear() {
        let config = GameConfig::expert();
        for seed in 0..8 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let first = (15, 0);
            let layout = ShuffleSampler.place(config, first, &mut rng);
            assert_valid(&layout, config, first);
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::intermediate();
        let a = RejectionSampler.place(config, (3, 3), &mut SmallRng::seed_from_u64(42));
        let b = RejectionSampler.place(config, (3, 3), &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_requests_are_capped() {
        let config = GameConfig::new_unchecked((3, 3), 5);
        let mut rng = SmallRng::seed_from_u64(1);

        let layout = ShuffleSampler.place(config, (1, 1), &mut rng);
        assert_eq!(layout.mine_count(), 0);

        // corner zone only covers four cells
        let layout = RejectionSampler.place(config, (0, 0), &mut rng);
        assert_eq!(layout.mine_count(), 5);
    }

    #[test]
    fn fixed_layout_ignores_first_cell() {
        let fixed = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let placement = Placement::Fixed(fixed.clone());
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(placement.place(fixed.game_config(), (0, 0), &mut rng), fixed);
    }
}
