use alloc::collections::BTreeSet;
use ndarray::Array2;

use super::*;

/// Uniform random placement by rejection sampling: draw coordinates until
/// enough distinct non-excluded cells carry a mine. Seeded, so a session
/// can be replayed exactly.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: rand::rngs::SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, config: GameConfig, exclude: Coord2) -> MineGrid {
        use rand::prelude::*;

        let (size_x, size_y) = config.size();
        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // The clicked cell always stays clear; its neighborhood only when
        // enough cells remain to hold every mine.
        let mut excluded = BTreeSet::from([exclude]);
        let zone: CellCount = 1 + neighbors(exclude, config.size()).count() as CellCount;
        if config.mines() <= config.total_cells() - zone {
            excluded.extend(neighbors(exclude, config.size()));
        } else {
            log::warn!(
                "not enough room to clear the opening around {:?}, only the clicked cell is kept safe",
                exclude
            );
        }

        let mut placed: CellCount = 0;
        while placed < config.mines() {
            let coords = (
                self.rng.random_range(0..size_x),
                self.rng.random_range(0..size_y),
            );
            if mask[coords.to_nd_index()] || excluded.contains(&coords) {
                continue;
            }
            mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        log::debug!("placed {} mines, opening kept clear at {:?}", placed, exclude);
        MineGrid::from_mask(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_the_exact_mine_count() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        let grid = RandomPlacer::new(7).place(config, (4, 4));

        assert_eq!(grid.mine_count(), 10);
    }

    #[test]
    fn clicked_cell_and_neighborhood_stay_clear() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        for seed in 0..50 {
            let grid = RandomPlacer::new(seed).place(config, (4, 4));

            assert!(!grid.contains_mine((4, 4)));
            for pos in neighbors((4, 4), config.size()) {
                assert!(!grid.contains_mine(pos), "mine adjacent to opening, seed {}", seed);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_layout() {
        let config = GameConfig::new((16, 16), 40).unwrap();
        let a = RandomPlacer::new(99).place(config, (8, 8));
        let b = RandomPlacer::new(99).place(config, (8, 8));

        assert_eq!(a, b);
    }

    #[test]
    fn crowded_board_falls_back_to_clicked_cell_only() {
        // 3 mines in 4 cells cannot spare the whole neighborhood.
        let config = GameConfig::new((2, 2), 3).unwrap();
        let grid = RandomPlacer::new(1).place(config, (0, 0));

        assert_eq!(grid.mine_count(), 3);
        assert!(!grid.contains_mine((0, 0)));
    }

    #[test]
    fn exclusion_holds_at_a_corner_opening() {
        let config = GameConfig::new((5, 5), 20).unwrap();
        let grid = RandomPlacer::new(3).place(config, (0, 0));

        assert_eq!(grid.mine_count(), 20);
        assert!(!grid.contains_mine((0, 0)));
        for pos in neighbors((0, 0), config.size()) {
            assert!(!grid.contains_mine(pos));
        }
    }
}
