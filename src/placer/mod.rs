use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Strategy for laying out mines, invoked once per session by the first
/// reveal command.
pub trait MinePlacer {
    /// Builds the mine grid for `config`. `exclude` is the first-revealed
    /// cell; placements avoid it and, room permitting, its neighborhood.
    fn place(&mut self, config: GameConfig, exclude: Coord2) -> MineGrid;
}

/// Deterministic placement from an explicit coordinate list. Honors the
/// list verbatim, so first-click safety is the caller's concern.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    /// Fails with `OutOfBounds` if any listed coordinate falls outside a
    /// `size` grid, so `place` always delivers the full list.
    pub fn new(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        for &coords in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
        }
        Ok(Self {
            mines: mines.to_vec(),
        })
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, config: GameConfig, _exclude: Coord2) -> MineGrid {
        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &coords in &self.mines {
            mask[coords.to_nd_index()] = true;
        }
        MineGrid::from_mask(mask)
    }
}
