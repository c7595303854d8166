#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use placer::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod placer;
mod types;

/// Construction-time parameters: grid size and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    /// Rejects empty dimensions, a zero mine count, and a mine count that
    /// would leave no safe cell.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Result<Self> {
        if size_x == 0 || size_y == 0 || mines == 0 || mines >= mult(size_x, size_y) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self {
            size: (size_x, size_y),
            mines,
        })
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub(crate) fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

/// Mine membership for a whole board. Fixed once placed, cleared by reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineGrid {
    mask: Array2<bool>,
    count: CellCount,
}

impl MineGrid {
    /// Grid with no mines, the state before first-click placement.
    pub fn empty(size: Coord2) -> Self {
        Self {
            mask: Array2::default(size.to_nd_index()),
            count: 0,
        }
    }

    pub fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self { mask, count }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mask.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mask[coords.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }
}

/// One cell whose rendering must change after a command.
pub type Delta = (Coord2, CellView);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Marked,
}

impl Default for MarkOutcome {
    fn default() -> Self {
        Self::NoChange
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl Default for RevealOutcome {
    fn default() -> Self {
        Self::NoChange
    }
}

/// Used to merge per-cell outcomes when chording over several neighbors.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of a reveal or chord command: the merged outcome plus every cell
/// whose view changed, so the shell never rescans the whole grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealUpdate {
    pub outcome: RevealOutcome,
    pub changed: Vec<Delta>,
}

/// Result of a toggle-mark command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkUpdate {
    pub outcome: MarkOutcome,
    pub changed: Vec<Delta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new((0, 5), 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((5, 0), 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((3, 3), 0), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::InvalidConfig));
    }

    #[test]
    fn config_accepts_one_free_cell() {
        let config = GameConfig::new((3, 3), 8).unwrap();
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn hit_mine_dominates_outcome_merges() {
        use RevealOutcome::*;
        assert_eq!(HitMine | Won, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(Revealed | NoChange, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
