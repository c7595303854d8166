use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Session phase. `Fresh` doubles as the "mines not yet placed" marker;
/// the first reveal command moves the board out of it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    Fresh,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// The board engine: one synchronous state machine over a fixed-size grid.
///
/// Commands run to completion and report the cells they touched; callers
/// embedding the board across threads must serialize access themselves.
#[derive(Clone, Debug)]
pub struct Board<P = RandomPlacer> {
    config: GameConfig,
    placer: P,
    mines: MineGrid,
    grid: Array2<CellView>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: BoardState,
}

impl Board<RandomPlacer> {
    /// Board with uniform random mine placement derived from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_placer(config, RandomPlacer::new(seed))
    }
}

impl<P: MinePlacer> Board<P> {
    /// Board with an injected placement source, the deterministic variant
    /// used by tests and replays.
    pub fn with_placer(config: GameConfig, placer: P) -> Self {
        Self {
            config,
            placer,
            mines: MineGrid::empty(config.size()),
            grid: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: BoardState::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, BoardState::Lost)
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn mines_placed(&self) -> bool {
        !self.state.is_fresh()
    }

    /// How many mines have not been flagged yet.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    /// Adjacency count of a cell, known only once it has been revealed.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<Option<u8>> {
        Ok(match self.cell_at(coords)? {
            CellView::Revealed(count) => Some(count),
            _ => None,
        })
    }

    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.mines.contains_mine(coords))
    }

    /// Reveals a hidden or questioned cell, flood-filling zero regions.
    /// The very first reveal of a session places the mines, keeping the
    /// clicked cell and its neighborhood clear.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealUpdate> {
        let coords = self.config.validate_coords(coords)?;
        let mut update = RevealUpdate::default();

        if self.state.is_finished() || !self.grid[coords.to_nd_index()].is_revealable() {
            return Ok(update);
        }

        self.place_mines(coords);
        update.outcome = self.reveal_one(coords, &mut update.changed);
        self.finish(update.outcome, &mut update.changed);
        Ok(update)
    }

    /// Cycles `Hidden -> Flagged -> Questioned -> Hidden`. Revealed cells
    /// and finished games are left untouched.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkUpdate> {
        use CellView::*;

        let coords = self.config.validate_coords(coords)?;
        let mut update = MarkUpdate::default();

        if self.state.is_finished() {
            return Ok(update);
        }

        let next = match self.grid[coords.to_nd_index()] {
            Hidden => {
                self.flagged_count += 1;
                Flagged
            }
            Flagged => {
                self.flagged_count -= 1;
                Questioned
            }
            Questioned => Hidden,
            _ => return Ok(update),
        };

        self.set_view(coords, next, &mut update.changed);
        update.outcome = MarkOutcome::Marked;
        Ok(update)
    }

    /// Opens every unflagged neighbor of a revealed numbered cell whose
    /// flagged-neighbor count matches its number. Every unflagged mine in
    /// the neighborhood detonates at once; anything else is a no-op.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealUpdate> {
        let coords = self.config.validate_coords(coords)?;
        let mut update = RevealUpdate::default();

        if self.state.is_finished() {
            return Ok(update);
        }
        let CellView::Revealed(count) = self.grid[coords.to_nd_index()] else {
            return Ok(update);
        };
        if count == 0 || count != self.count_flagged_neighbors(coords) {
            return Ok(update);
        }

        update.outcome = neighbors(coords, self.size())
            .map(|neighbor_coords| self.reveal_one(neighbor_coords, &mut update.changed))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange);
        self.finish(update.outcome, &mut update.changed);
        Ok(update)
    }

    /// Returns the board to its initial state: all cells hidden, no mines,
    /// next reveal places a new layout. Always succeeds.
    pub fn reset(&mut self) -> Vec<Delta> {
        let mut changed = Vec::new();
        let (size_x, size_y) = self.size();
        for x in 0..size_x {
            for y in 0..size_y {
                self.set_view((x, y), CellView::Hidden, &mut changed);
            }
        }

        self.mines = MineGrid::empty(self.config.size());
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = BoardState::Fresh;
        log::debug!("board reset, {} cells cleared", changed.len());
        changed
    }

    fn place_mines(&mut self, exclude: Coord2) {
        if self.state.is_fresh() {
            self.mines = self.placer.place(self.config, exclude);
            if self.mines.mine_count() != self.config.mines() {
                log::warn!(
                    "placer delivered {} mines, config expects {}",
                    self.mines.mine_count(),
                    self.config.mines()
                );
            }
            self.state = BoardState::Active;
            log::debug!(
                "session started, {} mines placed, opening at {:?}",
                self.mines.mine_count(),
                exclude
            );
        }
    }

    /// Opens a single cell, flood-filling when its adjacency count is zero,
    /// and reports whether it survived, detonated, or completed the board.
    fn reveal_one(&mut self, coords: Coord2, changed: &mut Vec<Delta>) -> RevealOutcome {
        let view = self.grid[coords.to_nd_index()];
        if !view.is_revealable() {
            return RevealOutcome::NoChange;
        }

        if self.mines.contains_mine(coords) {
            self.set_view(coords, CellView::Exploded, changed);
            return RevealOutcome::HitMine;
        }

        let count = self.mines.adjacent_mine_count(coords);
        self.set_view(coords, CellView::Revealed(count), changed);
        self.revealed_count += 1;
        log::debug!("revealed {:?}, adjacent mines: {}", coords, count);

        if count == 0 {
            let bounds = self.size();
            let mut visited = BTreeSet::from([coords]);
            let mut to_visit: VecDeque<_> = neighbors(coords, bounds)
                .filter(|&pos| self.grid[pos.to_nd_index()] == CellView::Hidden)
                .collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }

                // a queued cell may have been opened through another path
                if self.grid[visit_coords.to_nd_index()] != CellView::Hidden {
                    continue;
                }

                let visit_count = self.mines.adjacent_mine_count(visit_coords);
                self.set_view(visit_coords, CellView::Revealed(visit_count), changed);
                self.revealed_count += 1;
                log::trace!("flood revealed {:?}, adjacent mines: {}", visit_coords, visit_count);

                if visit_count == 0 {
                    to_visit.extend(
                        neighbors(visit_coords, bounds)
                            .filter(|&pos| self.grid[pos.to_nd_index()] == CellView::Hidden)
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        if self.revealed_count == self.config.safe_cells() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Applies the terminal transition for a merged outcome, if any.
    fn finish(&mut self, outcome: RevealOutcome, changed: &mut Vec<Delta>) {
        match outcome {
            RevealOutcome::HitMine => {
                self.state = BoardState::Lost;
                self.paint_end(false, changed);
            }
            RevealOutcome::Won => {
                self.state = BoardState::Won;
                self.paint_end(true, changed);
            }
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
    }

    /// End-of-game rendering pass: on a loss, unfound mines and wrong flags
    /// are exposed; on a win, the remaining mines are flagged.
    fn paint_end(&mut self, won: bool, changed: &mut Vec<Delta>) {
        use CellView::*;

        let (size_x, size_y) = self.size();
        for x in 0..size_x {
            for y in 0..size_y {
                let coords = (x, y);
                let view = self.grid[coords.to_nd_index()];
                if self.mines.contains_mine(coords) {
                    if matches!(view, Hidden | Questioned) {
                        if won {
                            self.set_view(coords, Flagged, changed);
                            self.flagged_count += 1;
                        } else {
                            self.set_view(coords, Mine, changed);
                        }
                    }
                } else if view == Flagged {
                    self.set_view(coords, IncorrectFlag, changed);
                }
            }
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.grid[pos.to_nd_index()] == CellView::Flagged)
            .count() as u8
    }

    fn set_view(&mut self, coords: Coord2, view: CellView, changed: &mut Vec<Delta>) {
        let slot = &mut self.grid[coords.to_nd_index()];
        if *slot != view {
            *slot = view;
            changed.push((coords, view));
        }
    }
}
