use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::to_index;
use crate::{neighbors, Cell, CellCount, Coord, Coord2, GameConfig, GameError, MinePlacer, Result};

/// Outcome of a reveal command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing changed: out of bounds, already revealed, or flagged.
    NoChange,
    /// The newly revealed coordinates, flood fill included.
    Revealed(Vec<Coord2>),
    /// A mine was revealed and the game is lost.
    MineHit,
}

impl RevealOutcome {
    /// Whether this outcome changed any cell state.
    pub fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// The grid of cells. Exclusive owner of all cell state; callers only ever
/// see copies through [`Board::cell_at`].
///
/// Lifecycle: [`Board::new`] (blank) -> [`Board::place_mines`] exactly once
/// -> [`Board::compute_adjacency`] -> play. [`Board::with_mines`] runs the
/// whole setup in one call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    mines_placed: bool,
}

impl Board {
    pub fn new(config: GameConfig) -> Result<Self> {
        // Configs built by hand or deserialized may bypass GameConfig::new.
        let config = GameConfig::new(config.height, config.width, config.mines)?;
        Ok(Self {
            grid: Array2::default((config.height as usize, config.width as usize)),
            config,
            revealed_count: 0,
            flagged_count: 0,
            mines_placed: false,
        })
    }

    /// Builds a board ready to play: mines placed and adjacency computed.
    pub fn with_mines(config: GameConfig, placer: impl MinePlacer) -> Result<Self> {
        let mut board = Self::new(config)?;
        board.place_mines(placer)?;
        board.compute_adjacency();
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet. Negative when the player
    /// has planted more flags than there are mines.
    pub fn mines_left(&self) -> i64 {
        self.config.mines as i64 - self.flagged_count as i64
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        row < self.config.height && col < self.config.width
    }

    /// Read-only snapshot of one cell, `None` when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.in_bounds(coords).then(|| self.grid[to_index(coords)])
    }

    /// Marks the placer's cells as mines. Must run exactly once per board,
    /// before [`Board::compute_adjacency`].
    pub fn place_mines(&mut self, placer: impl MinePlacer) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let coords = placer.place(&self.config);
        let mut placed: CellCount = 0;
        for &(row, col) in &coords {
            if !self.in_bounds((row, col)) {
                return Err(GameError::MineOutOfBounds(row, col));
            }
            let cell = &mut self.grid[to_index((row, col))];
            if !cell.mine {
                cell.mine = true;
                placed += 1;
            }
        }
        if placed != self.config.mines {
            return Err(GameError::MineCountMismatch {
                expected: self.config.mines,
                actual: placed,
            });
        }

        self.mines_placed = true;
        Ok(())
    }

    /// Recomputes every non-mine cell's adjacent mine count. Idempotent,
    /// intended to run once after [`Board::place_mines`].
    pub fn compute_adjacency(&mut self) {
        let bounds = self.config.size();
        for row in 0..self.config.height {
            for col in 0..self.config.width {
                if self.grid[to_index((row, col))].mine {
                    continue;
                }
                let count = neighbors((row, col), bounds)
                    .filter(|&pos| self.grid[to_index(pos)].mine)
                    .count() as u8;
                self.grid[to_index((row, col))].adjacent_mines = count;
            }
        }
    }

    /// Reveals a cell. A zero-adjacency cell cascades through its whole
    /// 8-connected zero region plus the nonzero border, using an explicit
    /// work list so the depth never depends on board size.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.in_bounds(coords) {
            return RevealOutcome::NoChange;
        }
        let cell = self.grid[to_index(coords)];
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoChange;
        }

        self.grid[to_index(coords)].revealed = true;
        if cell.mine {
            log::debug!("mine hit at {:?}", coords);
            return RevealOutcome::MineHit;
        }

        self.revealed_count += 1;
        let mut opened = vec![coords];

        if cell.adjacent_mines == 0 {
            // The revealed flag doubles as the visited guard, so no cell
            // enters the frontier twice.
            let bounds = self.config.size();
            let mut frontier = VecDeque::from([coords]);
            while let Some(from) = frontier.pop_front() {
                for pos in neighbors(from, bounds) {
                    let cell = &mut self.grid[to_index(pos)];
                    if cell.revealed || cell.flagged {
                        continue;
                    }
                    debug_assert!(!cell.mine, "zero-adjacency cell next to a mine");
                    cell.revealed = true;
                    let adjacent = cell.adjacent_mines;
                    self.revealed_count += 1;
                    opened.push(pos);
                    log::trace!("flood fill opened {:?}, adjacent mines {}", pos, adjacent);
                    if adjacent == 0 {
                        frontier.push_back(pos);
                    }
                }
            }
        }

        RevealOutcome::Revealed(opened)
    }

    /// Flips the flag on a hidden cell. No-op on out-of-bounds or revealed
    /// cells.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.in_bounds(coords) {
            return FlagOutcome::NoChange;
        }
        let cell = &mut self.grid[to_index(coords)];
        if cell.revealed {
            return FlagOutcome::NoChange;
        }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        FlagOutcome::Changed
    }

    /// Win condition: every non-mine cell revealed.
    pub fn is_fully_cleared(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    /// Row-major coordinates of every mine, for the loss reveal sweep.
    pub fn mine_coordinates(&self) -> Vec<Coord2> {
        let mut coords = Vec::with_capacity(self.config.mines as usize);
        for row in 0..self.config.height {
            for col in 0..self.config.width {
                if self.grid[to_index((row, col))].mine {
                    coords.push((row, col));
                }
            }
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedPlacer, RandomPlacer};

    fn board(height: Coord, width: Coord, mines: &[Coord2]) -> Board {
        let config = GameConfig::new(height, width, mines.len() as CellCount).unwrap();
        Board::with_mines(config, FixedPlacer(mines.to_vec())).unwrap()
    }

    #[test]
    fn adjacency_counts_every_neighboring_mine() {
        let board = board(3, 3, &[(1, 1)]);
        for row in 0..3 {
            for col in 0..3 {
                let cell = board.cell_at((row, col)).unwrap();
                if (row, col) == (1, 1) {
                    assert!(cell.is_mine());
                } else {
                    assert_eq!(cell.adjacent_mines(), 1);
                }
            }
        }
    }

    #[test]
    fn adjacency_is_exact_for_random_placement() {
        let config = GameConfig::default();
        let board = Board::with_mines(config, RandomPlacer::new(42)).unwrap();

        assert_eq!(board.mine_coordinates().len(), 100);
        for row in 0..board.height() {
            for col in 0..board.width() {
                let cell = board.cell_at((row, col)).unwrap();
                if cell.is_mine() {
                    continue;
                }
                let expected = neighbors((row, col), board.size())
                    .filter(|&pos| board.cell_at(pos).unwrap().is_mine())
                    .count() as u8;
                assert_eq!(cell.adjacent_mines(), expected);
            }
        }
    }

    #[test]
    fn reveal_out_of_bounds_is_a_no_op() {
        let mut board = board(3, 3, &[(0, 0)]);
        assert_eq!(board.reveal((3, 0)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((0, 99)), RevealOutcome::NoChange);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn reveal_of_a_mine_reports_the_hit() {
        let mut board = board(3, 3, &[(0, 0)]);
        assert_eq!(board.reveal((0, 0)), RevealOutcome::MineHit);
        assert!(board.cell_at((0, 0)).unwrap().is_revealed());
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn reveal_is_monotonic_and_idempotent() {
        let mut board = board(3, 3, &[(0, 0)]);
        let first = board.reveal((2, 2));
        assert!(first.has_update());
        let count = board.revealed_count();
        assert_eq!(board.reveal((2, 2)), RevealOutcome::NoChange);
        assert_eq!(board.revealed_count(), count);
    }

    #[test]
    fn flood_fill_opens_the_whole_zero_region_and_its_border() {
        // Mine at one end of a strip: (0,1) and (0,3) count 1, the rest 0.
        let mut board = board(1, 5, &[(0, 2)]);

        let RevealOutcome::Revealed(opened) = board.reveal((0, 0)) else {
            panic!("expected a reveal");
        };
        let mut opened = opened;
        opened.sort_unstable();
        assert_eq!(opened, vec![(0, 0), (0, 1)]);
        assert!(board.cell_at((0, 3)).unwrap().is_untouched());
        assert!(board.cell_at((0, 4)).unwrap().is_untouched());
    }

    #[test]
    fn flood_fill_cascade_clears_a_sparse_board_in_one_reveal() {
        // Spec scenario: 4x4, single mine at (0,0), revealing the far
        // corner opens all 15 safe cells.
        let mut board = board(4, 4, &[(0, 0)]);

        let RevealOutcome::Revealed(opened) = board.reveal((3, 3)) else {
            panic!("expected a reveal");
        };
        assert_eq!(opened.len(), 15);
        assert!(board.is_fully_cleared());
        assert!(!board.cell_at((0, 0)).unwrap().is_revealed());
        assert_eq!(board.cell_at((1, 1)).unwrap().adjacent_mines(), 1);
    }

    #[test]
    fn flood_fill_does_not_open_flagged_cells() {
        let mut board = board(4, 4, &[(0, 0)]);
        assert_eq!(board.toggle_flag((2, 2)), FlagOutcome::Changed);

        board.reveal((3, 3));

        assert!(board.cell_at((2, 2)).unwrap().is_flagged());
        assert!(!board.cell_at((2, 2)).unwrap().is_revealed());
        assert!(!board.is_fully_cleared());
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut board = board(3, 3, &[(0, 0)]);
        board.toggle_flag((1, 1));

        assert_eq!(board.reveal((1, 1)), RevealOutcome::NoChange);
        let cell = board.cell_at((1, 1)).unwrap();
        assert!(cell.is_flagged());
        assert!(!cell.is_revealed());
    }

    #[test]
    fn flag_toggle_flips_and_tracks_the_count() {
        let mut board = board(3, 3, &[(0, 0)]);
        assert_eq!(board.toggle_flag((1, 1)), FlagOutcome::Changed);
        assert_eq!(board.flagged_count(), 1);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((1, 1)), FlagOutcome::Changed);
        assert_eq!(board.flagged_count(), 0);
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn flag_on_a_revealed_cell_is_a_no_op() {
        let mut board = board(3, 3, &[(0, 0)]);
        board.reveal((2, 2));
        assert_eq!(board.toggle_flag((2, 2)), FlagOutcome::NoChange);
        assert!(!board.cell_at((2, 2)).unwrap().is_flagged());
    }

    #[test]
    fn flag_out_of_bounds_is_a_no_op() {
        let mut board = board(3, 3, &[(0, 0)]);
        assert_eq!(board.toggle_flag((9, 9)), FlagOutcome::NoChange);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn fully_cleared_needs_every_safe_cell() {
        let mut board = board(2, 2, &[(0, 0)]);
        board.reveal((0, 1));
        board.reveal((1, 0));
        assert!(!board.is_fully_cleared());
        board.reveal((1, 1));
        assert!(board.is_fully_cleared());
    }

    #[test]
    fn mine_coordinates_are_stable_and_row_major() {
        let board = board(3, 3, &[(2, 0), (0, 1)]);
        assert_eq!(board.mine_coordinates(), vec![(0, 1), (2, 0)]);
        assert_eq!(board.mine_coordinates(), board.mine_coordinates());
    }

    #[test]
    fn second_mine_placement_is_rejected() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut board = Board::with_mines(config, FixedPlacer(vec![(0, 0)])).unwrap();
        assert_eq!(
            board.place_mines(FixedPlacer(vec![(1, 1)])),
            Err(GameError::MinesAlreadyPlaced)
        );
    }

    #[test]
    fn placer_coordinates_outside_the_board_are_rejected() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        assert_eq!(
            Board::with_mines(config, FixedPlacer(vec![(5, 5)])).unwrap_err(),
            GameError::MineOutOfBounds(5, 5)
        );
    }

    #[test]
    fn duplicate_placer_coordinates_are_rejected() {
        let config = GameConfig::new(3, 3, 2).unwrap();
        assert_eq!(
            Board::with_mines(config, FixedPlacer(vec![(1, 1), (1, 1)])).unwrap_err(),
            GameError::MineCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }
}
