use std::fmt;

use crate::error::ReversiError;
use crate::types::CellState;

/// Rectangular grid of cells with per-state counts.
///
/// Cells are row-major and 0-indexed. Mutation is limited to the rules
/// engine in [`crate::game`], so the grid only changes through validated moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    /// Colour of the most recent placement, or of the player whose turn was
    /// skipped.
    last_placed: CellState,
    counts: [usize; 3],
}

impl Board {
    /// Creates an all-empty board.
    ///
    /// Panics if either side is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be positive: {width}x{height}"
        );

        let mut counts = [0; 3];
        counts[CellState::Empty.index()] = width * height;

        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
            last_placed: CellState::Empty,
            counts,
        }
    }

    /// Rebuilds a board from raw row-major cells, recomputing the counts.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<CellState>,
        last_placed: CellState,
    ) -> Result<Self, ReversiError> {
        // coordinates are i32, so each side must fit one
        let max_side = i32::MAX as usize;
        if width == 0 || height == 0 || width > max_side || height > max_side {
            return Err(ReversiError::SnapshotDimensions);
        }
        let Some(expected) = width.checked_mul(height) else {
            return Err(ReversiError::SnapshotDimensions);
        };
        if cells.len() != expected {
            return Err(ReversiError::SnapshotSize {
                expected,
                actual: cells.len(),
            });
        }

        let mut counts = [0; 3];
        for cell in &cells {
            counts[cell.index()] += 1;
        }

        Ok(Self {
            width,
            height,
            cells,
            last_placed,
            counts,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `None` outside the board. Line scans probe one cell past the
    /// edge, so this is not an error.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn is_inside_board(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Raw number of cells holding `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.counts[state.index()]
    }

    pub fn last_placed(&self) -> CellState {
        self.last_placed
    }

    /// The player to move: the complement of the last placed colour.
    pub fn current_player(&self) -> CellState {
        self.last_placed.complement()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Overwrites one cell and records `state` as the last placement.
    ///
    /// Panics when `(x, y)` is outside the board.
    pub(crate) fn set_cell(&mut self, state: CellState, x: i32, y: i32) {
        let Some(idx) = self.index(x, y) else {
            panic!("set_cell outside the board: ({x}, {y})");
        };

        let old = self.cells[idx];
        self.counts[old.index()] -= 1;
        self.cells[idx] = state;
        self.counts[state.index()] += 1;
        self.last_placed = state;
    }

    /// Hands the turn over without placing a piece.
    pub(crate) fn skip_turn(&mut self) {
        self.last_placed = self.last_placed.complement();
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_inside_board(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Game Board; Width = {}; Height = {};",
            self.width, self.height
        )?;
        for row in self.cells.chunks(self.width) {
            f.write_str("\n    |")?;
            for cell in row {
                write!(f, "{cell}|")?;
            }
        }
        f.write_str("\n]")
    }
}
