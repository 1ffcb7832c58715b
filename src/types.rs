use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of one board cell. Also used to name whose turn it is.
///
/// `White` is the first player's colour in the opening layout, `Black`
/// moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Black = 1,
    White = 2,
}

impl CellState {
    pub const ALL: [CellState; 3] = [CellState::Empty, CellState::Black, CellState::White];

    /// The opposing colour. `Empty` maps to itself.
    pub fn complement(self) -> Self {
        match self {
            CellState::Empty => CellState::Empty,
            CellState::Black => CellState::White,
            CellState::White => CellState::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellState::Empty => "BLANK",
            CellState::Black => "BLACK",
            CellState::White => "WHITE",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// View of a game for the front end: grid, scores, turn and move hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub current_player: u8,
    pub white_count: usize,
    pub black_count: usize,
    pub is_game_over: bool,
    pub is_conceded: bool,
    /// Cells where the player to move may legally play.
    pub legal_moves: Vec<Position>,
}

/// Score summary. `winner` is 0 on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub white_count: usize,
    pub black_count: usize,
}

/// Everything needed to rebuild a game: the grid, the colour placed last
/// (or skipped), and whether someone conceded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellState>,
    pub last_placed: CellState,
    pub forced_end: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_is_an_involution_for_players() {
        for player in [CellState::Black, CellState::White] {
            assert_ne!(player.complement(), player);
            assert_eq!(player.complement().complement(), player);
        }
        assert_eq!(CellState::Empty.complement(), CellState::Empty);
    }

    #[test]
    fn wire_values_match_front_end_encoding() {
        assert_eq!(CellState::Empty as u8, 0);
        assert_eq!(CellState::Black as u8, 1);
        assert_eq!(CellState::White as u8, 2);
        assert_eq!(CellState::White.to_string(), "WHITE");
    }
}
