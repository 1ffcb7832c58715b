use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::error::ReversiError;
use crate::types::{CellState, GameResult, GameState, Position, Snapshot};

/// Every straight line through a cell, scanned in this order.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Reversi rules on top of a [`Board`].
///
/// The board is only mutated through [`Reversi::apply_move`], which places the
/// current player's piece, flips every captured line and passes the turn back
/// when the next player has nothing to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversi {
    board: Board,
    /// Set by [`Reversi::concede`]. No move is legal afterwards.
    forced_end: bool,
}

impl Reversi {
    /// Creates a board and places the four opening pieces in the centre:
    /// white on the main diagonal, black on the other. Black moves first.
    ///
    /// Panics if either side is zero. Sides should be even and at least 2.
    pub fn new(width: usize, height: usize) -> Self {
        let mut board = Board::new(width, height);
        let cx = (width / 2) as i32;
        let cy = (height / 2) as i32;

        board.set_cell(CellState::White, cx - 1, cy - 1);
        board.set_cell(CellState::Black, cx, cy - 1);
        board.set_cell(CellState::Black, cx - 1, cy);
        board.set_cell(CellState::White, cx, cy);

        Self {
            board,
            forced_end: false,
        }
    }

    /// Rebuilds a game from a [`Snapshot`].
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ReversiError> {
        if snapshot.last_placed == CellState::Empty {
            return Err(ReversiError::SnapshotTurn);
        }
        let board = Board::from_cells(
            snapshot.width,
            snapshot.height,
            snapshot.cells,
            snapshot.last_placed,
        )?;
        Ok(Self {
            board,
            forced_end: snapshot.forced_end,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells().to_vec(),
            last_placed: self.board.last_placed(),
            forced_end: self.forced_end,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<CellState> {
        self.board.get_cell(x, y)
    }

    pub fn current_player(&self) -> CellState {
        self.board.current_player()
    }

    pub fn is_conceded(&self) -> bool {
        self.forced_end
    }

    /// Score shown for `player`.
    ///
    /// When the opponent has no pieces left the whole board is credited to
    /// `player`. This also holds when neither colour has pieces.
    pub fn count(&self, player: CellState) -> usize {
        if self.board.count(player.complement()) == 0 {
            self.width() * self.height()
        } else {
            self.board.count(player)
        }
    }

    pub fn white_count(&self) -> usize {
        self.count(CellState::White)
    }

    pub fn black_count(&self) -> usize {
        self.count(CellState::Black)
    }

    /// Whether, starting at `(start_x, start_y)` and stepping by `(dx, dy)`,
    /// there is a run of one or more `ending_with.complement()` cells closed
    /// by an `ending_with` cell, without leaving the board.
    ///
    /// Always false once the game has been conceded.
    pub fn is_legal_line(
        &self,
        ending_with: CellState,
        start_x: i32,
        start_y: i32,
        dx: i32,
        dy: i32,
    ) -> bool {
        if self.forced_end {
            return false;
        }

        let opposite = ending_with.complement();
        let (mut x, mut y) = (start_x, start_y);
        // a line can never be longer than the board
        let max_steps = self.width().max(self.height());

        for _ in 0..max_steps {
            let Some((next_x, next_y)) = step(x, y, dx, dy) else {
                return false;
            };
            if !self.board.is_inside_board(next_x, next_y) {
                return false;
            }
            if self.board.get_cell(x, y) != Some(opposite) {
                return false;
            }
            if self.board.get_cell(next_x, next_y) == Some(ending_with) {
                return true;
            }
            x = next_x;
            y = next_y;
        }

        false
    }

    /// Directions in which placing `piece` at `(x, y)` captures a line,
    /// in [`DIRECTIONS`] order.
    pub fn legal_lines(&self, piece: CellState, x: i32, y: i32) -> Vec<(i32, i32)> {
        DIRECTIONS
            .iter()
            .copied()
            .filter(|&(dx, dy)| self.captures_towards(piece, x, y, dx, dy))
            .collect()
    }

    pub fn is_legal_move(&self, piece: CellState, x: i32, y: i32) -> bool {
        self.board.get_cell(x, y) == Some(CellState::Empty)
            && DIRECTIONS
                .iter()
                .any(|&(dx, dy)| self.captures_towards(piece, x, y, dx, dy))
    }

    /// Line check for a piece placed at `(x, y)`, starting at its neighbour.
    fn captures_towards(&self, piece: CellState, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        step(x, y, dx, dy)
            .is_some_and(|(start_x, start_y)| self.is_legal_line(piece, start_x, start_y, dx, dy))
    }

    /// Plays the current player's piece at `(x, y)`.
    ///
    /// Returns false and leaves the game untouched if the move is illegal.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, x: i32, y: i32) -> bool {
        let piece = self.current_player();

        if self.board.get_cell(x, y) != Some(CellState::Empty) {
            return false;
        }

        let lines = self.legal_lines(piece, x, y);
        if lines.is_empty() {
            return false;
        }

        let mut flipped = 0usize;
        for (dx, dy) in lines {
            self.board.set_cell(piece, x, y);

            // is_legal_line guarantees a `piece` cell closes this ray
            let (mut line_x, mut line_y) = (x + dx, y + dy);
            while self.board.get_cell(line_x, line_y) != Some(piece) {
                self.board.set_cell(piece, line_x, line_y);
                flipped += 1;
                line_x += dx;
                line_y += dy;
            }
        }
        debug!(player = %piece, flipped, "move applied");

        let next = self.current_player();
        if !self.is_move_available(next) {
            debug!(skipped = %next, "no legal move, turn skipped");
            self.board.skip_turn();
        }

        true
    }

    /// Whether `player` can legally play anywhere.
    pub fn is_move_available(&self, player: CellState) -> bool {
        (0..self.height() as i32)
            .any(|y| (0..self.width() as i32).any(|x| self.is_legal_move(player, x, y)))
    }

    /// Row-major list of cells where `player` may legally play.
    pub fn legal_moves(&self, player: CellState) -> Vec<Position> {
        let mut moves = Vec::new();
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                if self.is_legal_move(player, x, y) {
                    moves.push(Position { x, y });
                }
            }
        }
        moves
    }

    /// Always false: ending a stalled game is left to the caller, who can
    /// check [`Reversi::is_move_available`] for the player to move.
    pub fn is_game_over(&self) -> bool {
        false
    }

    /// Ends the game. Every later legality check fails.
    #[instrument(skip(self))]
    pub fn concede(&mut self) {
        self.forced_end = true;
        info!(player = %self.current_player(), "game conceded");
    }

    pub fn to_game_state(&self) -> GameState {
        let current = self.current_player();
        GameState {
            board: self.board.cells().iter().map(|&c| c as u8).collect(),
            width: self.width(),
            height: self.height(),
            current_player: current as u8,
            white_count: self.white_count(),
            black_count: self.black_count(),
            is_game_over: self.is_game_over(),
            is_conceded: self.forced_end,
            legal_moves: self.legal_moves(current),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let white_count = self.white_count();
        let black_count = self.black_count();
        GameResult {
            winner: if white_count > black_count {
                CellState::White as u8
            } else if black_count > white_count {
                CellState::Black as u8
            } else {
                0
            },
            white_count,
            black_count,
        }
    }
}

/// One step along a direction, or `None` when it leaves the `i32` range.
fn step(x: i32, y: i32, dx: i32, dy: i32) -> Option<(i32, i32)> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

impl Default for Reversi {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: CellState = CellState::Black;
    const W: CellState = CellState::White;
    const E: CellState = CellState::Empty;

    /// Builds a game from rows of `B`, `W` and `.` with `to_move` to play.
    fn game_from_rows(rows: &[&str], to_move: CellState) -> Reversi {
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                'B' => B,
                'W' => W,
                _ => E,
            })
            .collect();
        Reversi::from_snapshot(Snapshot {
            width: rows[0].len(),
            height: rows.len(),
            cells,
            last_placed: to_move.complement(),
            forced_end: false,
        })
        .unwrap()
    }

    fn raw_total(game: &Reversi) -> usize {
        CellState::ALL.iter().map(|&s| game.board().count(s)).sum()
    }

    /// Direct transcription of the line rule, used to cross-check the loop.
    fn recursive_line(game: &Reversi, end: CellState, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        !game.is_conceded()
            && game.board().is_inside_board(x + dx, y + dy)
            && game.get_cell(x, y) == Some(end.complement())
            && (game.get_cell(x + dx, y + dy) == Some(end)
                || recursive_line(game, end, x + dx, y + dy, dx, dy))
    }

    #[test]
    fn new_game_places_opening_pieces_and_black_moves_first() {
        let game = Reversi::new(8, 8);

        assert_eq!(game.get_cell(3, 3), Some(W));
        assert_eq!(game.get_cell(4, 3), Some(B));
        assert_eq!(game.get_cell(3, 4), Some(B));
        assert_eq!(game.get_cell(4, 4), Some(W));
        assert_eq!(game.current_player(), B);
        assert_eq!(game.board().count(E), 60);
        assert!(!game.is_game_over());
    }

    #[test]
    fn opening_on_non_square_board_is_centred() {
        let game = Reversi::new(6, 4);

        assert_eq!(game.get_cell(2, 1), Some(W));
        assert_eq!(game.get_cell(3, 1), Some(B));
        assert_eq!(game.get_cell(2, 2), Some(B));
        assert_eq!(game.get_cell(3, 2), Some(W));
    }

    #[test]
    fn opening_legal_moves_for_black() {
        let game = Reversi::new(8, 8);

        assert!(game.is_legal_move(B, 2, 3));
        assert!(!game.is_legal_move(B, 0, 0));
        // occupied
        assert!(!game.is_legal_move(B, 3, 3));
        assert_eq!(
            game.legal_moves(B),
            vec![
                Position { x: 3, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 5, y: 4 },
                Position { x: 4, y: 5 },
            ]
        );
    }

    #[test]
    fn legality_queries_are_repeatable() {
        let game = Reversi::new(8, 8);

        for _ in 0..3 {
            assert!(game.is_legal_move(B, 2, 3));
            assert_eq!(game.legal_lines(B, 2, 3), vec![(1, 0)]);
        }
    }

    #[test]
    fn apply_move_flips_captured_piece() {
        let mut game = Reversi::new(8, 8);

        assert!(game.apply_move(2, 3));

        assert_eq!(game.get_cell(2, 3), Some(B));
        assert_eq!(game.get_cell(3, 3), Some(B));
        assert_eq!(game.get_cell(4, 4), Some(W));
        assert_eq!(game.board().count(B), 4);
        assert_eq!(game.board().count(W), 1);
        assert_eq!(game.current_player(), W);
        assert_eq!(raw_total(&game), 64);
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = Reversi::new(8, 8);
        let before = game.clone();

        assert!(!game.apply_move(0, 0));
        assert!(!game.apply_move(3, 3));
        assert!(!game.apply_move(-1, 4));
        assert!(!game.apply_move(8, 4));

        assert_eq!(game, before);
    }

    #[test]
    fn move_flips_every_captured_line() {
        let mut game = game_from_rows(
            &[
                "B.B.B",
                ".WWW.",
                "BW.WB",
                ".WWW.",
                "B.B.B",
            ],
            B,
        );

        assert_eq!(game.legal_lines(B, 2, 2), DIRECTIONS.to_vec());
        assert!(game.apply_move(2, 2));

        assert_eq!(game.board().count(W), 0);
        assert_eq!(game.board().count(B), 17);
    }

    #[test]
    fn flip_stops_at_first_own_piece() {
        let mut game = game_from_rows(&["..WBWB"], B);

        assert!(game.apply_move(1, 0));

        assert_eq!(game.board().cells(), &[E, B, B, B, W, B]);
    }

    #[test]
    fn line_running_off_the_edge_is_not_legal() {
        let game = game_from_rows(&["..WW"], B);

        assert!(!game.is_legal_line(B, 2, 0, 1, 0));
        assert!(!game.is_legal_move(B, 1, 0));
        // next cell outside the board
        assert!(!game.is_legal_line(B, 3, 0, 1, 0));
        assert!(!game.is_legal_line(B, 0, 0, -1, 0));
    }

    #[test]
    fn coordinates_at_integer_limits_are_not_legal() {
        let game = Reversi::new(8, 8);

        assert!(!game.is_legal_line(B, i32::MAX, 0, 1, 0));
        assert!(!game.is_legal_line(B, 0, i32::MIN, 0, -1));
        assert!(game.legal_lines(B, i32::MAX, 0).is_empty());
        assert!(game.legal_lines(B, i32::MIN, i32::MIN).is_empty());
        assert!(!game.is_legal_move(B, i32::MAX, i32::MAX));
    }

    #[test]
    fn iterative_line_scan_matches_recursive_rule() {
        let mut game = Reversi::new(8, 8);
        let mut positions = vec![game.clone()];
        for (x, y) in [(2, 3), (2, 2), (2, 1), (1, 1)] {
            game.apply_move(x, y);
            positions.push(game.clone());
        }

        for position in &positions {
            for end in CellState::ALL {
                for y in -1..=8 {
                    for x in -1..=8 {
                        for (dx, dy) in DIRECTIONS {
                            assert_eq!(
                                position.is_legal_line(end, x, y, dx, dy),
                                recursive_line(position, end, x, y, dx, dy),
                                "end={end} start=({x}, {y}) dir=({dx}, {dy})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn turn_is_skipped_when_opponent_cannot_move() {
        let mut game = game_from_rows(&["BW.BW..."], B);

        assert!(game.apply_move(2, 0));

        assert_eq!(game.board().cells()[..5], [B, B, B, B, W]);
        assert!(!game.is_move_available(W));
        // pass goes back to black, who can still capture at x=5
        assert_eq!(game.current_player(), B);
        assert_eq!(game.board().last_placed(), W);
        assert!(game.is_legal_move(B, 5, 0));
    }

    #[test]
    fn wiped_out_opponent_credits_whole_board() {
        let mut game = game_from_rows(&["BW......"], B);

        assert!(game.apply_move(2, 0));

        assert_eq!(game.board().count(B), 3);
        assert_eq!(game.board().count(W), 0);
        assert_eq!(game.black_count(), 8);
        assert_eq!(game.white_count(), 0);
        assert_eq!(
            game.to_game_result(),
            GameResult {
                winner: B as u8,
                white_count: 0,
                black_count: 8
            }
        );
    }

    #[test]
    fn empty_board_credits_whole_board_to_both_colours() {
        let game = game_from_rows(&["....", "...."], B);

        assert_eq!(game.black_count(), 8);
        assert_eq!(game.white_count(), 8);
        assert_eq!(game.to_game_result().winner, 0);
    }

    #[test]
    fn concede_makes_every_move_illegal() {
        let mut game = Reversi::new(8, 8);
        game.concede();
        let before = game.clone();

        assert!(game.is_conceded());
        for player in [B, W] {
            assert!(!game.is_move_available(player));
            for y in 0..8 {
                for x in 0..8 {
                    assert!(!game.is_legal_move(player, x, y));
                }
            }
        }
        for y in 0..8 {
            for x in 0..8 {
                assert!(!game.apply_move(x, y));
            }
        }
        assert_eq!(game, before);
    }

    #[test]
    fn counts_stay_consistent_through_a_full_game() {
        let mut game = Reversi::new(6, 6);

        for _ in 0..36 {
            let player = game.current_player();
            let Some(mv) = game.legal_moves(player).first().copied() else {
                break;
            };
            let before = game.board().cells().to_vec();

            assert!(game.apply_move(mv.x, mv.y));
            assert_ne!(game.board().cells(), &before[..]);
            assert_eq!(raw_total(&game), 36);
        }

        assert!(!game.is_game_over());
    }

    #[test]
    fn snapshot_restores_turn_and_concession() {
        let mut game = Reversi::new(4, 4);
        game.apply_move(1, 0);
        game.concede();

        let restored = Reversi::from_snapshot(game.snapshot()).unwrap();

        assert_eq!(restored, game);
        assert!(restored.is_conceded());
        assert_eq!(restored.current_player(), game.current_player());
    }

    #[test]
    fn snapshot_without_player_to_move_is_rejected() {
        let mut snapshot = Reversi::new(4, 4).snapshot();
        snapshot.last_placed = E;

        assert_eq!(
            Reversi::from_snapshot(snapshot),
            Err(ReversiError::SnapshotTurn)
        );
    }

    #[test]
    fn game_state_reports_hints_and_scores() {
        let game = Reversi::new(4, 4);
        let state = game.to_game_state();

        assert_eq!(state.width, 4);
        assert_eq!(state.board.len(), 16);
        assert_eq!(state.board[5], W as u8);
        assert_eq!(state.board[6], B as u8);
        assert_eq!(state.current_player, B as u8);
        assert_eq!((state.white_count, state.black_count), (2, 2));
        assert_eq!(state.legal_moves.len(), 4);
        assert!(!state.is_conceded);
    }
}
