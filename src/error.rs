/// Errors surfaced by the configuration, snapshot and session layers.
///
/// The rules engine itself reports rejected moves with `false`; these
/// variants only appear where a caller needs a message to show.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ReversiError {
    #[error("Width must be an even number between 4 and 16 (got {0}).")]
    InvalidWidth(usize),

    #[error("Height must be an even number between 4 and 16 (got {0}).")]
    InvalidHeight(usize),

    #[error(
        "Width must be an even number between 4 and 16 (got {width}). \
         Height must be an even number between 4 and 16 (got {height})."
    )]
    InvalidSize { width: usize, height: usize },

    #[error("That move is not legal. ({x}, {y})")]
    IllegalMove { x: i32, y: i32 },

    #[error("The game has been conceded.")]
    GameConceded,

    #[error("snapshot holds {actual} cells, expected {expected}")]
    SnapshotSize { expected: usize, actual: usize },

    #[error("snapshot dimensions must be non-zero")]
    SnapshotDimensions,

    #[error("snapshot has no player to move")]
    SnapshotTurn,
}
