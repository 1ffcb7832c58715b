use crate::error::ReversiError;

pub const DEFAULT_SIDE: usize = 8;
pub const MIN_SIDE: usize = 4;
pub const MAX_SIDE: usize = 16;

/// Validated board size for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// Accepts even sides in `MIN_SIDE..=MAX_SIDE`. When both sides are bad
    /// the error names both.
    pub fn new(width: usize, height: usize) -> Result<Self, ReversiError> {
        match (is_valid_side(width), is_valid_side(height)) {
            (true, true) => Ok(Self { width, height }),
            (false, true) => Err(ReversiError::InvalidWidth(width)),
            (true, false) => Err(ReversiError::InvalidHeight(height)),
            (false, false) => Err(ReversiError::InvalidSize { width, height }),
        }
    }

    /// Like [`Dimensions::new`], but a zero side means "not supplied" and
    /// falls back to the default.
    pub fn from_request(width: usize, height: usize) -> Result<Self, ReversiError> {
        Self::new(or_default(width), or_default(height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDE,
            height: DEFAULT_SIDE,
        }
    }
}

fn is_valid_side(side: usize) -> bool {
    (MIN_SIDE..=MAX_SIDE).contains(&side) && side % 2 == 0
}

fn or_default(side: usize) -> usize {
    if side == 0 { DEFAULT_SIDE } else { side }
}
