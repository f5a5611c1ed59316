pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {seed:?}: expected 8 characters from 0-9 and A-Z")]
pub struct InvalidSeedError {
    seed: String,
}

impl InvalidSeedError {
    pub(crate) fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_owned(),
        }
    }

    /// The rejected input, after whitespace stripping.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board size must be at least 1")]
    ZeroSize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardStateError {
    #[display("board state has a line of length {found}, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[display("tile {value} at ({row}, {column}) is not a power of two")]
    InvalidTile {
        row: usize,
        column: usize,
        value: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("the game is over; restart or undo before moving")]
pub struct GameOverError;
