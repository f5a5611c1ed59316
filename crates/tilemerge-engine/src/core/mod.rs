//! Board-level data structures: the tile grid, its squash algorithm, and the
//! seeded randomizer that feeds tile placement.

pub use self::{board::*, direction::*, move_result::*, randomizer::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod move_result;
pub(crate) mod randomizer;
