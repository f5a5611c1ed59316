use std::fmt;

use crate::{BoardError, BoardStateError};

use super::{
    direction::Direction,
    move_result::MoveResult,
    randomizer::{Randomizer, Seed},
};

/// Default board width and height.
pub const DEFAULT_SIZE: usize = 4;

/// A placement draw at or above this threshold spawns a 4, anything below a 2.
pub const FOUR_THRESHOLD: f64 = 0.4;

/// Reaching a tile of at least this value wins the game.
pub const WIN_TILE: u32 = 2048;

/// Square grid of tiles and the squash algorithm that moves them.
///
/// Cells hold `0` when empty and a power of two otherwise. The board owns the
/// [`Randomizer`] used for tile placement, so a board built from a given seed
/// always spawns the same tiles in response to the same moves.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, Direction, Randomizer};
///
/// let mut board = Board::empty(4, Randomizer::new("EXAMPLE1".parse().unwrap())).unwrap();
/// board.set_cells(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
///
/// let result = board.squash(Direction::West);
/// assert_eq!(result.merge_count(), 1);
/// assert_eq!(result.merge_value(), 4);
/// assert_eq!(board.get(0, 0), 4);
///
/// // Squashing never spawns a tile by itself.
/// assert!(board.place_random());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
    randomizer: Randomizer,
}

/// Value of the tile produced by merging `a` into `b`, if they can merge.
///
/// Tiles already at `1 << 31` cannot grow further and never merge.
fn merged_tile(a: u32, b: u32) -> Option<u32> {
    if a == b && a != 0 {
        a.checked_mul(2)
    } else {
        None
    }
}

/// Slides and merges one line oriented so that index 0 is the destination edge.
///
/// Returns the number of merges and the sum of the merged values. Each tile
/// takes part in at most one merge.
fn squash_line(line: &mut Vec<u32>) -> (u32, u64) {
    line.retain(|&v| v != 0);

    let mut merge_count = 0;
    let mut merge_value = 0;
    let mut i = 0;
    while i + 1 < line.len() {
        if let Some(merged) = merged_tile(line[i], line[i + 1]) {
            line[i] = merged;
            line[i + 1] = 0;
            merge_count += 1;
            merge_value += u64::from(merged);
            i += 2;
        } else {
            i += 1;
        }
    }

    line.retain(|&v| v != 0);
    (merge_count, merge_value)
}

fn check_tile(row: usize, column: usize, value: u32) -> Result<(), BoardStateError> {
    if value == 0 || value.is_power_of_two() {
        Ok(())
    } else {
        Err(BoardStateError::InvalidTile { row, column, value })
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn pick_index(draw: f64, len: usize) -> usize {
    ((draw * len as f64) as usize).min(len - 1)
}

impl Board {
    /// Creates a board with one randomly placed tile.
    pub fn new(size: usize, randomizer: Randomizer) -> Result<Self, BoardError> {
        let mut board = Self::empty(size, randomizer)?;
        board.place_random();
        Ok(board)
    }

    /// Creates a board with no tiles.
    pub fn empty(size: usize, randomizer: Randomizer) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
            randomizer,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.randomizer.seed()
    }

    /// Returns the tile at `(row, column)`, `0` when empty.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the board.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> u32 {
        assert!(row < self.size && column < self.size, "cell out of bounds");
        self.cells[row * self.size + column]
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks_exact(self.size)
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Returns `true` if any tile has reached [`WIN_TILE`].
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.cells.iter().any(|&v| v >= WIN_TILE)
    }

    /// Returns `true` if at least one direction would be a valid move.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        if self.cells.contains(&0) {
            return true;
        }
        self.rows()
            .any(|row| row.windows(2).any(|w| merged_tile(w[0], w[1]).is_some()))
            || self
                .cells
                .iter()
                .zip(&self.cells[self.size..])
                .any(|(&above, &below)| merged_tile(above, below).is_some())
    }

    /// Replaces every cell.
    ///
    /// `rows` must describe exactly `size` rows of `size` tiles, each `0` or a
    /// power of two. The board is left untouched on error.
    pub fn set_cells<R>(&mut self, rows: &[R]) -> Result<(), BoardStateError>
    where
        R: AsRef<[u32]>,
    {
        if rows.len() != self.size {
            return Err(BoardStateError::SizeMismatch {
                expected: self.size,
                found: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(self.cells.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != self.size {
                return Err(BoardStateError::SizeMismatch {
                    expected: self.size,
                    found: row.len(),
                });
            }
            for (column, &value) in row.iter().enumerate() {
                check_tile(row_index, column, value)?;
            }
            cells.extend_from_slice(row);
        }
        self.cells = cells;
        Ok(())
    }

    /// Like [`Self::set_cells`], but takes the cells in row-major order.
    pub fn set_flat_cells(&mut self, cells: &[u32]) -> Result<(), BoardStateError> {
        if cells.len() != self.cells.len() {
            return Err(BoardStateError::SizeMismatch {
                expected: self.cells.len(),
                found: cells.len(),
            });
        }
        for (i, &value) in cells.iter().enumerate() {
            check_tile(i / self.size, i % self.size, value)?;
        }
        self.cells.copy_from_slice(cells);
        Ok(())
    }

    /// Slides and merges every line toward the edge named by `direction`.
    ///
    /// This does NOT place a new tile; call [`Self::place_random`] afterwards.
    /// When nothing can slide or merge the board is left as it was and
    /// [`MoveResult::Invalid`] is returned.
    pub fn squash(&mut self, direction: Direction) -> MoveResult {
        let size = self.size;
        let mut next = vec![0; self.cells.len()];
        let mut line = Vec::with_capacity(size);
        let mut merge_count = 0;
        let mut merge_value = 0;

        for index in 0..size {
            line.clear();
            line.extend((0..size).map(|i| self.cells[direction.cell_index(size, index, i)]));

            let (count, value) = squash_line(&mut line);
            merge_count += count;
            merge_value += value;

            for (offset, &tile) in line.iter().enumerate() {
                next[direction.cell_index(size, index, offset)] = tile;
            }
        }

        if merge_count == 0 && next == self.cells {
            tracing::debug!(%direction, "invalid move");
            return MoveResult::Invalid;
        }

        tracing::debug!(%direction, merge_count, merge_value, "squashed board");
        self.cells = next;
        MoveResult::Valid {
            merge_count,
            merge_value,
        }
    }

    /// Places a 2 or a 4 on a random empty cell.
    ///
    /// The first draw picks the value, the second picks the cell among the empty
    /// ones in row-major order. Returns `false`, without drawing, when the
    /// board is full.
    pub fn place_random(&mut self) -> bool {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| (v == 0).then_some(i))
            .collect();
        if empty.is_empty() {
            return false;
        }

        let value = if self.randomizer.next_f64() >= FOUR_THRESHOLD {
            4
        } else {
            2
        };
        let index = empty[pick_index(self.randomizer.next_f64(), empty.len())];
        self.cells[index] = value;

        tracing::debug!(
            value,
            row = index / self.size,
            column = index % self.size,
            "placed tile"
        );
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, &value) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{value:>5}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
