use serde::{Deserialize, Serialize};

/// Direction in which every tile on the board is squashed.
///
/// The engine only accepts these symbolic values; turning keystrokes into a
/// `Direction` is the front end's job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
pub enum Direction {
    /// Columns, merging toward row 0.
    #[display("NORTH")]
    North,
    /// Columns, merging toward the last row.
    #[display("SOUTH")]
    South,
    /// Rows, merging toward the last column.
    #[display("EAST")]
    East,
    /// Rows, merging toward column 0.
    #[display("WEST")]
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns `true` if this direction squashes columns rather than rows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Returns `true` if tiles travel toward index 0 of their line.
    #[must_use]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::North | Self::West)
    }

    /// Maps the `offset`-th cell (counted from the destination edge) of the
    /// `line`-th row or column to its row-major index.
    pub(crate) const fn cell_index(self, size: usize, line: usize, offset: usize) -> usize {
        let position = if self.is_leading() {
            offset
        } else {
            size - 1 - offset
        };
        if self.is_vertical() {
            position * size + line
        } else {
            line * size + position
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_travel_order() {
        // 3x3 board, second line
        let order = |dir: Direction| (0..3).map(|i| dir.cell_index(3, 1, i)).collect::<Vec<_>>();
        assert_eq!(order(Direction::West), [3, 4, 5]);
        assert_eq!(order(Direction::East), [5, 4, 3]);
        assert_eq!(order(Direction::North), [1, 4, 7]);
        assert_eq!(order(Direction::South), [7, 4, 1]);
    }

    #[test]
    fn test_display_uses_compass_names() {
        let names: Vec<_> = Direction::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["NORTH", "SOUTH", "EAST", "WEST"]);
    }
}
