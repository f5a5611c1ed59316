/// Outcome of a single [`Board::squash`](super::Board::squash).
///
/// An invalid move is a normal result, not an error: nothing could slide or
/// merge, the board is untouched, and the caller should ask for another
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveResult {
    /// Nothing moved and nothing merged.
    Invalid,
    /// At least one tile moved or merged.
    Valid {
        /// Number of merges performed.
        merge_count: u32,
        /// Sum of the tile values produced by those merges.
        merge_value: u64,
    },
}

impl MoveResult {
    /// Number of merges, or 0 for an invalid move.
    #[must_use]
    pub const fn merge_count(self) -> u32 {
        match self {
            Self::Invalid => 0,
            Self::Valid { merge_count, .. } => merge_count,
        }
    }

    /// Sum of merged tile values, or 0 for an invalid move.
    #[must_use]
    pub const fn merge_value(self) -> u64 {
        match self {
            Self::Invalid => 0,
            Self::Valid { merge_value, .. } => merge_value,
        }
    }
}
