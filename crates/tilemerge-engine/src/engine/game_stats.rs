use serde::{Deserialize, Serialize};

use crate::MoveResult;

/// Running counters of a game.
///
/// - **Score**: sum of every merged tile value
/// - **Total moves**: number of valid moves
/// - **Total merged**: number of merges across all moves
/// - **Merged this turn**: merges performed by the most recent valid move
///
/// # Example
///
/// ```
/// use tilemerge_engine::{GameStats, MoveResult};
///
/// let mut stats = GameStats::new();
/// stats.record_move(MoveResult::Valid { merge_count: 2, merge_value: 12 });
/// stats.record_move(MoveResult::Valid { merge_count: 0, merge_value: 0 });
///
/// assert_eq!(stats.score(), 12);
/// assert_eq!(stats.total_moves(), 2);
/// assert_eq!(stats.total_merged(), 2);
/// assert_eq!(stats.merged_this_turn(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    total_moves: u64,
    total_merged: u64,
    merged_this_turn: u32,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            total_moves: 0,
            total_merged: 0,
            merged_this_turn: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn total_moves(&self) -> u64 {
        self.total_moves
    }

    #[must_use]
    pub const fn total_merged(&self) -> u64 {
        self.total_merged
    }

    #[must_use]
    pub const fn merged_this_turn(&self) -> u32 {
        self.merged_this_turn
    }

    /// Updates the counters after a move.
    ///
    /// Invalid moves are not counted.
    pub fn record_move(&mut self, result: MoveResult) {
        let MoveResult::Valid {
            merge_count,
            merge_value,
        } = result
        else {
            return;
        };
        self.merged_this_turn = merge_count;
        self.total_merged += u64::from(merge_count);
        self.score += merge_value;
        self.total_moves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_is_ignored() {
        let mut stats = GameStats::new();
        stats.record_move(MoveResult::Valid {
            merge_count: 1,
            merge_value: 8,
        });
        let before = stats;
        stats.record_move(MoveResult::Invalid);
        assert_eq!(stats, before);
    }

    #[test]
    fn test_default_is_zeroed() {
        assert_eq!(GameStats::default(), GameStats::new());
    }
}
