use serde::{Deserialize, Serialize};

use crate::Board;

use super::GameStats;

/// Snapshot of a game at one point in time.
///
/// Holds a deep copy of the board's cells and the counters as they were when the
/// snapshot was taken. Used by [`GameSession`](super::GameSession) for undo and
/// redo; the randomizer position is not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    size: usize,
    cells: Box<[u32]>,
    stats: GameStats,
}

impl GameState {
    #[must_use]
    pub fn capture(board: &Board, stats: &GameStats) -> Self {
        Self {
            size: board.size(),
            cells: board.cells().into(),
            stats: *stats,
        }
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveResult, Randomizer, Seed};

    fn board() -> Board {
        let mut board = Board::empty(2, Randomizer::new(Seed::new("SNAPSHOT").unwrap())).unwrap();
        board.set_cells(&[[2, 0], [4, 8]]).unwrap();
        board
    }

    #[test]
    fn test_capture_is_deep_copy() {
        let mut board = board();
        let state = GameState::capture(&board, &GameStats::new());

        board.place_random();
        assert_ne!(state.cells(), board.cells());
        assert_eq!(state.cells(), [2, 0, 4, 8]);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut stats = GameStats::new();
        stats.record_move(MoveResult::Valid {
            merge_count: 3,
            merge_value: 24,
        });
        let state = GameState::capture(&board(), &stats);

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"size\":2"), "{json}");
        assert!(json.contains("\"cells\":[2,0,4,8]"), "{json}");

        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.stats(), &stats);
    }
}
