use std::{cmp::Ordering, collections::VecDeque, num::NonZeroUsize};

use super::GameState;

/// Default number of moves that can be undone.
pub const DEFAULT_UNDO_DEPTH: usize = 1;

/// How many snapshots a [`History`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoDepth {
    /// Nothing is recorded.
    Disabled,
    /// Keeps at most this many snapshots, evicting the oldest first.
    Limited(NonZeroUsize),
    /// Keeps every snapshot.
    Unlimited,
}

impl Default for UndoDepth {
    fn default() -> Self {
        Self::Limited(NonZeroUsize::MIN.saturating_add(DEFAULT_UNDO_DEPTH - 1))
    }
}

impl UndoDepth {
    /// Interprets a signed depth: `0` disables history, negative values mean
    /// unlimited.
    #[must_use]
    pub fn from_depth(depth: i64) -> Self {
        match depth.cmp(&0) {
            Ordering::Less => Self::Unlimited,
            Ordering::Equal => Self::Disabled,
            Ordering::Greater => usize::try_from(depth)
                .ok()
                .and_then(NonZeroUsize::new)
                .map_or(Self::Unlimited, Self::Limited),
        }
    }

    /// Maximum number of snapshots, `None` when unlimited.
    #[must_use]
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Disabled => Some(0),
            Self::Limited(n) => Some(n.get()),
            Self::Unlimited => None,
        }
    }
}

/// Bounded stack of [`GameState`] snapshots.
///
/// The most recent snapshot is on top. Pushing past the configured
/// [`UndoDepth`] drops the oldest entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<GameState>,
    depth: UndoDepth,
}

impl History {
    #[must_use]
    pub fn new(depth: UndoDepth) -> Self {
        Self {
            entries: VecDeque::new(),
            depth,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent snapshot.
    #[must_use]
    pub fn peek(&self) -> Option<&GameState> {
        self.entries.back()
    }

    pub fn push(&mut self, state: GameState) {
        let Some(capacity) = self.depth.capacity() else {
            self.entries.push_back(state);
            return;
        };
        if capacity == 0 {
            return;
        }
        self.entries.push_back(state);
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<GameState> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameStats, Randomizer, Seed};

    fn state(tile: u32) -> GameState {
        let mut board = Board::empty(1, Randomizer::new(Seed::new("HISTORY0").unwrap())).unwrap();
        board.set_cells(&[[tile]]).unwrap();
        GameState::capture(&board, &GameStats::new())
    }

    fn tiles(history: &mut History) -> Vec<u32> {
        std::iter::from_fn(|| history.pop())
            .map(|s| s.cells()[0])
            .collect()
    }

    #[test]
    fn test_from_depth() {
        assert_eq!(UndoDepth::from_depth(0), UndoDepth::Disabled);
        assert_eq!(UndoDepth::from_depth(-1), UndoDepth::Unlimited);
        assert_eq!(UndoDepth::from_depth(i64::MIN), UndoDepth::Unlimited);
        assert_eq!(
            UndoDepth::from_depth(3),
            UndoDepth::Limited(NonZeroUsize::new(3).unwrap())
        );
        assert_eq!(UndoDepth::default().capacity(), Some(DEFAULT_UNDO_DEPTH));
    }

    #[test]
    fn test_limited_evicts_oldest() {
        let mut history = History::new(UndoDepth::from_depth(2));
        for tile in [2, 4, 8, 16] {
            history.push(state(tile));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek().unwrap().cells(), [16]);
        assert_eq!(tiles(&mut history), [16, 8]);
    }

    #[test]
    fn test_disabled_keeps_nothing() {
        let mut history = History::new(UndoDepth::Disabled);
        history.push(state(2));
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_unlimited_keeps_everything() {
        let mut history = History::new(UndoDepth::Unlimited);
        for i in 1..=100 {
            history.push(state(2 << (i % 20)));
        }
        assert_eq!(history.len(), 100);
        history.clear();
        assert!(history.is_empty());
    }
}
