use tracing::{debug, info};

use crate::{
    BoardError, GameOverError,
    core::{Board, Direction, MoveResult, Randomizer, Seed},
};

use super::{GameState, GameStats, History, UndoDepth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Lost,
}

/// Options fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many moves can be undone.
    pub undo_depth: UndoDepth,
    /// Whether undone moves can be redone.
    pub allow_redo: bool,
    /// Start (and restart) with the win notification already consumed.
    pub endless: bool,
}

/// What happened during [`GameSession::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnOutcome {
    /// Nothing could slide or merge; the session is unchanged.
    Invalid,
    /// A tile was spawned and play continues.
    Moved(MoveResult),
    /// The first winning tile appeared. Play continues in endless mode.
    Won(MoveResult),
    /// No move is possible any more.
    Lost {
        result: MoveResult,
        /// The same move also produced the first winning tile.
        won: bool,
    },
}

impl TurnOutcome {
    #[must_use]
    pub fn move_result(self) -> MoveResult {
        match self {
            Self::Invalid => MoveResult::Invalid,
            Self::Moved(result) | Self::Won(result) | Self::Lost { result, .. } => result,
        }
    }
}

/// A game from first tile to last move.
///
/// The session owns the [`Board`] (and through it the randomizer), the running
/// [`GameStats`], and the undo/redo histories.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    stats: GameStats,
    undo_history: History,
    redo_history: History,
    config: SessionConfig,
    session_state: SessionState,
    won_notified: bool,
}

fn state_of(board: &Board) -> SessionState {
    if board.has_moves() {
        SessionState::Playing
    } else {
        SessionState::Lost
    }
}

impl GameSession {
    /// Starts a session on an existing board.
    #[must_use]
    pub fn new(board: Board, config: SessionConfig) -> Self {
        Self {
            session_state: state_of(&board),
            board,
            stats: GameStats::new(),
            undo_history: History::new(config.undo_depth),
            redo_history: History::new(config.undo_depth),
            config,
            won_notified: config.endless,
        }
    }

    /// Starts a session on a fresh `size`×`size` board built from `seed`.
    pub fn with_seed(size: usize, seed: Seed, config: SessionConfig) -> Result<Self, BoardError> {
        Ok(Self::new(Board::new(size, Randomizer::new(seed))?, config))
    }

    /// Like [`Self::with_seed`], but with a random seed.
    pub fn random(size: usize, config: SessionConfig) -> Result<Self, BoardError> {
        Self::with_seed(size, Seed::random(), config)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.board.seed()
    }

    /// Returns `true` once the win has been announced (or the session started
    /// in endless mode).
    #[must_use]
    pub fn is_won_notified(&self) -> bool {
        self.won_notified
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_history.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_history.len()
    }

    /// Captures the current board and counters.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        GameState::capture(&self.board, &self.stats)
    }

    /// Plays one turn: squash, spawn a tile, then check for win and loss.
    ///
    /// Returns [`TurnOutcome::Invalid`] without touching anything when the board
    /// cannot move in `direction`.
    pub fn apply_move(&mut self, direction: Direction) -> Result<TurnOutcome, GameOverError> {
        if !self.session_state.is_playing() {
            return Err(GameOverError);
        }

        let before = self.snapshot();
        let result = self.board.squash(direction);
        if result.is_invalid() {
            return Ok(TurnOutcome::Invalid);
        }

        if self
            .undo_history
            .peek()
            .is_none_or(|top| top.cells() != before.cells())
        {
            self.undo_history.push(before);
        }
        self.stats.record_move(result);
        self.redo_history.clear();

        if !self.board.place_random() {
            return Ok(self.lose(result, false));
        }

        let won = !self.won_notified && self.board.is_won();
        if won {
            self.won_notified = true;
            info!(moves = self.stats.total_moves(), "winning tile reached");
        }

        if !self.board.has_moves() {
            return Ok(self.lose(result, won));
        }
        if won {
            return Ok(TurnOutcome::Won(result));
        }
        Ok(TurnOutcome::Moved(result))
    }

    fn lose(&mut self, result: MoveResult, won: bool) -> TurnOutcome {
        self.session_state = SessionState::Lost;
        info!(
            moves = self.stats.total_moves(),
            score = self.stats.score(),
            "no moves left"
        );
        TurnOutcome::Lost { result, won }
    }

    /// Restores the most recent undo snapshot.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(state) = self.undo_history.pop() else {
            return false;
        };
        if self.config.allow_redo {
            self.redo_history.push(self.snapshot());
        }
        self.restore(&state);
        debug!(remaining = self.undo_history.len(), "undo");
        true
    }

    /// Re-applies the most recently undone move.
    ///
    /// Returns `false` when redo is disabled or there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.config.allow_redo {
            return false;
        }
        let Some(state) = self.redo_history.pop() else {
            return false;
        };
        self.undo_history.push(self.snapshot());
        self.restore(&state);
        debug!(remaining = self.redo_history.len(), "redo");
        true
    }

    /// # Panics
    ///
    /// Panics if `state` was captured from a board of another size. Histories
    /// are cleared whenever the board is replaced, so this never happens.
    fn restore(&mut self, state: &GameState) {
        self.board
            .set_flat_cells(state.cells())
            .expect("snapshot taken from this session's board");
        self.stats = *state.stats();
        self.session_state = state_of(&self.board);
    }

    /// Starts over on a board of the same size with a fresh random seed.
    pub fn restart(&mut self) {
        self.replace_board(self.board.size(), Seed::random());
        info!(seed = %self.seed(), "restarted");
    }

    /// Starts over on a `size`×`size` board, keeping the seed.
    pub fn resize(&mut self, size: usize) -> Result<(), BoardError> {
        let board = Board::new(size, Randomizer::new(self.seed()))?;
        self.reset(board);
        info!(size, "resized");
        Ok(())
    }

    /// Starts over from `seed`, keeping the board size.
    pub fn reseed(&mut self, seed: Seed) {
        self.replace_board(self.board.size(), seed);
        info!(%seed, "reseeded");
    }

    fn replace_board(&mut self, size: usize, seed: Seed) {
        let board =
            Board::new(size, Randomizer::new(seed)).expect("current board size is non-zero");
        self.reset(board);
    }

    fn reset(&mut self, board: Board) {
        self.session_state = state_of(&board);
        self.board = board;
        self.stats = GameStats::new();
        self.undo_history.clear();
        self.redo_history.clear();
        self.won_notified = self.config.endless;
    }
}
