//! Turn-level game logic built on top of [`Board`](crate::Board).
//!
//! - [`GameSession`] - Applies moves, spawns tiles, detects win/loss, undo/redo
//! - [`GameStats`] - Score and move counters
//! - [`GameState`] - Immutable snapshot of board and counters
//! - [`History`] - Bounded stack of snapshots
//!
//! # Game Flow
//!
//! 1. Build a [`GameSession`] from a seed (or a random one)
//! 2. Feed it a [`Direction`](crate::Direction) per turn with
//!    [`GameSession::apply_move`]
//! 3. Valid moves spawn a tile; invalid moves change nothing
//! 4. Repeat until the session reports [`SessionState::Lost`]
//!
//! # Example
//!
//! ```
//! use tilemerge_engine::{Direction, GameSession, SessionConfig, TurnOutcome};
//!
//! let seed = "PLAY 2048".parse().unwrap();
//! let mut session = GameSession::with_seed(4, seed, SessionConfig::default()).unwrap();
//!
//! for direction in [Direction::West, Direction::North, Direction::East] {
//!     match session.apply_move(direction) {
//!         Ok(TurnOutcome::Invalid) => println!("nothing moved"),
//!         Ok(TurnOutcome::Lost { .. }) | Err(_) => break,
//!         Ok(_) => {}
//!     }
//! }
//!
//! println!("score: {}", session.stats().score());
//! ```

pub use self::{game_session::*, game_state::*, game_stats::*, history::*};

mod game_session;
mod game_state;
mod game_stats;
mod history;
