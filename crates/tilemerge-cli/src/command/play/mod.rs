use tilemerge_engine::{GameSession, Seed, SessionConfig, UndoDepth};

use self::{app::App, keymap::KeyMap};

mod app;
mod keymap;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed of the game, 8 characters from 0-9 and A-Z (random if omitted)
    #[clap(long)]
    seed: Option<Seed>,
    /// Width and height of the board
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    size: u16,
    /// Number of moves that can be undone (0 disables undo, negative is unlimited)
    #[clap(long, default_value_t = 1, allow_negative_numbers = true)]
    undo: i64,
    /// Allow undone moves to be redone
    #[clap(long)]
    redo: bool,
    /// Keep playing after reaching 2048 without announcing the win
    #[clap(long)]
    endless: bool,
    /// Steer with WASD/IJKL instead of UDRL and the keypad
    #[clap(long)]
    wasd: bool,
    /// Hide the statistics panel
    #[clap(long)]
    no_stats: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        size,
        undo,
        redo,
        endless,
        wasd,
        no_stats,
    } = arg;

    let config = SessionConfig {
        undo_depth: UndoDepth::from_depth(*undo),
        allow_redo: *redo,
        endless: *endless,
    };
    let size = usize::from(*size);
    let session = match seed {
        Some(seed) => GameSession::with_seed(size, *seed, config)?,
        None => GameSession::random(size, config)?,
    };
    tracing::info!(seed = %session.seed(), size, ?config, "starting game");

    let keymap = if *wasd { KeyMap::Wasd } else { KeyMap::Legacy };
    let mut app = App::new(session, keymap, !*no_stats);

    ratatui::run(|terminal| app.run(terminal))?;

    let stats = app.session().stats();
    println!(
        "Quitting after {} moves. You managed to merge {} cells for a score of {}",
        stats.total_moves(),
        stats.total_merged(),
        stats.score()
    );
    println!("Seed: {:#}", app.session().seed());

    Ok(())
}
