use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Padding},
};
use tilemerge_engine::{Direction, GameOverError, GameSession, TurnOutcome, UndoDepth};

use crate::view::widgets::{
    BoardDisplay, KeyBinding, KeyBindingDisplay, Popup, StatsDisplay, style,
};

use super::keymap::KeyMap;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
enum Screen {
    #[default]
    Playing,
    Help,
    Won,
    Exiting,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
enum Status {
    #[display("{_0}")]
    Info(String),
    #[display("{_0}")]
    Warning(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Undo,
    Redo,
    Restart,
    Help,
    Quit,
}

#[derive(Debug)]
pub struct App {
    session: GameSession,
    keymap: KeyMap,
    show_stats: bool,
    screen: Screen,
    status: Option<Status>,
    help_bindings: Vec<KeyBinding>,
    footer_bindings: Vec<KeyBinding>,
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "Up",
        Direction::South => "Down",
        Direction::East => "Right",
        Direction::West => "Left",
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "↑",
        Direction::South => "↓",
        Direction::East => "→",
        Direction::West => "←",
    }
}

fn control_bindings(allow_redo: bool) -> Vec<KeyBinding> {
    let mut bindings = vec![(vec!["z".to_owned()], "Undo")];
    if allow_redo {
        bindings.push((vec!["y".to_owned()], "Redo"));
    }
    bindings.extend([
        (vec!["n".to_owned()], "New game"),
        (vec!["h".to_owned(), "?".to_owned()], "Help"),
        (vec!["q".to_owned()], "Quit"),
    ]);
    bindings
}

impl App {
    pub fn new(session: GameSession, keymap: KeyMap, show_stats: bool) -> Self {
        let controls = control_bindings(session.config().allow_redo);
        let mut help_bindings: Vec<KeyBinding> = Direction::ALL
            .into_iter()
            .map(|direction| {
                let keys = keymap
                    .keys(direction)
                    .iter()
                    .map(char::to_string)
                    .chain([arrow(direction).to_owned()])
                    .collect();
                (keys, direction_name(direction))
            })
            .collect();
        help_bindings.extend(controls.iter().cloned());

        Self {
            session,
            keymap,
            show_stats,
            screen: Screen::default(),
            status: None,
            help_bindings,
            footer_bindings: controls,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.screen.is_exiting() {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn command(&self, code: KeyCode) -> Option<Command> {
        let command = match code {
            KeyCode::Up => Command::Move(Direction::North),
            KeyCode::Down => Command::Move(Direction::South),
            KeyCode::Right => Command::Move(Direction::East),
            KeyCode::Left => Command::Move(Direction::West),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => Command::Quit,
                'h' | '?' => Command::Help,
                'n' => Command::Restart,
                'z' => Command::Undo,
                'y' => Command::Redo,
                c => Command::Move(self.keymap.direction(c)?),
            },
            _ => return None,
        };
        Some(command)
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match self.screen {
            Screen::Help | Screen::Won => {
                self.screen = Screen::Playing;
                return;
            }
            Screen::Exiting => return,
            Screen::Playing => {}
        }

        let Some(command) = self.command(key_event.code) else {
            if let KeyCode::Char(c) = key_event.code {
                self.status = Some(Status::Warning(format!(
                    "Unknown key '{c}', press h for help"
                )));
            }
            return;
        };

        self.status = None;
        match command {
            Command::Move(direction) => self.apply_move(direction),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Restart => {
                self.session.restart();
                self.status = Some(Status::Info(format!(
                    "New game with seed {:#}",
                    self.session.seed()
                )));
            }
            Command::Help => self.screen = Screen::Help,
            Command::Quit => self.screen = Screen::Exiting,
        }
    }

    fn apply_move(&mut self, direction: Direction) {
        match self.session.apply_move(direction) {
            Ok(TurnOutcome::Moved(_)) => {}
            Ok(TurnOutcome::Invalid) => {
                self.status = Some(Status::Warning("Invalid move, try again!".to_owned()));
            }
            Ok(TurnOutcome::Won(_)) => self.screen = Screen::Won,
            Ok(TurnOutcome::Lost { .. }) => {
                self.status = Some(Status::Info(format!(
                    "{} Press n for a new game or q to quit",
                    self.finish_message()
                )));
            }
            Err(GameOverError) => {
                self.status = Some(Status::Warning(
                    "The game is over. Press n for a new game or q to quit".to_owned(),
                ));
            }
        }
    }

    /// A board that fills up after the win ends endless play instead of losing.
    fn finish_message(&self) -> String {
        if self.session.is_won_notified() {
            format!(
                "The board became full after {} turns!",
                self.session.stats().total_moves()
            )
        } else {
            "You lost the game!".to_owned()
        }
    }

    fn finish_banner(&self) -> (&'static str, Style) {
        if self.session.is_won_notified() {
            ("BOARD FULL", style::WIN)
        } else {
            ("GAME OVER!!", style::GAME_OVER)
        }
    }

    fn undo(&mut self) {
        if self.session.undo() {
            return;
        }
        let message = match self.session.config().undo_depth {
            UndoDepth::Disabled => "Undo is disabled",
            UndoDepth::Limited(_) | UndoDepth::Unlimited => "Nothing to undo",
        };
        self.status = Some(Status::Warning(message.to_owned()));
    }

    fn redo(&mut self) {
        if self.session.redo() {
            return;
        }
        let message = if self.session.config().allow_redo {
            "Nothing to redo"
        } else {
            "Redo is disabled"
        };
        self.status = Some(Status::Warning(message.to_owned()));
    }

    fn title(&self) -> Line<'_> {
        let mut spans = vec![Span::styled("TILEMERGE", style::DEFAULT)];
        if self.session.is_won_notified() {
            spans.push(Span::styled(" [ENDLESS]", style::WARNING));
        }
        Line::from(spans).centered()
    }

    fn draw(&self, frame: &mut Frame) {
        let [title_area, main_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(self.title(), title_area);

        let board_area = self.draw_session(frame, main_area);

        if self.session.session_state().is_lost() {
            let (text, style) = self.finish_banner();
            frame.render_widget(Popup::new(text, style).width(board_area.width), board_area);
        }
        if self.screen.is_won() {
            frame.render_widget(
                Popup::new("YOU WIN! Keep going?", style::WIN).width(board_area.width),
                board_area,
            );
        }

        if let Some(status) = &self.status {
            let style = match status {
                Status::Info(_) => style::DEFAULT,
                Status::Warning(_) => style::WARNING,
            };
            frame.render_widget(Line::styled(status.to_string(), style).centered(), status_area);
        }
        frame.render_widget(KeyBindingDisplay::new(&self.footer_bindings), keys_area);

        if self.screen.is_help() {
            let help = KeyBindingDisplay::new(&self.help_bindings).list().block(
                Block::bordered()
                    .title(Line::from("HELP").centered())
                    .title_bottom(Line::from("any key").centered())
                    .padding(Padding::horizontal(1))
                    .style(style::DEFAULT),
            );
            let area = frame.area().centered(
                Constraint::Length(help.width()),
                Constraint::Length(help.height()),
            );
            frame.render_widget(Clear, area);
            frame.render_widget(help, area);
        }
    }

    /// Draws the board and the stats panel, returning the board's area.
    fn draw_session(&self, frame: &mut Frame, area: Rect) -> Rect {
        let border_style = if self.session.session_state().is_lost() {
            style::GAME_OVER
        } else {
            style::FRAME
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(self.session.board()).block(panel("BOARD"));
        let stats = self
            .show_stats
            .then(|| StatsDisplay::new(&self.session).block(panel("STATS")));

        let mut constraints = vec![Constraint::Length(board.width())];
        if let Some(stats) = &stats {
            constraints.push(Constraint::Length(stats.width()));
        }
        let columns = Layout::horizontal(constraints)
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        let board_area = columns[0].centered_vertically(Constraint::Length(board.height()));
        frame.render_widget(&board, board_area);
        if let Some(stats) = stats {
            let stats_area = columns[1].centered_vertically(Constraint::Length(stats.height()));
            frame.render_widget(stats, stats_area);
        }
        board_area
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tilemerge_engine::{Board, Randomizer, Seed, SessionConfig};

    use super::*;

    fn app_from<R: AsRef<[u32]>>(rows: &[R], config: SessionConfig) -> App {
        let mut board = Board::empty(rows.len(), Randomizer::new(Seed::new("APPTEST0").unwrap())).unwrap();
        board.set_cells(rows).unwrap();
        App::new(GameSession::new(board, config), KeyMap::Legacy, true)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_letter_keys_move_tiles() {
        let mut app = app_from(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], SessionConfig::default());
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.session().stats().score(), 4);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_invalid_move_warns() {
        let mut app = app_from(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]], SessionConfig::default());
        press(&mut app, KeyCode::Left);
        assert_eq!(
            app.status,
            Some(Status::Warning("Invalid move, try again!".to_owned()))
        );
        assert_eq!(app.session().stats().total_moves(), 0);
    }

    #[test]
    fn test_undo_and_redo_messages() {
        let config = SessionConfig {
            undo_depth: UndoDepth::Disabled,
            ..SessionConfig::default()
        };
        let mut app = app_from(&[[2, 2], [0, 0]], config);
        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.status.as_ref().map(ToString::to_string).as_deref(), Some("Undo is disabled"));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.status.as_ref().map(ToString::to_string).as_deref(), Some("Redo is disabled"));
    }

    #[test]
    fn test_win_popup_is_dismissed_by_any_key() {
        let mut app = app_from(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], SessionConfig::default());
        press(&mut app, KeyCode::Left);
        assert!(app.screen.is_won());

        press(&mut app, KeyCode::Right);
        assert!(app.screen.is_playing());
        assert_eq!(app.session().stats().total_moves(), 1);
        assert!(app.title().to_string().contains("[ENDLESS]"));
    }

    #[test]
    fn test_full_board_after_win_finishes_endless_play() {
        let mut app = app_from(&[[1024, 1024], [8, 16]], SessionConfig::default());
        press(&mut app, KeyCode::Left);

        assert!(app.session().session_state().is_lost());
        assert_eq!(app.finish_banner().0, "BOARD FULL");
        assert_eq!(
            app.status,
            Some(Status::Info(
                "The board became full after 1 turns! Press n for a new game or q to quit"
                    .to_owned()
            ))
        );
    }

    #[test]
    fn test_loss_without_win() {
        let mut app = app_from(&[[0, 8], [4, 16]], SessionConfig::default());
        press(&mut app, KeyCode::Left);

        assert!(app.session().session_state().is_lost());
        assert_eq!(app.finish_banner().0, "GAME OVER!!");
        assert_eq!(
            app.status.as_ref().map(ToString::to_string).as_deref(),
            Some("You lost the game! Press n for a new game or q to quit")
        );
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app_from(&[[2, 0], [0, 0]], SessionConfig::default());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.screen.is_help());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.screen.is_playing());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.screen.is_exiting());
    }

    #[test]
    fn test_unknown_key_warns() {
        let mut app = app_from(&[[2, 0], [0, 0]], SessionConfig::default());
        press(&mut app, KeyCode::Char('w'));
        assert!(matches!(app.status, Some(Status::Warning(_))));
    }

    #[test]
    fn test_help_lists_movement_keys() {
        let app = app_from(&[[2, 0], [0, 0]], SessionConfig::default());
        let (keys, desc) = &app.help_bindings[0];
        assert_eq!(keys, &["u", "8", "↑"]);
        assert_eq!(*desc, "Up");
        assert!(!app.help_bindings.iter().any(|(_, desc)| *desc == "Redo"));
    }
}
