//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. On Enter, the frontend commands `/join` and
//! `/quit` are handled here; every other line goes to [`App::submit`].

use murmur_app::{App, AppAction};
use murmur_proto::IrcName;

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

const JOIN_COMMAND: &str = "/join";
const QUIT_COMMAND: &str = "/quit";

/// Arguments of `name` when `line` starts with it as a whole word.
///
/// The line is not trimmed: leading blanks make it an ordinary message.
fn command_args<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    (rest.is_empty() || rest.starts_with([' ', '\t'])).then_some(rest)
}

/// Input state for the TUI.
///
/// Manages the text input buffer and cursor position.
/// Handles all character-level key events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position, in characters.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process (may be empty for input-only keys,
    /// or contain protocol actions for submitted lines).
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.len();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Esc => app.quit(),
            KeyInput::Tab | KeyInput::Up | KeyInput::Down => vec![],
        }
    }

    /// Handle Enter key - dispatch frontend commands or submit the line.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if text.is_empty() {
            return vec![];
        }

        if command_args(&text, QUIT_COMMAND).is_some() {
            return app.quit();
        }

        let Some(args) = command_args(&text, JOIN_COMMAND) else {
            return app.submit(&text);
        };

        let encoding = app.config().encoding;
        let mut words = args.split_whitespace();
        let Some(channel) = words.next() else {
            app.set_status("/join: missing channel");
            return vec![AppAction::Render];
        };
        let channel = IrcName::new(encoding.encode(channel).into_owned());
        let key = words.next().map(|key| encoding.encode(key).into_owned());
        app.join(channel, key)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of the character at `index`, or the buffer end.
    fn byte_index(&self, index: usize) -> usize {
        self.buffer.char_indices().nth(index).map_or(self.buffer.len(), |(at, _)| at)
    }
}

#[cfg(test)]
mod tests {
    use murmur_app::{AppEvent, RouterConfig, SessionConfig};
    use murmur_proto::{Command, Event};

    use super::*;

    fn app() -> App {
        App::new(SessionConfig::new("irc.example.org", 6667, "tester"), RouterConfig::default())
    }

    fn connected_app() -> App {
        let mut app = app();
        let _ = app.connect();
        let _ = app.handle(AppEvent::Irc(Event::ConnectionSucceeded));
        app
    }

    fn type_line(input: &mut InputState, app: &mut App, line: &str) -> Vec<AppAction> {
        for c in line.chars() {
            input.handle_key(KeyInput::Char(c), app);
        }
        input.handle_key(KeyInput::Enter, app)
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let mut input = InputState::new();
        let mut app = app();

        input.handle_key(KeyInput::Char('h'), &mut app);
        input.handle_key(KeyInput::Char('i'), &mut app);

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = InputState::new();
        let mut app = app();

        input.handle_key(KeyInput::Char('a'), &mut app);
        input.handle_key(KeyInput::Char('b'), &mut app);
        input.handle_key(KeyInput::Backspace, &mut app);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn editing_multibyte_text() {
        let mut input = InputState::new();
        let mut app = app();

        for c in "héllo".chars() {
            input.handle_key(KeyInput::Char(c), &mut app);
        }
        input.handle_key(KeyInput::Home, &mut app);
        input.handle_key(KeyInput::Right, &mut app);
        input.handle_key(KeyInput::Delete, &mut app);
        input.handle_key(KeyInput::Char('e'), &mut app);

        assert_eq!(input.buffer(), "hello");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn cursor_movement() {
        let mut input = InputState::new();
        let mut app = app();

        input.handle_key(KeyInput::Char('a'), &mut app);
        input.handle_key(KeyInput::Char('b'), &mut app);
        input.handle_key(KeyInput::Char('c'), &mut app);

        input.handle_key(KeyInput::Home, &mut app);
        assert_eq!(input.cursor(), 0);

        input.handle_key(KeyInput::End, &mut app);
        assert_eq!(input.cursor(), 3);

        input.handle_key(KeyInput::Left, &mut app);
        assert_eq!(input.cursor(), 2);

        input.handle_key(KeyInput::Right, &mut app);
        input.handle_key(KeyInput::Right, &mut app);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn enter_clears_buffer() {
        let mut input = InputState::new();
        let mut app = connected_app();

        type_line(&mut input, &mut app, "test");

        assert!(input.buffer().is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn join_command_issues_join() {
        let mut input = InputState::new();
        let mut app = connected_app();

        let actions = type_line(&mut input, &mut app, "/join #room secret");

        assert_eq!(actions, vec![
            AppAction::Issue(Command::Join { channel: "#room".into(), key: Some(b"secret".to_vec()) }),
            AppAction::Render,
        ]);
    }

    #[test]
    fn join_without_channel_sets_status() {
        let mut input = InputState::new();
        let mut app = connected_app();

        let actions = type_line(&mut input, &mut app, "/join");

        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.status_message(), Some("/join: missing channel"));
    }

    #[test]
    fn message_goes_to_current_channel() {
        let mut input = InputState::new();
        let mut app = connected_app();

        type_line(&mut input, &mut app, "/join #room");
        let actions = type_line(&mut input, &mut app, "hello");

        assert!(actions.contains(&AppAction::Issue(Command::Message {
            target: "#room".into(),
            text: b"hello".to_vec(),
        })));
    }

    #[test]
    fn indented_commands_are_messages() {
        let mut input = InputState::new();
        let mut app = connected_app();
        type_line(&mut input, &mut app, "/join #room");

        let actions = type_line(&mut input, &mut app, "  /quit");
        assert!(!actions.contains(&AppAction::Quit));
        assert!(actions.contains(&AppAction::Issue(Command::Message {
            target: "#room".into(),
            text: b"  /quit".to_vec(),
        })));

        let actions = type_line(&mut input, &mut app, "/quitting time");
        assert!(!actions.contains(&AppAction::Quit));
    }

    #[test]
    fn esc_and_quit_leave() {
        let mut input = InputState::new();
        let mut app = connected_app();
        let goodbye = vec![AppAction::Issue(Command::Quit { reason: None }), AppAction::Quit];

        assert_eq!(input.handle_key(KeyInput::Esc, &mut app), goodbye);
        assert_eq!(type_line(&mut input, &mut app, "/quit"), goodbye);
    }
}
