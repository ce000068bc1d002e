//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The driver owns the transcript:
//! entries arrive through [`Driver::display`] and are drawn on the next render.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use murmur_app::{App, AppAction, AppEvent, Driver, Transcript, TranscriptEntry};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{InputState, KeyInput, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm) and rendering (ratatui). Owns the input
/// state for text editing and the session transcript.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    transcript: Transcript,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal: raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched to raw mode.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self {
            terminal,
            event_stream,
            input_state: InputState::new(),
            transcript: Transcript::new(),
            restored: false,
        })
    }

    /// Convert a crossterm key event to `KeyInput`. Ctrl+C acts as Esc.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyInput::Esc);
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Leave raw mode and the alternate screen. Idempotent.
    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to disable raw mode");
        }
        if let Err(e) = stdout().execute(LeaveAlternateScreen) {
            tracing::warn!(error = %e, "Failed to leave alternate screen");
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_input(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        loop {
            let Some(event) = self.event_stream.next().await else {
                tracing::info!("Terminal input closed");
                return Ok(app.quit());
            };

            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = Self::convert_key(key) {
                        return Ok(self.input_state.handle_key(input, app));
                    }
                },
                Event::Resize(cols, rows) => return Ok(app.handle(AppEvent::Resize(cols, rows))),
                _ => {},
            }
        }
    }

    fn display(&mut self, entry: TranscriptEntry) -> Result<(), Self::Error> {
        self.transcript.push(entry);
        Ok(())
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app, &self.input_state, &self.transcript);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}
