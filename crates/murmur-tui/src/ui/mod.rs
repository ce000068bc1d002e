//! UI rendering
//!
//! Rendering functions that convert App state and the transcript into
//! terminal output using ratatui widgets. All functions are pure (no I/O),
//! taking state and returning widget trees.

mod chat;
mod input;
mod status;

use murmur_app::Transcript;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{App, InputState};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, transcript: &Transcript) {
    const CHAT_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CHAT_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [chat_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, app, transcript, *chat_area);
    input::render(frame, input, *input_area);
    status::render(frame, app, *status_area);
}
