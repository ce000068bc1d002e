//! Status bar
//!
//! Displays connection state, server, nickname, current channel and the
//! transient status message.

use murmur_app::{App, SessionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        SessionState::Disconnected => Span::styled("Disconnected", Style::default().fg(Color::Red)),
        SessionState::Connected => Span::styled("Connected", Style::default().fg(Color::Yellow)),
        SessionState::ChannelJoined => Span::styled(
            "In channel",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let config = app.config();
    let encoding = config.encoding;
    let mut info = format!(
        " | {} | {}",
        config.connect.addr(),
        app.session().map_or(&config.connect.identity.nickname, |s| s.nickname()).display(encoding),
    );

    if let Some(channel) = app.session().and_then(|s| s.current_channel()) {
        let marker = if channel.joined { "" } else { " (joining)" };
        info.push_str(&format!(" | {}{marker}", channel.name.display(encoding)));
    }

    let mut spans = vec![Span::raw(" "), connection_status, Span::styled(info, Style::default().fg(Color::Gray))];
    if let Some(message) = app.status_message() {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::White)));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
