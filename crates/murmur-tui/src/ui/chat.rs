//! Chat area
//!
//! Displays the session transcript, newest lines at the bottom.

use murmur_app::{App, Color as EntryColor, Style as EntryStyle, Transcript, TranscriptEntry};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const TAB: &str = "    ";

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, transcript: &Transcript, area: Rect) {
    let encoding = app.config().encoding;
    let title = app
        .session()
        .and_then(|s| s.current_channel())
        .map_or_else(|| " No Channel ".to_string(), |c| format!(" {} ", c.name.display(encoding)));

    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if transcript.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Type /join #channel to start chatting",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        lines(transcript.entries()).into_iter().map(ListItem::new).collect()
    };

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

/// Lay out entries as terminal lines.
///
/// Segments are split on `\n` and tabs expand to four spaces. The newline
/// that opens the first entry does not produce an empty first line.
fn lines(entries: &[TranscriptEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Option<Vec<Span<'static>>> = None;

    for segment in entries.iter().flat_map(TranscriptEntry::segments) {
        let style = style_of(segment.style);

        for (i, piece) in segment.text.split('\n').enumerate() {
            if i > 0
                && let Some(line) = current.replace(Vec::new())
            {
                lines.push(Line::from(line));
            }
            if !piece.is_empty() {
                current.get_or_insert_with(Vec::new).push(Span::styled(piece.replace('\t', TAB), style));
            }
        }
    }

    lines.extend(current.map(Line::from));
    lines
}

fn style_of(style: EntryStyle) -> Style {
    match style {
        EntryStyle::Plain => Style::default(),
        EntryStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
        EntryStyle::Colored(EntryColor::Blue) => Style::default().fg(Color::Blue),
        EntryStyle::Colored(EntryColor::Gray) => Style::default().fg(Color::Gray),
    }
}
