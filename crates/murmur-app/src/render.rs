//! Transcript formatting.
//!
//! The [`Renderer`] maps an event or a locally issued command to a
//! [`TranscriptEntry`]: an ordered list of styled [`Segment`]s. It holds no
//! state beyond the session encoding, so formatting the same input twice
//! yields identical segments.
//!
//! Every entry begins with a plain segment that starts with `\n`. Inbound
//! text is decoded best-effort; undecodable bytes become U+FFFD and the entry
//! is still produced.

use std::borrow::Cow;

use murmur_proto::{Event, IrcName, TextEncoding, nick_of};

/// Foreground colors used by the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Locally sent raw commands.
    Blue,
    /// Status lines.
    Gray,
}

/// Segment style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Default text.
    Plain,
    /// Emphasized, used for nicknames.
    Bold,
    /// Colored text.
    Colored(Color),
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Display text. May contain `\n` and `\t`.
    pub text: String,
    /// Style for the whole run.
    pub style: Style,
}

/// One immutable transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    segments: Vec<Segment>,
}

impl TranscriptEntry {
    /// Start an entry with its leading plain segment.
    fn starting(lead: &str) -> Self {
        debug_assert!(lead.starts_with('\n'));
        Self { segments: vec![Segment { text: lead.to_owned(), style: Style::Plain }] }
    }

    fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.segments.push(Segment { text: text.into(), style });
        self
    }

    /// Segments in display order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Concatenated text without styles.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Pure formatting policy for one session encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    encoding: TextEncoding,
}

impl Renderer {
    /// Renderer decoding inbound bytes with `encoding`.
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// A raw line we sent: `"\n"`, then `"\tSENT: "` and the line in blue.
    pub fn raw_sent(&self, line: &str) -> TranscriptEntry {
        let blue = Style::Colored(Color::Blue);
        TranscriptEntry::starting("\n").with("\tSENT: ", blue).with(line, blue)
    }

    /// A channel message, ours or received: `<nick>: <body>`.
    pub fn channel_message(&self, nick: &str, body: &str) -> TranscriptEntry {
        TranscriptEntry::starting("\n")
            .with(nick, Style::Bold)
            .with(": ", Style::Bold)
            .with(body, Style::Plain)
    }

    /// A channel action, ours or received: `*<nick> <body>`.
    pub fn channel_action(&self, nick: &str, body: &str) -> TranscriptEntry {
        TranscriptEntry::starting("\n\t *")
            .with(nick, Style::Bold)
            .with(" ", Style::Bold)
            .with(body, Style::Plain)
    }

    /// Format an inbound event.
    pub fn event(&self, event: &Event) -> TranscriptEntry {
        match event {
            Event::ConnectionSucceeded => self.status("Connected"),
            Event::NickChanged { old, new, is_self } => {
                if *is_self {
                    self.status(format!("You are now known as {}", self.nick(new)))
                } else {
                    self.status(format!("{} is now known as {}", self.nick(old), self.nick(new)))
                }
            },
            Event::UserQuit { nick, reason } => {
                self.status(format!("{} has quit{}", self.nick(nick), self.reason(reason)))
            },
            Event::ChannelJoined { channel } => {
                self.status(format!("Now talking on {}", self.name(channel)))
            },
            Event::ModeSet { mode, by } => {
                self.status(format!("{} sets mode {}", self.nick(by), self.text(mode)))
            },
            Event::PrivateMessage { nick, message } => TranscriptEntry::starting("\n")
                .with(self.nick(nick), Style::Bold)
                .with(" (private): ", Style::Bold)
                .with(self.text(message), Style::Plain),
            Event::PrivateNotice { nick, notice } => TranscriptEntry::starting("\n")
                .with(format!("-{}-", self.nick(nick)), Style::Bold)
                .with(format!(" {}", self.text(notice)), Style::Plain),
            Event::ServerMessage { origin, params, .. } | Event::ServerNotice { origin, params } => {
                let mut line = format!("\t{}", self.name(origin));
                for param in params {
                    line.push(' ');
                    line.push_str(&self.text(param));
                }
                TranscriptEntry::starting("\n").with(line, Style::Colored(Color::Gray))
            },
            Event::Invited { channel, by } => {
                self.status(format!("{} invites you to {}", self.nick(by), self.name(channel)))
            },
            Event::PrivateAction { nick, action } => {
                self.channel_action(&self.nick(nick), &self.text(action))
            },
            Event::UserJoined { channel, nick } => {
                self.status(format!("{} has joined {}", self.nick(nick), self.name(channel)))
            },
            Event::UserParted { channel, nick, reason, is_self } => {
                if *is_self {
                    self.status(format!("You have left {}{}", self.name(channel), self.reason(reason)))
                } else {
                    self.status(format!(
                        "{} has left {}{}",
                        self.nick(nick),
                        self.name(channel),
                        self.reason(reason)
                    ))
                }
            },
            Event::ChannelModeSet { channel, mode, params, by } => {
                let mut line = format!("{} sets mode {}", self.nick(by), self.text(mode));
                if !params.is_empty() {
                    line.push(' ');
                    line.push_str(&self.text(params));
                }
                line.push_str(" on ");
                line.push_str(&self.name(channel));
                self.status(line)
            },
            Event::TopicSet { channel, topic, by } => self.status(format!(
                "{} changed the topic of {} to: {}",
                self.nick(by),
                self.name(channel),
                self.text(topic)
            )),
            Event::UserKicked { channel, nick, reason, by, is_self } => {
                let who = if *is_self { Cow::Borrowed("You") } else { self.nick(nick) };
                let verb = if *is_self { "have been" } else { "was" };
                self.status(format!(
                    "{who} {verb} kicked from {} by {}{}",
                    self.name(channel),
                    self.nick(by),
                    self.reason(reason)
                ))
            },
            Event::MessageSent { message, by, .. } => {
                self.channel_message(&self.nick(by), &self.text(message))
            },
            Event::NoticeSent { channel, notice, by } => TranscriptEntry::starting("\n")
                .with(format!("-{}:{}-", self.nick(by), self.name(channel)), Style::Bold)
                .with(format!(" {}", self.text(notice)), Style::Plain),
            Event::ActionPerformed { action, by, .. } => {
                self.channel_action(&self.nick(by), &self.text(action))
            },
        }
    }

    /// Gray `*** <text>` status line.
    fn status(&self, text: impl AsRef<str>) -> TranscriptEntry {
        TranscriptEntry::starting("\n").with(format!("\t*** {}", text.as_ref()), Style::Colored(Color::Gray))
    }

    /// Nick portion of an origin, decoded.
    fn nick<'a>(&self, origin: &'a IrcName) -> Cow<'a, str> {
        self.text(nick_of(origin.as_bytes()))
    }

    fn name<'a>(&self, name: &'a IrcName) -> Cow<'a, str> {
        self.text(name.as_bytes())
    }

    /// ` (<reason>)`, or nothing for an empty reason.
    fn reason(&self, reason: &[u8]) -> String {
        if reason.is_empty() { String::new() } else { format!(" ({})", self.text(reason)) }
    }

    fn text<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, replaced) = self.encoding.decode_checked(bytes);
        if replaced {
            tracing::debug!(encoding = self.encoding.name(), len = bytes.len(), "Replaced undecodable bytes");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Segment {
        Segment { text: text.into(), style: Style::Plain }
    }

    fn bold(text: &str) -> Segment {
        Segment { text: text.into(), style: Style::Bold }
    }

    #[test]
    fn raw_sent_is_blue() {
        let entry = Renderer::default().raw_sent("WHOIS foo");
        let blue = Style::Colored(Color::Blue);

        assert_eq!(entry.segments(), &[
            plain("\n"),
            Segment { text: "\tSENT: ".into(), style: blue },
            Segment { text: "WHOIS foo".into(), style: blue },
        ]);
    }

    #[test]
    fn received_message_shows_nick_only() {
        let event = Event::MessageSent {
            channel: "#room".into(),
            message: b"hi there".to_vec(),
            by: "alice!a@host".into(),
        };

        let entry = Renderer::default().event(&event);
        assert_eq!(entry.segments(), &[plain("\n"), bold("alice"), bold(": "), plain("hi there")]);
    }

    #[test]
    fn action_layout() {
        let entry = Renderer::default().channel_action("tester", "waves");
        assert_eq!(entry.segments(), &[plain("\n\t *"), bold("tester"), bold(" "), plain("waves")]);
        assert_eq!(entry.text(), "\n\t *tester waves");
    }

    #[test]
    fn status_lines_are_gray() {
        let event = Event::UserJoined { channel: "#room".into(), nick: "bob!b@h".into() };
        let entry = Renderer::default().event(&event);

        assert_eq!(entry.segments().len(), 2);
        assert_eq!(entry.segments()[1].style, Style::Colored(Color::Gray));
        assert_eq!(entry.text(), "\n\t*** bob has joined #room");
    }

    #[test]
    fn kick_wording_depends_on_target() {
        let renderer = Renderer::default();
        let kicked = |is_self| Event::UserKicked {
            channel: "#room".into(),
            nick: "tester".into(),
            reason: b"spam".to_vec(),
            by: "op!o@h".into(),
            is_self,
        };

        assert_eq!(
            renderer.event(&kicked(true)).text(),
            "\n\t*** You have been kicked from #room by op (spam)"
        );
        assert_eq!(renderer.event(&kicked(false)).text(), "\n\t*** tester was kicked from #room by op (spam)");
    }

    #[test]
    fn undecodable_bytes_are_replaced() {
        let event = Event::MessageSent {
            channel: "#room".into(),
            message: vec![b'o', b'k', 0xff, 0xfe],
            by: "alice".into(),
        };

        let entry = Renderer::default().event(&event);
        assert_eq!(entry.segments()[3].text, "ok\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn latin1_session_decodes_high_bytes() {
        let Ok(latin1) = TextEncoding::for_label("latin1") else {
            unreachable!("latin1 is a known label");
        };
        let event = Event::PrivateMessage { nick: IrcName::from(&b"j\xe9r\xf4me"[..]), message: vec![0xe9] };

        let entry = Renderer::new(latin1).event(&event);
        assert_eq!(entry.text(), "\nj\u{e9}r\u{f4}me (private): \u{e9}");
    }
}
