//! Outbound command formatting.
//!
//! The [`Formatter`] converts user intent into an [`Outgoing`]: the local echo
//! and the wire command. The echo is always ordered before the command, so
//! the transcript shows what was sent without waiting for the server. A send
//! that later fails on the wire still appears as sent.

use murmur_proto::Command;
use thiserror::Error;

use crate::{AppAction, Renderer, Session, TranscriptEntry};

/// Reasons a send is refused before anything is echoed or issued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Registration has not completed.
    #[error("Not connected")]
    NotConnected,

    /// Action or message with no current channel.
    #[error("No current channel, join one first")]
    NoCurrentChannel,
}

/// Local echo plus the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    /// Transcript entry shown immediately.
    pub echo: TranscriptEntry,
    /// Command handed to the engine after the echo.
    pub command: Command,
    /// The session encoding could not represent some characters, so the wire
    /// text carries numeric character references where the echo does not.
    pub replaced: bool,
}

impl Outgoing {
    /// Echo first, then issue.
    pub fn into_actions(self) -> Vec<AppAction> {
        vec![AppAction::Display(self.echo), AppAction::Issue(self.command)]
    }
}

/// Formats sends for one session.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    session: &'a Session,
    renderer: Renderer,
}

impl<'a> Formatter<'a> {
    /// Formatter using `session`'s nickname, channel and encoding.
    pub fn new(session: &'a Session) -> Self {
        Self { session, renderer: Renderer::new(session.encoding()) }
    }

    /// Send a raw line. No channel required.
    ///
    /// # Errors
    ///
    /// [`CommandError::NotConnected`] before registration completes.
    pub fn send_raw(&self, line: &str) -> Result<Outgoing, CommandError> {
        self.require_connected()?;
        let (bytes, replaced) = self.encode(line);
        let command = Command::Raw(bytes);
        Ok(Outgoing { echo: self.renderer.raw_sent(line), command, replaced })
    }

    /// Send a CTCP ACTION to the current channel.
    ///
    /// # Errors
    ///
    /// [`CommandError::NotConnected`] or [`CommandError::NoCurrentChannel`].
    pub fn send_action(&self, text: &str) -> Result<Outgoing, CommandError> {
        let target = self.current_channel()?;
        let (bytes, replaced) = self.encode(text);
        let command = Command::Action { target, text: bytes };
        Ok(Outgoing { echo: self.renderer.channel_action(&self.nick(), text), command, replaced })
    }

    /// Send a message to the current channel.
    ///
    /// # Errors
    ///
    /// [`CommandError::NotConnected`] or [`CommandError::NoCurrentChannel`].
    pub fn send_message(&self, text: &str) -> Result<Outgoing, CommandError> {
        let target = self.current_channel()?;
        let (bytes, replaced) = self.encode(text);
        let command = Command::Message { target, text: bytes };
        Ok(Outgoing { echo: self.renderer.channel_message(&self.nick(), text), command, replaced })
    }

    fn require_connected(&self) -> Result<(), CommandError> {
        if self.session.is_connected() { Ok(()) } else { Err(CommandError::NotConnected) }
    }

    fn current_channel(&self) -> Result<murmur_proto::IrcName, CommandError> {
        self.require_connected()?;
        self.session.current_channel().map(|c| c.name.clone()).ok_or(CommandError::NoCurrentChannel)
    }

    fn nick(&self) -> String {
        self.session.nickname().display(self.session.encoding()).into_owned()
    }

    fn encode(&self, text: &str) -> (Vec<u8>, bool) {
        let (bytes, replaced) = self.session.encoding().encode_checked(text);
        (bytes.into_owned(), replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionConfig, Style};

    fn connected() -> Session {
        let mut session = Session::new(&SessionConfig::new("irc.example.org", 6667, "tester"));
        session.mark_connected();
        session
    }

    #[test]
    fn raw_needs_no_channel() {
        let session = connected();
        let Ok(out) = Formatter::new(&session).send_raw("WHOIS foo") else {
            unreachable!("raw send is allowed without a channel");
        };

        assert_eq!(out.command, Command::Raw(b"WHOIS foo".to_vec()));
        assert_eq!(out.echo.text(), "\n\tSENT: WHOIS foo");
    }

    #[test]
    fn message_without_channel_is_refused() {
        let session = connected();
        let formatter = Formatter::new(&session);

        assert_eq!(formatter.send_message("hi"), Err(CommandError::NoCurrentChannel));
        assert_eq!(formatter.send_action("waves"), Err(CommandError::NoCurrentChannel));
    }

    #[test]
    fn sends_before_registration_are_refused() {
        let session = Session::new(&SessionConfig::new("irc.example.org", 6667, "tester"));
        assert_eq!(Formatter::new(&session).send_raw("PING x"), Err(CommandError::NotConnected));
    }

    #[test]
    fn message_echo_precedes_issue() {
        let mut session = connected();
        session.request_channel("#test".into());

        let Ok(out) = Formatter::new(&session).send_message("hello") else {
            unreachable!("channel is current");
        };
        let actions = out.into_actions();

        assert!(matches!(actions.as_slice(), [AppAction::Display(_), AppAction::Issue(Command::Message { .. })]));
        if let [AppAction::Display(echo), AppAction::Issue(command)] = actions.as_slice() {
            assert_eq!(echo.segments()[1].text, "tester");
            assert_eq!(echo.segments()[1].style, Style::Bold);
            assert_eq!(command, &Command::Message { target: "#test".into(), text: b"hello".to_vec() });
        }
    }

    #[test]
    fn unrepresentable_characters_are_flagged() {
        let mut config = SessionConfig::new("irc.example.org", 6667, "tester");
        config.encoding = murmur_proto::TextEncoding::for_label("latin1").unwrap_or_default();
        let mut session = Session::new(&config);
        session.mark_connected();
        session.request_channel("#room".into());
        let formatter = Formatter::new(&session);

        let Ok(out) = formatter.send_message("hi \u{2603}") else {
            unreachable!("channel is current");
        };
        assert!(out.replaced);
        assert_eq!(out.echo.text(), "\ntester: hi \u{2603}");
        assert_eq!(out.command, Command::Message { target: "#room".into(), text: b"hi &#9731;".to_vec() });

        assert!(formatter.send_message("caf\u{e9}").is_ok_and(|out| !out.replaced));
    }

    #[test]
    fn action_uses_current_nick() {
        let mut session = connected();
        session.request_channel("#test".into());
        session.set_nickname("renamed".into());

        let Ok(out) = Formatter::new(&session).send_action("waves") else {
            unreachable!("channel is current");
        };
        assert_eq!(out.echo.text(), "\n\t *renamed waves");
        assert_eq!(out.command, Command::Action { target: "#test".into(), text: b"waves".to_vec() });
    }
}
