//! Outbound wire commands.
//!
//! [`Command`] is what the core asks the engine to send. [`Command::to_lines`]
//! produces the wire lines without terminators; the transport appends CRLF.

use crate::{Identity, IrcName, ctcp};

/// Maximum line length in bytes, excluding the CRLF terminator.
pub const MAX_LINE_LEN: usize = 510;

/// An outbound request to the protocol engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register with `NICK` and `USER`.
    Register(Identity),

    /// Join a channel.
    Join {
        /// Channel to join.
        channel: IrcName,
        /// Channel key. `None` if the channel has none.
        key: Option<Vec<u8>>,
    },

    /// Send a line verbatim.
    Raw(Vec<u8>),

    /// `PRIVMSG` to a channel or nick.
    Message {
        /// Channel or nick.
        target: IrcName,
        /// Message body.
        text: Vec<u8>,
    },

    /// CTCP ACTION to a channel or nick.
    Action {
        /// Channel or nick.
        target: IrcName,
        /// Action body.
        text: Vec<u8>,
    },

    /// Reply to a server `PING`.
    Pong(Vec<u8>),

    /// Leave the network.
    Quit {
        /// Quit message. `None` sends a bare `QUIT`.
        reason: Option<Vec<u8>>,
    },
}

impl Command {
    /// Wire lines for this command, without CRLF.
    ///
    /// Line terminators and NUL inside parameters are removed so a parameter
    /// can never smuggle a second command. Message and action bodies too long
    /// for one line are split over several `PRIVMSG` lines, never inside a
    /// UTF-8 sequence, and every action chunk is a complete CTCP frame. Any
    /// other line is truncated to [`MAX_LINE_LEN`].
    pub fn to_lines(&self) -> Vec<Vec<u8>> {
        let lines = match self {
            Self::Register(identity) => vec![
                line(b"NICK", &[identity.nickname.as_bytes()], None),
                line(
                    b"USER",
                    &[identity.username.as_bytes(), b"0".as_slice(), b"*".as_slice()],
                    Some(identity.realname.as_bytes()),
                ),
            ],
            Self::Join { channel, key } => {
                let mut params = vec![channel.as_bytes()];
                if let Some(key) = key {
                    params.push(key);
                }
                vec![line(b"JOIN", &params, None)]
            },
            Self::Raw(raw) => {
                let end = raw.iter().position(|b| is_forbidden(*b)).unwrap_or(raw.len());
                vec![raw[..end].to_vec()]
            },
            Self::Message { target, text } => privmsg_lines(target, text, 0)
                .into_iter()
                .map(|chunk| line(b"PRIVMSG", &[target.as_bytes()], Some(chunk)))
                .collect(),
            Self::Action { target, text } => privmsg_lines(target, text, ctcp::ACTION_OVERHEAD)
                .into_iter()
                .map(|chunk| line(b"PRIVMSG", &[target.as_bytes()], Some(&ctcp::wrap_action(chunk))))
                .collect(),
            Self::Pong(token) => vec![line(b"PONG", &[], Some(token))],
            Self::Quit { reason } => vec![line(b"QUIT", &[], reason.as_deref())],
        };

        lines
            .into_iter()
            .map(|mut l| {
                l.truncate(MAX_LINE_LEN);
                l
            })
            .collect()
    }
}

/// Body chunks of a `PRIVMSG` to `target`, each fitting one line once
/// `overhead` framing bytes are added.
fn privmsg_lines<'a>(target: &IrcName, text: &'a [u8], overhead: usize) -> Vec<&'a [u8]> {
    // "PRIVMSG <target> :"
    let head = b"PRIVMSG".len() + 1 + target.as_bytes().len() + 2;
    let budget = MAX_LINE_LEN.saturating_sub(head + overhead);
    split_body(text, budget)
}

/// Split `body` into chunks of at most `budget` bytes, backing off so no
/// chunk starts on a UTF-8 continuation byte. Forbidden bytes are counted
/// as if present; `line` drops them later, which only shortens a chunk.
fn split_body(mut body: &[u8], budget: usize) -> Vec<&[u8]> {
    const MIN_CHUNK: usize = 4;

    let budget = budget.max(MIN_CHUNK);
    let mut chunks = Vec::new();

    while body.len() > budget {
        let mut at = budget;
        while at > 0 && is_continuation(body[at]) {
            at -= 1;
        }
        if at == 0 {
            at = budget;
        }
        let (chunk, rest) = body.split_at(at);
        chunks.push(chunk);
        body = rest;
    }

    chunks.push(body);
    chunks
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

fn is_forbidden(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | 0)
}

fn push_clean(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend(bytes.iter().copied().filter(|b| !is_forbidden(*b)));
}

fn line(verb: &[u8], middle: &[&[u8]], trailing: Option<&[u8]>) -> Vec<u8> {
    let mut out = verb.to_vec();
    for param in middle {
        out.push(b' ');
        push_clean(&mut out, param);
    }
    if let Some(trailing) = trailing {
        out.extend_from_slice(b" :");
        push_clean(&mut out, trailing);
    }
    out
}
