//! Inbound protocol events.
//!
//! This module defines [`Event`], one value per protocol occurrence delivered
//! by the engine in wire order. Origin fields (`by`, `nick` on messages) carry
//! the origin exactly as received, which may be a full `nick!user@host`
//! prefix; use [`crate::nick_of`] to reduce it for display.

use std::{fmt, str::FromStr};

use crate::{IrcName, ProtoError};

/// An inbound protocol occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Registration completed; the session is live.
    ConnectionSucceeded,

    /// A nickname changed.
    NickChanged {
        /// Previous nickname.
        old: IrcName,
        /// New nickname.
        new: IrcName,
        /// The change was our own.
        is_self: bool,
    },

    /// A user disconnected from the network.
    UserQuit {
        /// Nickname that quit.
        nick: IrcName,
        /// Quit message.
        reason: Vec<u8>,
    },

    /// We joined a channel.
    ChannelJoined {
        /// Joined channel.
        channel: IrcName,
    },

    /// A mode was set on us.
    ModeSet {
        /// Mode string, e.g. `+i`.
        mode: Vec<u8>,
        /// Origin that set it.
        by: IrcName,
    },

    /// A message addressed to us directly.
    PrivateMessage {
        /// Sender origin.
        nick: IrcName,
        /// Message body.
        message: Vec<u8>,
    },

    /// A notice addressed to us directly by a user.
    PrivateNotice {
        /// Sender origin.
        nick: IrcName,
        /// Notice body.
        notice: Vec<u8>,
    },

    /// Any server message the engine has no dedicated event for.
    ServerMessage {
        /// Origin, typically the server name.
        origin: IrcName,
        /// Command verb or three-digit numeric.
        command: String,
        /// Parameters as received.
        params: Vec<Vec<u8>>,
    },

    /// A notice from the server itself.
    ServerNotice {
        /// Origin, typically the server name.
        origin: IrcName,
        /// Parameters as received.
        params: Vec<Vec<u8>>,
    },

    /// We were invited to a channel.
    Invited {
        /// Channel we were invited to.
        channel: IrcName,
        /// Origin of the invite.
        by: IrcName,
    },

    /// A CTCP ACTION addressed to us directly.
    PrivateAction {
        /// Sender origin.
        nick: IrcName,
        /// Action body.
        action: Vec<u8>,
    },

    /// Another user joined a channel we are in.
    UserJoined {
        /// Channel joined.
        channel: IrcName,
        /// Origin of the joining user.
        nick: IrcName,
    },

    /// A user left a channel we are in.
    UserParted {
        /// Channel left.
        channel: IrcName,
        /// Origin of the departing user.
        nick: IrcName,
        /// Part message, empty if none.
        reason: Vec<u8>,
        /// The departing user was us.
        is_self: bool,
    },

    /// A mode was set on a channel.
    ChannelModeSet {
        /// Target channel.
        channel: IrcName,
        /// Mode string, e.g. `+o`.
        mode: Vec<u8>,
        /// Mode parameters joined by spaces, empty if none.
        params: Vec<u8>,
        /// Origin that set it.
        by: IrcName,
    },

    /// A channel topic was changed.
    TopicSet {
        /// Target channel.
        channel: IrcName,
        /// New topic.
        topic: Vec<u8>,
        /// Origin that set it.
        by: IrcName,
    },

    /// A user was kicked from a channel.
    UserKicked {
        /// Channel kicked from.
        channel: IrcName,
        /// Nickname kicked.
        nick: IrcName,
        /// Kick reason, empty if none.
        reason: Vec<u8>,
        /// Origin that kicked.
        by: IrcName,
        /// The kicked user was us.
        is_self: bool,
    },

    /// A message was sent to a channel.
    MessageSent {
        /// Target channel.
        channel: IrcName,
        /// Message body.
        message: Vec<u8>,
        /// Sender origin.
        by: IrcName,
    },

    /// A notice was sent to a channel.
    NoticeSent {
        /// Target channel.
        channel: IrcName,
        /// Notice body.
        notice: Vec<u8>,
        /// Sender origin.
        by: IrcName,
    },

    /// A CTCP ACTION was sent to a channel.
    ActionPerformed {
        /// Target channel.
        channel: IrcName,
        /// Action body.
        action: Vec<u8>,
        /// Sender origin.
        by: IrcName,
    },
}

impl Event {
    /// Fieldless kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ConnectionSucceeded => EventKind::ConnectionSucceeded,
            Self::NickChanged { .. } => EventKind::NickChanged,
            Self::UserQuit { .. } => EventKind::UserQuit,
            Self::ChannelJoined { .. } => EventKind::ChannelJoined,
            Self::ModeSet { .. } => EventKind::ModeSet,
            Self::PrivateMessage { .. } => EventKind::PrivateMessage,
            Self::PrivateNotice { .. } => EventKind::PrivateNotice,
            Self::ServerMessage { .. } => EventKind::ServerMessage,
            Self::ServerNotice { .. } => EventKind::ServerNotice,
            Self::Invited { .. } => EventKind::Invited,
            Self::PrivateAction { .. } => EventKind::PrivateAction,
            Self::UserJoined { .. } => EventKind::UserJoined,
            Self::UserParted { .. } => EventKind::UserParted,
            Self::ChannelModeSet { .. } => EventKind::ChannelModeSet,
            Self::TopicSet { .. } => EventKind::TopicSet,
            Self::UserKicked { .. } => EventKind::UserKicked,
            Self::MessageSent { .. } => EventKind::MessageSent,
            Self::NoticeSent { .. } => EventKind::NoticeSent,
            Self::ActionPerformed { .. } => EventKind::ActionPerformed,
        }
    }
}

/// Fieldless discriminant of [`Event`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// [`Event::ConnectionSucceeded`]
    ConnectionSucceeded,
    /// [`Event::NickChanged`]
    NickChanged,
    /// [`Event::UserQuit`]
    UserQuit,
    /// [`Event::ChannelJoined`]
    ChannelJoined,
    /// [`Event::ModeSet`]
    ModeSet,
    /// [`Event::PrivateMessage`]
    PrivateMessage,
    /// [`Event::PrivateNotice`]
    PrivateNotice,
    /// [`Event::ServerMessage`]
    ServerMessage,
    /// [`Event::ServerNotice`]
    ServerNotice,
    /// [`Event::Invited`]
    Invited,
    /// [`Event::PrivateAction`]
    PrivateAction,
    /// [`Event::UserJoined`]
    UserJoined,
    /// [`Event::UserParted`]
    UserParted,
    /// [`Event::ChannelModeSet`]
    ChannelModeSet,
    /// [`Event::TopicSet`]
    TopicSet,
    /// [`Event::UserKicked`]
    UserKicked,
    /// [`Event::MessageSent`]
    MessageSent,
    /// [`Event::NoticeSent`]
    NoticeSent,
    /// [`Event::ActionPerformed`]
    ActionPerformed,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::ConnectionSucceeded,
        Self::NickChanged,
        Self::UserQuit,
        Self::ChannelJoined,
        Self::ModeSet,
        Self::PrivateMessage,
        Self::PrivateNotice,
        Self::ServerMessage,
        Self::ServerNotice,
        Self::Invited,
        Self::PrivateAction,
        Self::UserJoined,
        Self::UserParted,
        Self::ChannelModeSet,
        Self::TopicSet,
        Self::UserKicked,
        Self::MessageSent,
        Self::NoticeSent,
        Self::ActionPerformed,
    ];

    /// Kebab-case name, as accepted by [`EventKind::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionSucceeded => "connection-succeeded",
            Self::NickChanged => "nick-changed",
            Self::UserQuit => "user-quit",
            Self::ChannelJoined => "channel-joined",
            Self::ModeSet => "mode-set",
            Self::PrivateMessage => "private-message",
            Self::PrivateNotice => "private-notice",
            Self::ServerMessage => "server-message",
            Self::ServerNotice => "server-notice",
            Self::Invited => "invited",
            Self::PrivateAction => "private-action",
            Self::UserJoined => "user-joined",
            Self::UserParted => "user-parted",
            Self::ChannelModeSet => "channel-mode-set",
            Self::TopicSet => "topic-set",
            Self::UserKicked => "user-kicked",
            Self::MessageSent => "message-sent",
            Self::NoticeSent => "notice-sent",
            Self::ActionPerformed => "action-performed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtoError::UnknownEventKind(s.to_owned()))
    }
}
