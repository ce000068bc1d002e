//! Observable session state.
//!
//! This module defines the data structures that represent the application's
//! view of one connection lifetime: [`Session`], its [`SessionState`], and
//! the current [`Channel`].
//!
//! A session is created on connect and replaced on the next connect; it is
//! never reused. Its state only moves forward:
//! `Disconnected → Connected → ChannelJoined`.

use murmur_client::ConnectConfig;
use murmur_proto::{IrcName, TextEncoding};

/// Everything needed to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Server, port and identity.
    pub connect: ConnectConfig,
    /// Encoding used to decode inbound text and encode user input.
    pub encoding: TextEncoding,
    /// Channel to join once the session connects.
    pub autojoin: Option<IrcName>,
}

impl SessionConfig {
    /// Config for `server:port` as `nickname`, UTF-8, no autojoin.
    pub fn new(server: impl Into<String>, port: u16, nickname: impl Into<IrcName>) -> Self {
        Self {
            connect: ConnectConfig {
                server: server.into(),
                port,
                identity: murmur_proto::Identity::new(nickname),
            },
            encoding: TextEncoding::utf8(),
            autojoin: None,
        }
    }
}

/// Session connection state. Ordered: a session never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
    /// Registration has not completed.
    Disconnected,
    /// Registered with the server.
    Connected,
    /// Registered and in a channel.
    ChannelJoined,
}

/// The single current channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel name bytes.
    pub name: IrcName,
    /// Server confirmed the join.
    pub joined: bool,
}

/// One connection lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    server: String,
    port: u16,
    nickname: IrcName,
    encoding: TextEncoding,
    state: SessionState,
    channel: Option<Channel>,
}

impl Session {
    /// Fresh, disconnected session for `config`.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            server: config.connect.server.clone(),
            port: config.connect.port,
            nickname: config.connect.identity.nickname.clone(),
            encoding: config.encoding,
            state: SessionState::Disconnected,
            channel: None,
        }
    }

    /// Server host.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Server port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Our nickname as last confirmed by the engine.
    pub fn nickname(&self) -> &IrcName {
        &self.nickname
    }

    /// Session text encoding.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Connection state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Registration has completed.
    pub fn is_connected(&self) -> bool {
        self.state >= SessionState::Connected
    }

    /// Current channel. `None` until a join is requested or confirmed.
    pub fn current_channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    /// `Disconnected → Connected`. Returns `false` if already connected.
    pub(crate) fn mark_connected(&mut self) -> bool {
        if self.state == SessionState::Disconnected {
            self.state = SessionState::Connected;
            true
        } else {
            false
        }
    }

    /// Record a confirmed join and make `name` the current channel.
    ///
    /// Returns `false` (and changes nothing) when the session is not
    /// connected yet.
    pub(crate) fn mark_joined(&mut self, name: IrcName) -> bool {
        if self.state == SessionState::Disconnected {
            return false;
        }
        self.state = SessionState::ChannelJoined;
        self.channel = Some(Channel { name, joined: true });
        true
    }

    /// Make `name` current ahead of the server's confirmation.
    pub(crate) fn request_channel(&mut self, name: IrcName) {
        if self.channel.as_ref().is_none_or(|c| c.name != name) {
            self.channel = Some(Channel { name, joined: false });
        }
    }

    pub(crate) fn set_nickname(&mut self, nickname: IrcName) {
        self.nickname = nickname;
    }
}
