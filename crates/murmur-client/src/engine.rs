//! Engine contract.
//!
//! The [`Engine`] trait decouples the application core from the wire. The
//! core issues [`Command`]s without waiting for acknowledgement and consumes
//! [`Event`]s from the [`EventFeed`] returned by [`Engine::connect`].

use std::future::Future;

use murmur_proto::{Command, Event, Identity, IrcName};
use tokio::sync::mpsc;

use crate::ConnectionError;

/// Ordered feed of inbound events for one session.
///
/// One event per protocol occurrence, in wire order, never batched. The feed
/// ends when the connection closes.
pub type EventFeed = mpsc::Receiver<Event>;

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Server host name or address.
    pub server: String,
    /// Server port.
    pub port: u16,
    /// Registration identity.
    pub identity: Identity,
}

impl ConnectConfig {
    /// Default plaintext IRC port.
    pub const DEFAULT_PORT: u16 = 6667;

    /// `host:port` form for logging and error messages.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

/// Protocol engine adapter.
///
/// # Implementations
///
/// - **TCP**: [`crate::transport::TcpEngine`] (feature `transport`)
/// - **Tests**: in-memory engines recording issued commands
pub trait Engine: Send {
    /// Engine-specific error for issuing commands.
    type Error: std::error::Error + Send + 'static;

    /// Open a session and register.
    ///
    /// Lifecycle events, starting with [`Event::ConnectionSucceeded`], arrive
    /// on the returned feed.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the address is malformed or unreachable.
    fn connect(
        &mut self,
        config: &ConnectConfig,
    ) -> impl Future<Output = Result<EventFeed, ConnectionError>> + Send;

    /// Queue a command for the wire. Never blocks and never acknowledges
    /// delivery.
    fn issue(&mut self, command: Command) -> Result<(), Self::Error>;

    /// Whether a session is open.
    fn is_connected(&self) -> bool;

    /// Tear the session down.
    fn stop(&mut self);

    /// Request channel membership. The result arrives later as
    /// [`Event::ChannelJoined`].
    fn join(&mut self, channel: IrcName, key: Option<Vec<u8>>) -> Result<(), Self::Error> {
        self.issue(Command::Join { channel, key })
    }

    /// Send a line verbatim.
    fn send_raw(&mut self, line: Vec<u8>) -> Result<(), Self::Error> {
        self.issue(Command::Raw(line))
    }

    /// Send a message to a channel.
    fn send_channel_message(&mut self, channel: IrcName, text: Vec<u8>) -> Result<(), Self::Error> {
        self.issue(Command::Message { target: channel, text })
    }

    /// Send a CTCP ACTION to a channel.
    fn send_channel_action(&mut self, channel: IrcName, text: Vec<u8>) -> Result<(), Self::Error> {
        self.issue(Command::Action { target: channel, text })
    }
}
