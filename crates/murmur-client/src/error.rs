//! Engine error types.

use thiserror::Error;

/// Errors raised while establishing a session.
///
/// A connection error is terminal for that attempt: the core surfaces it as
/// "not connected" and does not retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Server address or port is malformed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Server could not be reached.
    #[error("cannot reach {addr}: {reason}")]
    Unreachable {
        /// Address that was dialed.
        addr: String,
        /// Underlying failure.
        reason: String,
    },

    /// Engine is already running a session.
    #[error("already connected")]
    AlreadyConnected,
}

/// Errors raised when issuing a command.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// No session has been established.
    #[error("not connected")]
    NotConnected,

    /// Session has ended; the command was dropped.
    #[error("connection closed")]
    Closed,
}
