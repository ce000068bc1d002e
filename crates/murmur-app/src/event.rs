//! Application input events.
//!
//! This module defines [`AppEvent`], the inputs that drive the
//! [`crate::App`] state machine from outside the user's keyboard: protocol
//! events from the engine and connection lifecycle notices from the runtime.

use murmur_proto::Event;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Protocol event from the engine, in delivery order.
    Irc(Event),

    /// The engine could not open the session.
    ConnectFailed {
        /// Failure description.
        reason: String,
    },

    /// The event feed ended.
    ConnectionClosed,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}
