//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.
//! Actions are executed in order; a [`AppAction::Display`] echo always
//! precedes the [`AppAction::Issue`] it belongs to.

use murmur_client::ConnectConfig;
use murmur_proto::Command;

use crate::TranscriptEntry;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open a session with the engine.
    Connect(ConnectConfig),

    /// Append an entry to the transcript.
    Display(TranscriptEntry),

    /// Hand a command to the engine.
    Issue(Command),
}
