//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages one IRC
//! session completely decoupled from I/O and protocol mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! user intents, and produces [`crate::AppAction`] instructions for the
//! runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the current [`Session`] and replaces it on every connect.
//! - Routes protocol events through the [`Router`].
//! - Classifies typed lines and formats sends through the [`Formatter`].
//! - Joins the configured channel once the session connects.
//! - Keeps a transient status message for the UI.

use murmur_proto::{Command, Event, IrcName, TextEncoding};

use crate::{
    AppAction, AppEvent, CommandError, Formatter, Router, RouterConfig, Session, SessionConfig, SessionState,
    UserInput,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies, fully testable without a network.
#[derive(Debug, Clone)]
pub struct App {
    /// Settings for the next session.
    config: SessionConfig,
    /// Current session. `None` before the first connect.
    session: Option<Session>,
    /// Event routing policy.
    router: Router,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for `config`.
    pub fn new(config: SessionConfig, router: RouterConfig) -> Self {
        Self {
            config,
            session: None,
            router: Router::new(router),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Irc(event) => self.handle_irc(&event),
            AppEvent::ConnectFailed { reason } => {
                tracing::warn!(%reason, "Connect failed");
                self.status_message = Some(format!("Not connected: {reason}"));
                vec![AppAction::Render]
            },
            AppEvent::ConnectionClosed => {
                tracing::info!("Connection closed");
                self.status_message = Some("Connection closed".to_string());
                vec![AppAction::Render]
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
        }
    }

    fn handle_irc(&mut self, event: &Event) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(kind = %event.kind(), "Event without a session, dropping");
            return vec![];
        };

        if session.state() == SessionState::Disconnected
            && let Some(reason) = registration_failure(event, session.encoding())
        {
            tracing::warn!(%reason, "Registration refused");
            self.status_message = Some(format!("Registration failed: {reason}"));
        }

        let before = session.state();
        let entry = self.router.route(session, event);
        let after = session.state();

        let mut actions: Vec<AppAction> = entry.map(AppAction::Display).into_iter().collect();

        if before == SessionState::Disconnected && after == SessionState::Connected {
            self.status_message = Some(format!("Connected to {}", self.config.connect.addr()));
            if let Some(channel) = self.config.autojoin.clone() {
                actions.extend(self.join(channel, None));
            }
        }

        actions.push(AppAction::Render);
        actions
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Start a fresh session and ask the runtime to connect it.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.session = Some(Session::new(&self.config));
        self.status_message = Some(format!("Connecting to {}...", self.config.connect.addr()));
        vec![AppAction::Connect(self.config.connect.clone()), AppAction::Render]
    }

    /// Make `channel` current and request to join it.
    ///
    /// The joined flag flips when the server confirms with `ChannelJoined`.
    pub fn join(&mut self, channel: IrcName, key: Option<Vec<u8>>) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut().filter(|s| s.is_connected()) else {
            self.status_message = Some(CommandError::NotConnected.to_string());
            return vec![AppAction::Render];
        };

        session.request_channel(channel.clone());
        vec![AppAction::Issue(Command::Join { channel, key }), AppAction::Render]
    }

    /// Handle a line typed by the user.
    ///
    /// Empty lines are ignored; `/raw` and `/me` with nothing after them are
    /// still sent. Sends that cannot be formatted set a status message and
    /// produce no transcript entry and no command.
    pub fn submit(&mut self, line: &str) -> Vec<AppAction> {
        let Some(input) = UserInput::parse(line) else {
            return vec![];
        };

        let outgoing = match &self.session {
            None => Err(CommandError::NotConnected),
            Some(session) => {
                let formatter = Formatter::new(session);
                match input {
                    UserInput::Raw(text) => formatter.send_raw(text),
                    UserInput::Action(text) => formatter.send_action(text),
                    UserInput::Message(text) => formatter.send_message(text),
                }
            },
        };

        match outgoing {
            Ok(outgoing) => {
                if outgoing.replaced {
                    let encoding = self.config.encoding.name();
                    tracing::debug!(encoding, "Unrepresentable characters sent as references");
                    self.status_message = Some(format!("Some characters cannot be sent in {encoding}"));
                }
                let mut actions = outgoing.into_actions();
                actions.push(AppAction::Render);
                actions
            },
            Err(e) => {
                tracing::debug!(error = %e, "Send refused");
                self.status_message = Some(e.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Quit the application, saying goodbye if connected.
    pub fn quit(&self) -> Vec<AppAction> {
        if self.session.as_ref().is_some_and(Session::is_connected) {
            vec![AppAction::Issue(Command::Quit { reason: None }), AppAction::Quit]
        } else {
            vec![AppAction::Quit]
        }
    }

    /// Current session. `None` before the first connect.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Connection state of the current session.
    pub fn connection_state(&self) -> SessionState {
        self.session.as_ref().map_or(SessionState::Disconnected, Session::state)
    }

    /// Settings used for the next connect.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Event routing policy.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

/// Server replies that refuse the nickname we registered with.
const NICK_REFUSALS: [&str; 3] = ["432", "433", "436"];

/// Human-readable reason when `event` is a refused registration.
fn registration_failure(event: &Event, encoding: TextEncoding) -> Option<String> {
    let Event::ServerMessage { command, params, .. } = event else {
        return None;
    };
    if !NICK_REFUSALS.contains(&command.as_str()) {
        return None;
    }

    // <client> <nick> :<reason>
    let nick = params.get(1).map(|nick| encoding.decode(nick)).unwrap_or_default();
    let reason = params.last().map(|reason| encoding.decode(reason)).unwrap_or_default();
    Some(format!("{nick}: {reason}"))
}
