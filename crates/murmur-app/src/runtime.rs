//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Engine`]: protocol engine owning the wire
//! - [`Driver`]: display owner (input, transcript, rendering)
//!
//! The runtime is the single consumer of the engine's event feed. Events are
//! routed one at a time in arrival order, and every transcript append happens
//! here, on the display owner's task.

use std::collections::VecDeque;

use murmur_client::{ConnectConfig, Engine, Event, EventFeed};

use crate::{App, AppAction, AppEvent, Driver};

/// What woke the loop.
enum Step {
    Input(Vec<AppAction>),
    Irc(Option<Event>),
}

/// Generic runtime that orchestrates App, Engine, and Driver.
///
/// # Type Parameters
///
/// - `D`: Display driver
/// - `E`: Protocol engine
pub struct Runtime<D, E>
where
    D: Driver,
    E: Engine,
{
    driver: D,
    engine: E,
    app: App,
    feed: Option<EventFeed>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Engine,
{
    /// Create a new runtime.
    pub fn new(driver: D, engine: E, app: App) -> Self {
        Self { driver, engine, app, feed: None }
    }

    /// Run the main event loop until the user quits.
    ///
    /// Connects first. A failed connect is shown to the user and not retried;
    /// the loop keeps running so the user can read it and quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        let mut should_quit = self.process_actions(actions).await?;

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        self.engine.stop();
        self.driver.stop();
        Ok(())
    }

    /// Wait for user input or the next protocol event and handle it.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let step = tokio::select! {
            input = self.driver.poll_input(&mut self.app) => Step::Input(input?),
            event = next_event(&mut self.feed) => Step::Irc(event),
        };

        let actions = match step {
            Step::Input(actions) => actions,
            Step::Irc(Some(event)) => self.app.handle(AppEvent::Irc(event)),
            Step::Irc(None) => {
                self.feed = None;
                self.engine.stop();
                self.app.handle(AppEvent::ConnectionClosed)
            },
        };

        self.process_actions(actions).await
    }

    /// Execute actions in order.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending = VecDeque::from(actions);

        while let Some(action) = pending.pop_front() {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::Connect(config) => {
                    let follow_up = self.connect(&config).await;
                    pending.extend(follow_up);
                },
                AppAction::Display(entry) => self.driver.display(entry)?,
                AppAction::Issue(command) => {
                    if let Err(e) = self.engine.issue(command) {
                        tracing::warn!(error = %e, "Failed to issue command");
                        self.app.set_status(format!("Not sent: {e}"));
                    }
                },
            }
        }

        Ok(false)
    }

    /// Replace any current session with a new connection.
    async fn connect(&mut self, config: &ConnectConfig) -> Vec<AppAction> {
        self.feed = None;
        self.engine.stop();

        match self.engine.connect(config).await {
            Ok(feed) => {
                self.feed = Some(feed);
                vec![]
            },
            Err(e) => self.app.handle(AppEvent::ConnectFailed { reason: e.to_string() }),
        }
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Next event from the feed, or never when there is no session.
async fn next_event(feed: &mut Option<EventFeed>) -> Option<Event> {
    match feed {
        Some(feed) => feed.recv().await,
        None => std::future::pending().await,
    }
}
