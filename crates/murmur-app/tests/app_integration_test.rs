//! Integration tests for App and Runtime behavior.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Session state reflects the events delivered
//! - Transcript entries and wire commands appear in the expected order
//! - Local echoes precede the commands they belong to

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

use murmur_app::{
    App, AppAction, AppEvent, Color, Driver, Runtime, RouterConfig, Segment, SessionConfig, SessionState,
    Style, TranscriptEntry,
};
use murmur_client::{ConnectConfig, ConnectionError, Engine, EngineError, EventFeed};
use murmur_proto::{Command, Event, IrcName};
use tokio::sync::mpsc;

fn plain(text: &str) -> Segment {
    Segment { text: text.into(), style: Style::Plain }
}

fn bold(text: &str) -> Segment {
    Segment { text: text.into(), style: Style::Bold }
}

fn test_config() -> SessionConfig {
    SessionConfig::new("irc.example.org", 6667, "tester")
}

/// Create an App with a live session in `#test`.
fn joined_app(channel: &str) -> App {
    let mut app = App::new(test_config(), RouterConfig::default());
    let _ = app.connect();
    let _ = app.handle(AppEvent::Irc(Event::ConnectionSucceeded));
    let _ = app.handle(AppEvent::Irc(Event::ChannelJoined { channel: channel.into() }));
    app
}

fn displays(actions: &[AppAction]) -> Vec<&TranscriptEntry> {
    actions
        .iter()
        .filter_map(|a| match a {
            AppAction::Display(entry) => Some(entry),
            _ => None,
        })
        .collect()
}

fn issues(actions: &[AppAction]) -> Vec<&Command> {
    actions
        .iter()
        .filter_map(|a| match a {
            AppAction::Issue(command) => Some(command),
            _ => None,
        })
        .collect()
}

#[test]
fn connect_join_and_receive() {
    let mut app = App::new(test_config(), RouterConfig::default());

    let actions = app.connect();
    assert!(matches!(actions.first(), Some(AppAction::Connect(ConnectConfig { port: 6667, .. }))));

    let _ = app.handle(AppEvent::Irc(Event::ConnectionSucceeded));
    assert_eq!(app.connection_state(), SessionState::Connected);

    let actions = app.join("#room".into(), None);
    assert_eq!(issues(&actions), vec![&Command::Join { channel: "#room".into(), key: None }]);

    let _ = app.handle(AppEvent::Irc(Event::ChannelJoined { channel: "#room".into() }));
    assert_eq!(app.connection_state(), SessionState::ChannelJoined);
    let channel = app.session().and_then(|s| s.current_channel()).cloned();
    assert_eq!(channel.map(|c| (c.name, c.joined)), Some((IrcName::from("#room"), true)));

    let actions = app.handle(AppEvent::Irc(Event::MessageSent {
        channel: "#room".into(),
        message: b"hi there".to_vec(),
        by: "alice".into(),
    }));
    let entries = displays(&actions);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].segments(), &[plain("\n"), bold("alice"), bold(": "), plain("hi there")]);
}

#[test]
fn message_echo_precedes_privmsg() {
    let mut app = joined_app("#chan");
    let actions = app.submit("hi");

    let echo_at = actions.iter().position(|a| matches!(a, AppAction::Display(_)));
    let issue_at = actions.iter().position(|a| matches!(a, AppAction::Issue(_)));
    assert!(echo_at < issue_at, "echo must precede the command: {actions:?}");
    assert_eq!(issues(&actions), vec![&Command::Message { target: "#chan".into(), text: b"hi".to_vec() }]);
}

#[test]
fn input_prefix_dispatch() {
    let mut app = joined_app("#test");

    let actions = app.submit("/raw WHOIS foo");
    assert_eq!(issues(&actions), vec![&Command::Raw(b"WHOIS foo".to_vec())]);
    let blue = Style::Colored(Color::Blue);
    assert_eq!(displays(&actions)[0].segments(), &[
        plain("\n"),
        Segment { text: "\tSENT: ".into(), style: blue },
        Segment { text: "WHOIS foo".into(), style: blue },
    ]);

    let actions = app.submit("/me waves");
    assert_eq!(issues(&actions), vec![&Command::Action { target: "#test".into(), text: b"waves".to_vec() }]);
    assert_eq!(displays(&actions)[0].segments(), &[plain("\n\t *"), bold("tester"), bold(" "), plain("waves")]);

    let actions = app.submit("hello");
    assert_eq!(issues(&actions), vec![&Command::Message { target: "#test".into(), text: b"hello".to_vec() }]);
    assert_eq!(displays(&actions)[0].segments(), &[plain("\n"), bold("tester"), bold(": "), plain("hello")]);
}

#[test]
fn send_before_join_uses_requested_channel() {
    let mut app = App::new(test_config(), RouterConfig::default());
    let _ = app.connect();
    let _ = app.handle(AppEvent::Irc(Event::ConnectionSucceeded));
    let _ = app.join("#pending".into(), None);

    let actions = app.submit("early");
    assert_eq!(issues(&actions), vec![&Command::Message {
        target: "#pending".into(),
        text: b"early".to_vec()
    }]);
}

#[test]
fn nick_change_renames_echo() {
    let mut app = joined_app("#test");
    let _ = app.handle(AppEvent::Irc(Event::NickChanged {
        old: "tester".into(),
        new: "tester_".into(),
        is_self: true,
    }));

    let actions = app.submit("still me");
    assert_eq!(displays(&actions)[0].text(), "\ntester_: still me");
}

#[test]
fn refused_send_has_no_side_effects() {
    let mut app = App::new(test_config(), RouterConfig::default());
    let _ = app.connect();
    let _ = app.handle(AppEvent::Irc(Event::ConnectionSucceeded));

    let actions = app.submit("/me waves");
    assert!(displays(&actions).is_empty());
    assert!(issues(&actions).is_empty());
    assert!(app.status_message().is_some());
}

// Runtime harness

/// Everything the display and the engine saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Record {
    Display(String),
    Issue(Command),
}

type Log = Arc<Mutex<Vec<Record>>>;

fn push(log: &Log, record: Record) {
    if let Ok(mut log) = log.lock() {
        log.push(record);
    }
}

fn snapshot(log: &Log) -> Vec<Record> {
    log.lock().map(|log| log.clone()).unwrap_or_default()
}

/// Engine that records issued commands and serves a prepared feed.
struct FakeEngine {
    log: Log,
    feed: Option<EventFeed>,
    fail_with: Option<ConnectionError>,
    connected: bool,
}

impl Engine for FakeEngine {
    type Error = EngineError;

    async fn connect(&mut self, _config: &ConnectConfig) -> Result<EventFeed, ConnectionError> {
        if let Some(e) = self.fail_with.take() {
            return Err(e);
        }
        self.connected = true;
        self.feed.take().ok_or(ConnectionError::AlreadyConnected)
    }

    fn issue(&mut self, command: Command) -> Result<(), EngineError> {
        if !self.connected {
            return Err(EngineError::NotConnected);
        }
        push(&self.log, Record::Issue(command));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn stop(&mut self) {
        self.connected = false;
    }
}

/// When a scripted input becomes available.
enum Wait {
    Entries(usize),
    Status(&'static str),
}

enum Input {
    Line(&'static str),
    Quit,
}

/// Driver replaying typed input once the transcript reaches a given point.
struct ScriptedDriver {
    log: Log,
    script: Vec<(Wait, Input)>,
    entries: usize,
    statuses: Arc<Mutex<Vec<String>>>,
}

impl Driver for ScriptedDriver {
    type Error = Infallible;

    async fn poll_input(&mut self, app: &mut App) -> Result<Vec<AppAction>, Infallible> {
        let ready = match self.script.first() {
            Some((Wait::Entries(n), _)) => self.entries >= *n,
            Some((Wait::Status(status), _)) => app.status_message() == Some(*status),
            None => false,
        };
        if !ready {
            std::future::pending::<()>().await;
        }

        let (_, input) = self.script.remove(0);
        Ok(match input {
            Input::Line(line) => app.submit(line),
            Input::Quit => app.quit(),
        })
    }

    fn display(&mut self, entry: TranscriptEntry) -> Result<(), Infallible> {
        self.entries += 1;
        push(&self.log, Record::Display(entry.text()));
        Ok(())
    }

    fn render(&mut self, app: &App) -> Result<(), Infallible> {
        if let (Some(status), Ok(mut statuses)) = (app.status_message(), self.statuses.lock()) {
            if statuses.last().map(String::as_str) != Some(status) {
                statuses.push(status.to_string());
            }
        }
        Ok(())
    }

    fn stop(&mut self) {}
}

fn feed_with(events: Vec<Event>) -> (mpsc::Sender<Event>, EventFeed) {
    let (tx, rx) = mpsc::channel(events.len().max(1));
    for event in events {
        let _ = tx.try_send(event);
    }
    (tx, rx)
}

#[tokio::test]
async fn runtime_session_round_trip() {
    let log = Log::default();
    let statuses = Arc::default();
    let (_tx, feed) = feed_with(vec![
        Event::ConnectionSucceeded,
        Event::ChannelJoined { channel: "#room".into() },
        Event::MessageSent { channel: "#room".into(), message: b"hi there".to_vec(), by: "alice!a@h".into() },
    ]);

    let engine = FakeEngine { log: log.clone(), feed: Some(feed), fail_with: None, connected: false };
    let driver = ScriptedDriver {
        log: log.clone(),
        script: vec![
            (Wait::Entries(3), Input::Line("hello")),
            (Wait::Entries(4), Input::Line("/me waves")),
            (Wait::Entries(5), Input::Line("/raw WHOIS foo")),
            (Wait::Entries(6), Input::Quit),
        ],
        entries: 0,
        statuses: Arc::clone(&statuses),
    };

    let mut config = test_config();
    config.autojoin = Some("#room".into());
    let app = App::new(config, RouterConfig::default());

    let result = Runtime::new(driver, engine, app).run().await;
    assert!(result.is_ok());

    assert_eq!(snapshot(&log), vec![
        Record::Display("\n\t*** Connected".into()),
        Record::Issue(Command::Join { channel: "#room".into(), key: None }),
        Record::Display("\n\t*** Now talking on #room".into()),
        Record::Display("\nalice: hi there".into()),
        Record::Display("\ntester: hello".into()),
        Record::Issue(Command::Message { target: "#room".into(), text: b"hello".to_vec() }),
        Record::Display("\n\t *tester waves".into()),
        Record::Issue(Command::Action { target: "#room".into(), text: b"waves".to_vec() }),
        Record::Display("\n\tSENT: WHOIS foo".into()),
        Record::Issue(Command::Raw(b"WHOIS foo".to_vec())),
        Record::Issue(Command::Quit { reason: None }),
    ]);
}

#[tokio::test]
async fn runtime_reports_connect_failure() {
    let log = Log::default();
    let statuses: Arc<Mutex<Vec<String>>> = Arc::default();
    let failure = ConnectionError::Unreachable { addr: "irc.example.org:6667".into(), reason: "refused".into() };

    let engine = FakeEngine { log: log.clone(), feed: None, fail_with: Some(failure), connected: false };
    let driver = ScriptedDriver {
        log: log.clone(),
        script: vec![(Wait::Entries(0), Input::Line("hello")), (Wait::Entries(0), Input::Quit)],
        entries: 0,
        statuses: Arc::clone(&statuses),
    };

    let result = Runtime::new(driver, engine, App::new(test_config(), RouterConfig::default())).run().await;
    assert!(result.is_ok());

    // Nothing reached the wire or the transcript
    assert!(snapshot(&log).is_empty());
    let statuses = statuses.lock().map(|s| s.clone()).unwrap_or_default();
    assert!(statuses.iter().any(|s| s == "Not connected: cannot reach irc.example.org:6667: refused"));
    assert_eq!(statuses.last().map(String::as_str), Some("Not connected"));
}

#[tokio::test]
async fn runtime_notices_closed_feed() {
    let log = Log::default();
    let statuses: Arc<Mutex<Vec<String>>> = Arc::default();
    let (tx, feed) = feed_with(vec![Event::ConnectionSucceeded]);
    drop(tx);

    let engine = FakeEngine { log: log.clone(), feed: Some(feed), fail_with: None, connected: false };
    let driver = ScriptedDriver {
        log: log.clone(),
        script: vec![(Wait::Status("Connection closed"), Input::Quit)],
        entries: 0,
        statuses: Arc::clone(&statuses),
    };

    let result = Runtime::new(driver, engine, App::new(test_config(), RouterConfig::default())).run().await;
    assert!(result.is_ok());

    assert_eq!(snapshot(&log), vec![Record::Display("\n\t*** Connected".into())]);
}
