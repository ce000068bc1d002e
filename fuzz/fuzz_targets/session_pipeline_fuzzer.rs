//! Fuzz target for the inbound pipeline
//!
//! Feeds arbitrary lines through the whole receive path: wire line, client
//! translation, router, renderer. Each session uses an arbitrary encoding.
//!
//! # Invariants
//!
//! - Every line yields at most one event
//! - Every visible event yields exactly one transcript entry
//! - Session state never moves backwards
//! - NEVER panic, whatever the bytes

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use murmur_app::{App, AppAction, AppEvent, RouterConfig, SessionConfig};
use murmur_client::{Client, ClientAction};
use murmur_proto::{Identity, TextEncoding};

const ENCODINGS: [&str; 4] = ["utf-8", "latin1", "shift_jis", "koi8-r"];

#[derive(Debug, Arbitrary)]
struct Session {
    encoding: u8,
    lines: Vec<Vec<u8>>,
}

fuzz_target!(|session: Session| {
    let label = ENCODINGS[usize::from(session.encoding) % ENCODINGS.len()];
    let mut config = SessionConfig::new("irc.example.org", 6667, "tester");
    config.encoding = TextEncoding::for_label(label).unwrap_or_default();

    let mut client = Client::new(&Identity::new("tester"));
    let mut app = App::new(config, RouterConfig::default());
    let _ = app.connect();

    for line in &session.lines {
        let events: Vec<_> = client
            .handle_line(line)
            .into_iter()
            .filter_map(|a| match a {
                ClientAction::Deliver(event) => Some(event),
                ClientAction::Send(_) => None,
            })
            .collect();
        assert!(events.len() <= 1);

        for event in events {
            let hidden = app.router().filter().is_hidden(event.kind());
            let before = app.connection_state();
            let actions = app.handle(AppEvent::Irc(event));

            let displayed = actions.iter().filter(|a| matches!(a, AppAction::Display(_))).count();
            assert_eq!(displayed, usize::from(!hidden));
            assert!(app.connection_state() >= before);
        }
    }
});
