//! Fuzz target for Command::to_lines
//!
//! User input and channel names end up in outbound lines. No parameter may
//! smuggle a second command onto the wire.
//!
//! # Invariants
//!
//! - No encoded line contains CR, LF or NUL
//! - No encoded line exceeds MAX_LINE_LEN
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use murmur_proto::{Command, IrcName, MAX_LINE_LEN};

#[derive(Debug, Arbitrary)]
enum Input {
    Join { channel: Vec<u8>, key: Option<Vec<u8>> },
    Raw(Vec<u8>),
    Message { target: Vec<u8>, text: Vec<u8> },
    Action { target: Vec<u8>, text: Vec<u8> },
    Pong(Vec<u8>),
    Quit(Option<Vec<u8>>),
}

fuzz_target!(|input: Input| {
    let command = match input {
        Input::Join { channel, key } => Command::Join { channel: IrcName::new(channel), key },
        Input::Raw(raw) => Command::Raw(raw),
        Input::Message { target, text } => Command::Message { target: IrcName::new(target), text },
        Input::Action { target, text } => Command::Action { target: IrcName::new(target), text },
        Input::Pong(token) => Command::Pong(token),
        Input::Quit(reason) => Command::Quit { reason },
    };

    for line in command.to_lines() {
        assert!(line.len() <= MAX_LINE_LEN);
        assert!(!line.iter().any(|b| matches!(b, b'\r' | b'\n' | 0)));
    }
});
