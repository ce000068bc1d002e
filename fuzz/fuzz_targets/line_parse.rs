//! Fuzz target for Message::parse
//!
//! Inbound lines come straight off the socket: any byte sequence, any
//! encoding, no guarantee of a command token.
//!
//! The fuzzer should NEVER panic. Malformed lines return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_proto::Message;

fuzz_target!(|data: &[u8]| {
    let _ = Message::parse(data);
});
