//! IRC vocabulary for murmur.
//!
//! Sans-IO types shared by the protocol engine and the application core. IRC
//! names and bodies are byte strings with no guaranteed encoding, so every type
//! here keeps the raw bytes as the canonical form and decodes only for display.
//!
//! # Components
//!
//! - [`IrcName`] / [`Identity`]: byte-string names compared as bytes
//! - [`TextEncoding`]: best-effort decoding for display
//! - [`Event`] / [`EventKind`]: inbound protocol occurrences
//! - [`Command`]: outbound wire commands and their line encoding
//! - [`Message`]: parsed inbound IRC line
//! - [`ctcp`]: CTCP ACTION framing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ctcp;

mod command;
mod encoding;
mod error;
mod event;
mod message;
mod name;

pub use command::{Command, MAX_LINE_LEN};
pub use encoding::TextEncoding;
pub use error::ProtoError;
pub use event::{Event, EventKind};
pub use message::{Message, nick_of};
pub use name::{Identity, IrcName};
