//! Client
//!
//! Protocol engine for murmur. Owns the wire: registration, line framing,
//! parsing, and the translation of IRC lines into [`Event`]s.
//!
//! # Architecture
//!
//! The [`Client`] is a Sans-IO state machine. It receives raw lines, updates
//! the engine's own view of the session (our nickname, joined channels), and
//! returns [`ClientAction`]s for the caller to execute: events to deliver
//! upward and commands to write back (e.g. `PONG`).
//!
//! The [`Engine`] trait is the contract the application core depends on:
//! connect, issue fire-and-forget commands, and receive events on a single
//! ordered [`EventFeed`].
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::TcpEngine`]: [`Engine`] over a tokio TCP connection

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod engine;
mod error;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::{Client, ClientAction};
pub use engine::{ConnectConfig, Engine, EventFeed};
pub use error::{ConnectionError, EngineError};
pub use murmur_proto::{Command, Event, EventKind, Identity, IrcName};
