//! Terminal UI for murmur
//!
//! A thin shell over [`murmur_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`murmur_app::Runtime`].
//!
//! This crate only handles terminal input, rendering, and command-line
//! configuration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod input;
pub mod terminal;
pub mod ui;

pub use cli::Args;
pub use input::{InputState, KeyInput};
pub use murmur_app::{App, AppAction, AppEvent, Driver, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
