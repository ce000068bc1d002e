//! Application layer for murmur
//!
//! Pure state machines and a generic runtime for one IRC session, enabling
//! deterministic testing with the same code that runs in production.
//!
//! # Components
//!
//! - [`App`]: session state machine (connect, join, user input, inbound events)
//! - [`Router`]: maps inbound events to session updates and transcript entries
//! - [`Formatter`]: turns user intent into a local echo and a wire command
//! - [`Renderer`]: pure formatting of events and commands into styled segments
//! - [`Driver`]: trait for the display owner (input, transcript, rendering)
//! - [`Runtime`]: generic orchestration loop over a [`Driver`] and an
//!   [`Engine`](murmur_client::Engine)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod formatter;
mod input;
mod render;
mod router;
mod runtime;
mod state;
mod transcript;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use formatter::{CommandError, Formatter, Outgoing};
pub use input::UserInput;
pub use render::{Color, Renderer, Segment, Style, TranscriptEntry};
pub use router::{EventFilter, Router, RouterConfig};
pub use runtime::Runtime;
pub use state::{Channel, Session, SessionConfig, SessionState};
pub use transcript::Transcript;
