//! Driver trait for abstracting display I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific
//! frontend. Each frontend implements the trait to provide user input and a
//! transcript display, while the generic [`crate::Runtime`] handles all
//! orchestration. The driver is the display owner: every transcript append
//! happens through it, on the runtime's task.

use std::future::Future;

use crate::{App, AppAction, TranscriptEntry};

/// Abstracts the display owner for the application runtime.
///
/// # Implementations
///
/// - **TUI**: crossterm for keyboard input, ratatui for rendering
/// - **Tests**: scripted input, recorded transcript
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for user input and apply it to `app`.
    ///
    /// Returns the resulting actions, possibly none. Must be cancel-safe: the
    /// runtime drops the future when a protocol event arrives first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn poll_input(&mut self, app: &mut App) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Append an entry to the transcript display.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be updated.
    fn display(&mut self, entry: TranscriptEntry) -> Result<(), Self::Error>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release display resources.
    fn stop(&mut self);
}
