//! Inbound event routing.
//!
//! The [`Router`] consumes events one at a time in delivery order. For each
//! event it first applies any session update, then produces at most one
//! transcript entry. Only kinds hidden by the [`EventFilter`] produce none.
//!
//! Session updates:
//! - `ConnectionSucceeded`: `Disconnected → Connected`, ignored afterwards.
//! - `ChannelJoined`: the joined channel becomes current with `joined = true`.
//!   Ignored while disconnected.
//! - `NickChanged` for our own nick: later echoes use the new nick.

use std::collections::BTreeSet;

use murmur_proto::{Event, EventKind};

use crate::{Renderer, Session, TranscriptEntry};

/// Set of event kinds that are routed but not shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    hidden: BTreeSet<EventKind>,
}

impl EventFilter {
    /// Kinds hidden by default.
    pub const DEFAULT_HIDDEN: [EventKind; 4] = [
        EventKind::ServerMessage,
        EventKind::ServerNotice,
        EventKind::Invited,
        EventKind::PrivateAction,
    ];

    /// Filter that hides nothing.
    pub fn show_all() -> Self {
        Self { hidden: BTreeSet::new() }
    }

    /// Hide `kind`.
    #[must_use]
    pub fn hide(mut self, kind: EventKind) -> Self {
        self.hidden.insert(kind);
        self
    }

    /// Stop hiding `kind`.
    #[must_use]
    pub fn show(mut self, kind: EventKind) -> Self {
        self.hidden.remove(&kind);
        self
    }

    /// Whether events of `kind` are hidden.
    pub fn is_hidden(&self, kind: EventKind) -> bool {
        self.hidden.contains(&kind)
    }

    /// Hidden kinds in a stable order.
    pub fn hidden(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.hidden.iter().copied()
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self { hidden: Self::DEFAULT_HIDDEN.into_iter().collect() }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Kinds not rendered to the transcript.
    pub filter: EventFilter,
}

/// Maps inbound events to session updates and transcript entries.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Create a router.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Active filter.
    pub fn filter(&self) -> &EventFilter {
        &self.config.filter
    }

    /// Route one event. Returns the entry to display, if any.
    pub fn route(&self, session: &mut Session, event: &Event) -> Option<TranscriptEntry> {
        match event {
            Event::ConnectionSucceeded => {
                if !session.mark_connected() {
                    tracing::debug!("Session already connected");
                }
            },
            Event::ChannelJoined { channel } => {
                if !session.mark_joined(channel.clone()) {
                    tracing::warn!(
                        channel = %channel.display(session.encoding()),
                        "Channel joined before connection, ignoring"
                    );
                }
            },
            Event::NickChanged { new, is_self: true, .. } => session.set_nickname(new.clone()),
            _ => {},
        }

        let kind = event.kind();
        if self.config.filter.is_hidden(kind) {
            tracing::debug!(%kind, "Filtered event");
            return None;
        }

        Some(Renderer::new(session.encoding()).event(event))
    }
}
