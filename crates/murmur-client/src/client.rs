//! Line-to-event state machine.
//!
//! The [`Client`] turns parsed IRC lines into [`Event`]s. It is the engine's
//! registry: it knows our current nickname (to tell our own joins, parts and
//! nick changes from other users') and which channels we are in, keyed by
//! channel bytes.
//!
//! Malformed lines and lines missing required parameters are logged and
//! skipped. One bad line never stops the feed.

use std::collections::BTreeSet;

use murmur_proto::{Command, Event, Identity, IrcName, Message, ctcp, nick_of};

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Deliver an event to the application.
    Deliver(Event),
    /// Write a command back to the server.
    Send(Command),
}

/// Sans-IO IRC client state.
#[derive(Debug, Clone)]
pub struct Client {
    /// Our nickname as the server knows it.
    nickname: IrcName,
    /// Registration completed (`001` seen).
    registered: bool,
    /// Channels we are in.
    channels: BTreeSet<IrcName>,
}

impl Client {
    /// Create a client that will register as `identity`.
    pub fn new(identity: &Identity) -> Self {
        Self { nickname: identity.nickname.clone(), registered: false, channels: BTreeSet::new() }
    }

    /// Our current nickname.
    pub fn nickname(&self) -> &IrcName {
        &self.nickname
    }

    /// Whether registration has completed.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Channels we are currently in.
    pub fn channels(&self) -> &BTreeSet<IrcName> {
        &self.channels
    }

    /// Parse and handle one raw line.
    pub fn handle_line(&mut self, line: &[u8]) -> Vec<ClientAction> {
        match Message::parse(line) {
            Ok(msg) => self.handle_message(msg),
            Err(e) => {
                tracing::warn!(error = %e, line = %String::from_utf8_lossy(line), "Dropping malformed line");
                vec![]
            },
        }
    }

    /// Handle one parsed message.
    pub fn handle_message(&mut self, msg: Message) -> Vec<ClientAction> {
        let actions = match msg.command.as_str() {
            "001" => self.handle_welcome(msg),
            "PING" => {
                let token = msg.param(0).unwrap_or_default().to_vec();
                vec![ClientAction::Send(Command::Pong(token))]
            },
            "NICK" => self.handle_nick(&msg),
            "QUIT" => {
                let nick = IrcName::from(nick_of(msg.origin().as_bytes()));
                let reason = msg.param(0).unwrap_or_default().to_vec();
                deliver(Event::UserQuit { nick, reason })
            },
            "JOIN" => self.handle_join(&msg),
            "PART" => self.handle_part(&msg),
            "KICK" => self.handle_kick(&msg),
            "MODE" => handle_mode(&msg),
            "TOPIC" => match (msg.param(0), msg.param(1)) {
                (Some(channel), Some(topic)) => deliver(Event::TopicSet {
                    channel: channel.into(),
                    topic: topic.to_vec(),
                    by: msg.origin(),
                }),
                _ => missing_params(&msg),
            },
            "INVITE" => match msg.param(1) {
                Some(channel) => deliver(Event::Invited { channel: channel.into(), by: msg.origin() }),
                None => missing_params(&msg),
            },
            "PRIVMSG" => handle_privmsg(&msg),
            "NOTICE" => self.handle_notice(&msg),
            _ => server_message(msg),
        };

        tracing::trace!(count = actions.len(), "Translated line");
        actions
    }

    fn handle_welcome(&mut self, msg: Message) -> Vec<ClientAction> {
        if self.registered {
            return server_message(msg);
        }

        self.registered = true;
        if let Some(nick) = msg.param(0) {
            self.nickname = nick.into();
        }
        tracing::info!(nick = %String::from_utf8_lossy(self.nickname.as_bytes()), "Registered");
        deliver(Event::ConnectionSucceeded)
    }

    fn handle_nick(&mut self, msg: &Message) -> Vec<ClientAction> {
        let Some(new) = msg.param(0) else {
            return missing_params(msg);
        };

        let origin = msg.origin();
        let old = nick_of(origin.as_bytes());
        let is_self = self.is_self(old);
        let old = IrcName::from(old);
        let new = IrcName::from(new);
        if is_self {
            self.nickname = new.clone();
        }

        deliver(Event::NickChanged { old, new, is_self })
    }

    fn handle_join(&mut self, msg: &Message) -> Vec<ClientAction> {
        let Some(channel) = msg.param(0) else {
            return missing_params(msg);
        };

        let channel = IrcName::from(channel);
        let origin = msg.origin();
        if self.is_self(nick_of(origin.as_bytes())) {
            self.channels.insert(channel.clone());
            deliver(Event::ChannelJoined { channel })
        } else {
            deliver(Event::UserJoined { channel, nick: origin })
        }
    }

    fn handle_part(&mut self, msg: &Message) -> Vec<ClientAction> {
        let Some(channel) = msg.param(0) else {
            return missing_params(msg);
        };

        let channel = IrcName::from(channel);
        let origin = msg.origin();
        let is_self = self.is_self(nick_of(origin.as_bytes()));
        if is_self {
            self.channels.remove(&channel);
        }

        deliver(Event::UserParted {
            channel,
            nick: origin,
            reason: msg.param(1).unwrap_or_default().to_vec(),
            is_self,
        })
    }

    fn handle_kick(&mut self, msg: &Message) -> Vec<ClientAction> {
        let (Some(channel), Some(nick)) = (msg.param(0), msg.param(1)) else {
            return missing_params(msg);
        };

        let channel = IrcName::from(channel);
        let is_self = self.is_self(nick);
        if is_self {
            self.channels.remove(&channel);
        }

        deliver(Event::UserKicked {
            channel,
            nick: nick.into(),
            reason: msg.param(2).unwrap_or_default().to_vec(),
            by: msg.origin(),
            is_self,
        })
    }

    fn handle_notice(&self, msg: &Message) -> Vec<ClientAction> {
        let (Some(target), Some(notice)) = (msg.param(0), msg.param(1)) else {
            return missing_params(msg);
        };

        let target = IrcName::from(target);
        let from_user = msg.prefix.as_ref().is_some_and(|p| p.as_bytes().contains(&b'!'));

        if target.is_channel() {
            deliver(Event::NoticeSent { channel: target, notice: notice.to_vec(), by: msg.origin() })
        } else if from_user && self.registered {
            deliver(Event::PrivateNotice { nick: msg.origin(), notice: notice.to_vec() })
        } else {
            deliver(Event::ServerNotice { origin: msg.origin(), params: msg.params.clone() })
        }
    }

    /// Nick comparison under ASCII case folding, on bytes.
    fn is_self(&self, nick: &[u8]) -> bool {
        nick.eq_ignore_ascii_case(self.nickname.as_bytes())
    }
}

fn handle_mode(msg: &Message) -> Vec<ClientAction> {
    let (Some(target), Some(mode)) = (msg.param(0), msg.param(1)) else {
        return missing_params(msg);
    };

    let target = IrcName::from(target);
    if target.is_channel() {
        let params = msg.params.get(2..).unwrap_or_default().join(&b' ');
        deliver(Event::ChannelModeSet { channel: target, mode: mode.to_vec(), params, by: msg.origin() })
    } else {
        deliver(Event::ModeSet { mode: mode.to_vec(), by: msg.origin() })
    }
}

fn handle_privmsg(msg: &Message) -> Vec<ClientAction> {
    let (Some(target), Some(text)) = (msg.param(0), msg.param(1)) else {
        return missing_params(msg);
    };

    let target = IrcName::from(target);
    let origin = msg.origin();

    if let Some(action) = ctcp::action_body(text) {
        let action = action.to_vec();
        return if target.is_channel() {
            deliver(Event::ActionPerformed { channel: target, action, by: origin })
        } else {
            deliver(Event::PrivateAction { nick: origin, action })
        };
    }

    if text.first() == Some(&ctcp::DELIM) {
        tracing::debug!(ctcp = %String::from_utf8_lossy(text), "Ignoring CTCP query");
        return vec![];
    }

    if target.is_channel() {
        deliver(Event::MessageSent { channel: target, message: text.to_vec(), by: origin })
    } else {
        deliver(Event::PrivateMessage { nick: origin, message: text.to_vec() })
    }
}

fn server_message(msg: Message) -> Vec<ClientAction> {
    let origin = msg.origin();
    deliver(Event::ServerMessage { origin, command: msg.command, params: msg.params })
}

fn deliver(event: Event) -> Vec<ClientAction> {
    vec![ClientAction::Deliver(event)]
}

fn missing_params(msg: &Message) -> Vec<ClientAction> {
    tracing::warn!(command = %msg.command, params = msg.params.len(), "Dropping line with missing parameters");
    vec![]
}
