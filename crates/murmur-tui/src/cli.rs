//! Command-line configuration.
//!
//! [`Args`] is parsed by clap and converted into the session and router
//! configuration the core consumes.

use std::path::PathBuf;

use clap::Parser;
use murmur_app::{EventFilter, RouterConfig, SessionConfig};
use murmur_client::ConnectConfig;
use murmur_proto::{EventKind, Identity, IrcName, ProtoError, TextEncoding};
use rand::Rng;

/// Minimal terminal IRC client
#[derive(Parser, Debug, Clone)]
#[command(name = "murmur")]
#[command(about = "Minimal terminal IRC client")]
#[command(version)]
pub struct Args {
    /// Server host name or address
    #[arg(short, long)]
    pub server: String,

    /// Server port
    #[arg(short, long, default_value_t = ConnectConfig::DEFAULT_PORT)]
    pub port: u16,

    /// Nickname. Defaults to a random `murmur` nick.
    #[arg(short, long)]
    pub nick: Option<String>,

    /// User name sent at registration
    #[arg(long, default_value = Identity::DEFAULT_USERNAME)]
    pub username: String,

    /// Real name sent at registration
    #[arg(long, default_value = Identity::DEFAULT_REALNAME)]
    pub realname: String,

    /// Channel to join once connected
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Text encoding label for the session (e.g. utf-8, latin1)
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Show an event kind hidden by default (repeatable), e.g. server-notice
    #[arg(long = "show", value_name = "KIND")]
    pub show: Vec<EventKind>,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Session configuration for these arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::UnknownEncoding`] for an unknown encoding label.
    pub fn session_config(&self) -> Result<SessionConfig, ProtoError> {
        let encoding = TextEncoding::for_label(&self.encoding)?;
        let nickname = self.nick.clone().unwrap_or_else(random_nick);
        let encode = |text: &str| IrcName::new(encoding.encode(text).into_owned());

        Ok(SessionConfig {
            connect: ConnectConfig {
                server: self.server.clone(),
                port: self.port,
                identity: Identity {
                    nickname: encode(&nickname),
                    username: encode(&self.username),
                    realname: encode(&self.realname),
                },
            },
            encoding,
            autojoin: self.channel.as_deref().map(encode),
        })
    }

    /// Router configuration: the default filter minus every `--show` kind.
    pub fn router_config(&self) -> RouterConfig {
        let filter = self.show.iter().fold(EventFilter::default(), |filter, kind| filter.show(*kind));
        RouterConfig { filter }
    }
}

/// `murmur` plus four random digits.
fn random_nick() -> String {
    let suffix: u16 = rand::rng().random_range(1000..10000);
    format!("murmur{suffix}")
}
