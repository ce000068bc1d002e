//! Byte-string names.
//!
//! Nicknames, usernames and channel names are opaque bytes on the wire. An
//! [`IrcName`] compares, hashes and orders by its bytes; the decoded form from
//! [`IrcName::display`] exists only for rendering and must never be used as a
//! lookup key.

use std::{borrow::Cow, fmt};

use crate::TextEncoding;

/// Channel type prefixes recognised by [`IrcName::is_channel`].
const CHANNEL_PREFIXES: &[u8] = b"#&+!";

/// An IRC name (nick, user, channel, origin) held as raw bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IrcName(Vec<u8>);

impl IrcName {
    /// Wrap raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Canonical byte form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the canonical byte form.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Whether the name has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the name starts with a channel type prefix.
    pub fn is_channel(&self) -> bool {
        self.0.first().is_some_and(|b| CHANNEL_PREFIXES.contains(b))
    }

    /// Best-effort decoded form for display.
    pub fn display(&self, encoding: TextEncoding) -> Cow<'_, str> {
        encoding.decode(&self.0)
    }
}

impl fmt::Debug for IrcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IrcName").field(&String::from_utf8_lossy(&self.0)).finish()
    }
}

impl From<&str> for IrcName {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for IrcName {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&[u8]> for IrcName {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for IrcName {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Registration identity sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Requested nickname.
    pub nickname: IrcName,
    /// Username (ident) field of `USER`.
    pub username: IrcName,
    /// Realname field of `USER`.
    pub realname: IrcName,
}

impl Identity {
    /// Username used when none is configured.
    pub const DEFAULT_USERNAME: &'static str = "murmur";

    /// Realname used when none is configured.
    pub const DEFAULT_REALNAME: &'static str = "Murmur";

    /// Identity with the default username and realname.
    pub fn new(nickname: impl Into<IrcName>) -> Self {
        Self {
            nickname: nickname.into(),
            username: Self::DEFAULT_USERNAME.into(),
            realname: Self::DEFAULT_REALNAME.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_key_by_bytes_not_display() {
        // Two distinct invalid sequences decode to the same display text
        let a = IrcName::new(b"#caf\xe9".to_vec());
        let b = IrcName::new(b"#caf\xff".to_vec());
        let encoding = TextEncoding::utf8();
        assert_eq!(a.display(encoding), b.display(encoding));

        let set: HashSet<IrcName> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn channel_prefixes() {
        assert!(IrcName::from("#rust").is_channel());
        assert!(IrcName::from("&local").is_channel());
        assert!(!IrcName::from("alice").is_channel());
        assert!(!IrcName::default().is_channel());
    }
}
