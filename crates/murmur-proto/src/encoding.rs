//! Text encoding for display.
//!
//! IRC carries bytes. A session declares the encoding its peers are expected
//! to use, and every decode through [`TextEncoding`] is best-effort: malformed
//! sequences become U+FFFD instead of failing.

use std::{borrow::Cow, fmt};

use encoding_rs::Encoding;

use crate::ProtoError;

/// Character encoding used to decode names and bodies for display.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// UTF-8, the default for new sessions.
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Resolve a WHATWG encoding label such as `utf-8` or `latin1`.
    pub fn for_label(label: &str) -> Result<Self, ProtoError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| ProtoError::UnknownEncoding(label.to_owned()))
    }

    /// Canonical encoding name.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decode bytes, replacing malformed sequences with U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        self.decode_checked(bytes).0
    }

    /// Decode bytes and report whether any replacement was needed.
    pub fn decode_checked<'a>(&self, bytes: &'a [u8]) -> (Cow<'a, str>, bool) {
        self.0.decode_without_bom_handling(bytes)
    }

    /// Encode text for the wire.
    ///
    /// Characters the encoding cannot represent become HTML numeric character
    /// references, per `encoding_rs`.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        self.encode_checked(text).0
    }

    /// Encode text and report whether any character had to be replaced by a
    /// numeric character reference.
    pub fn encode_checked<'a>(&self, text: &'a str) -> (Cow<'a, [u8]>, bool) {
        let (bytes, _, replaced) = self.0.encode(text);
        (bytes, replaced)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}
