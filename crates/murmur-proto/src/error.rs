//! Protocol vocabulary errors.

use thiserror::Error;

/// Errors raised while parsing lines or resolving protocol vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// Line contained nothing but whitespace or line terminators.
    #[error("empty line")]
    EmptyLine,

    /// Line had a prefix or tags but no command token.
    #[error("missing command")]
    MissingCommand,

    /// Command token was neither a word nor a three-digit numeric.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    /// Encoding label not recognised.
    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// Event kind name not recognised.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),
}
