//! Inbound IRC line parsing.
//!
//! Parses one line (`[@tags] [:prefix] COMMAND params... [:trailing]`) into a
//! [`Message`]. Parameters stay as bytes; only the command token, which the
//! grammar restricts to ASCII, becomes a `String`. IRCv3 tags are skipped.

use crate::{IrcName, ProtoError};

/// A parsed IRC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Origin prefix without the leading `:`. `None` if the line had none.
    pub prefix: Option<IrcName>,
    /// Command verb, uppercased, or a three-digit numeric.
    pub command: String,
    /// Parameters, with the trailing parameter last.
    pub params: Vec<Vec<u8>>,
}

impl Message {
    /// Parse a single line. Trailing CR/LF is ignored.
    pub fn parse(line: &[u8]) -> Result<Self, ProtoError> {
        let mut rest = trim_line_end(line);
        if rest.iter().all(|b| *b == b' ') {
            return Err(ProtoError::EmptyLine);
        }

        if rest.first() == Some(&b'@') {
            rest = split_token(rest).1;
        }

        let prefix = if rest.first() == Some(&b':') {
            let (token, remainder) = split_token(&rest[1..]);
            rest = remainder;
            Some(IrcName::from(token))
        } else {
            None
        };

        let (token, mut rest) = split_token(rest);
        if token.is_empty() {
            return Err(ProtoError::MissingCommand);
        }
        let command = parse_command(token)?;

        let mut params = Vec::new();
        loop {
            rest = skip_spaces(rest);
            if rest.is_empty() {
                break;
            }
            if rest[0] == b':' {
                params.push(rest[1..].to_vec());
                break;
            }
            let (param, remainder) = split_token(rest);
            params.push(param.to_vec());
            rest = remainder;
        }

        Ok(Self { prefix, command, params })
    }

    /// Parameter at `index`. `None` if absent.
    pub fn param(&self, index: usize) -> Option<&[u8]> {
        self.params.get(index).map(Vec::as_slice)
    }

    /// Origin prefix, or an empty name when the line had none.
    pub fn origin(&self) -> IrcName {
        self.prefix.clone().unwrap_or_default()
    }
}

/// Nickname portion of an origin prefix (`nick!user@host` → `nick`).
///
/// Bare nicknames and server names are returned unchanged.
pub fn nick_of(prefix: &[u8]) -> &[u8] {
    let end = prefix.iter().position(|b| *b == b'!' || *b == b'@').unwrap_or(prefix.len());
    &prefix[..end]
}

fn parse_command(token: &[u8]) -> Result<String, ProtoError> {
    let is_word = token.iter().all(u8::is_ascii_alphabetic);
    let is_numeric = token.len() == 3 && token.iter().all(u8::is_ascii_digit);
    if !is_word && !is_numeric {
        return Err(ProtoError::InvalidCommand(String::from_utf8_lossy(token).into_owned()));
    }
    Ok(String::from_utf8_lossy(token).to_ascii_uppercase())
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let end = line.iter().rposition(|b| *b != b'\r' && *b != b'\n').map_or(0, |i| i + 1);
    &line[..end]
}

fn skip_spaces(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|b| *b != b' ').unwrap_or(input.len());
    &input[start..]
}

/// Split at the first space, returning the token and the input after it.
fn split_token(input: &[u8]) -> (&[u8], &[u8]) {
    let input = skip_spaces(input);
    match input.iter().position(|b| *b == b' ') {
        Some(i) => (&input[..i], &input[i + 1..]),
        None => (input, &input[input.len()..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_privmsg_with_prefix_and_trailing() {
        let msg = Message::parse(b":alice!a@host PRIVMSG #room :hi there\r\n").unwrap();
        assert_eq!(msg.prefix, Some(IrcName::from("alice!a@host")));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec![b"#room".to_vec(), b"hi there".to_vec()]);
    }

    #[test]
    fn parses_numeric_without_trailing_colon() {
        let msg = Message::parse(b":irc.example.org 001 tester Welcome").unwrap();
        assert_eq!(msg.command, "001");
        assert_eq!(msg.params, vec![b"tester".to_vec(), b"Welcome".to_vec()]);
    }

    #[test]
    fn skips_tags_and_lowercase_command() {
        let msg = Message::parse(b"@time=2020 :srv ping :token").unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.param(0), Some(&b"token"[..]));
    }

    #[test]
    fn keeps_invalid_utf8_params() {
        let msg = Message::parse(b":bob PRIVMSG #room :caf\xe9").unwrap();
        assert_eq!(msg.param(1), Some(&b"caf\xe9"[..]));
    }

    #[test]
    fn empty_trailing_param_is_kept() {
        let msg = Message::parse(b":bob PART #room :").unwrap();
        assert_eq!(msg.params, vec![b"#room".to_vec(), Vec::new()]);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Message::parse(b"\r\n"), Err(ProtoError::EmptyLine));
        assert_eq!(Message::parse(b":prefix-only"), Err(ProtoError::MissingCommand));
        assert!(matches!(Message::parse(b"PRIV-MSG x"), Err(ProtoError::InvalidCommand(_))));
    }

    #[test]
    fn nick_of_strips_user_and_host() {
        assert_eq!(nick_of(b"alice!a@host"), b"alice");
        assert_eq!(nick_of(b"alice@host"), b"alice");
        assert_eq!(nick_of(b"irc.example.org"), b"irc.example.org");
    }
}
