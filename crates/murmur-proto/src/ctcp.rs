//! CTCP ACTION framing.
//!
//! An action travels as a `PRIVMSG` body of the form `\x01ACTION text\x01`.
//! Other CTCP queries are not unwrapped.

/// CTCP delimiter byte.
pub const DELIM: u8 = 0x01;

const ACTION: &[u8] = b"ACTION";

/// Bytes [`wrap_action`] adds around a body.
pub const ACTION_OVERHEAD: usize = ACTION.len() + 3;

/// Body of a CTCP ACTION, or `None` if `text` is not one.
///
/// The closing delimiter is optional, as some clients omit it.
pub fn action_body(text: &[u8]) -> Option<&[u8]> {
    let inner = text.strip_prefix(&[DELIM])?;
    let inner = inner.strip_suffix(&[DELIM]).unwrap_or(inner);
    let rest = inner.strip_prefix(ACTION)?;
    match rest.split_first() {
        None => Some(rest),
        Some((b' ', body)) => Some(body),
        Some(_) => None,
    }
}

/// Wrap `body` as a CTCP ACTION.
pub fn wrap_action(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + ACTION_OVERHEAD);
    out.push(DELIM);
    out.extend_from_slice(ACTION);
    out.push(b' ');
    out.extend_from_slice(body);
    out.push(DELIM);
    out
}
