//! Classification of a typed input line.

/// What a line typed by the user asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput<'a> {
    /// `/raw <line>`: send the line verbatim.
    Raw(&'a str),
    /// `/me <text>`: CTCP ACTION to the current channel.
    Action(&'a str),
    /// Anything else: a message to the current channel.
    Message(&'a str),
}

/// Prefix for raw commands. Case-sensitive.
const RAW_PREFIX: &str = "/raw";

/// Prefix for actions. Case-sensitive.
const ACTION_PREFIX: &str = "/me";

impl<'a> UserInput<'a> {
    /// Classify `line`. `None` for an empty line.
    ///
    /// Prefixes are matched in order (`/raw`, then `/me`) and need not be
    /// followed by a space. The remainder after a prefix is trimmed of spaces
    /// and tabs; a plain message is kept verbatim.
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.is_empty() {
            return None;
        }

        let input = if let Some(rest) = line.strip_prefix(RAW_PREFIX) {
            Self::Raw(trim_blanks(rest))
        } else if let Some(rest) = line.strip_prefix(ACTION_PREFIX) {
            Self::Action(trim_blanks(rest))
        } else {
            Self::Message(line)
        };

        Some(input)
    }

    /// Text carried by the input.
    pub fn text(&self) -> &'a str {
        match self {
            Self::Raw(text) | Self::Action(text) | Self::Message(text) => text,
        }
    }
}

fn trim_blanks(text: &str) -> &str {
    text.trim_matches([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_prefix_is_trimmed() {
        assert_eq!(UserInput::parse("/raw WHOIS foo"), Some(UserInput::Raw("WHOIS foo")));
        assert_eq!(UserInput::parse("/raw \t PING x\t"), Some(UserInput::Raw("PING x")));
        assert_eq!(UserInput::parse("/rawfoo"), Some(UserInput::Raw("foo")));
    }

    #[test]
    fn me_prefix_is_an_action() {
        assert_eq!(UserInput::parse("/me waves"), Some(UserInput::Action("waves")));
        assert_eq!(UserInput::parse("/meow"), Some(UserInput::Action("ow")));
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        assert_eq!(UserInput::parse("/RAW x"), Some(UserInput::Message("/RAW x")));
        assert_eq!(UserInput::parse("/Me x"), Some(UserInput::Message("/Me x")));
    }

    #[test]
    fn messages_are_verbatim() {
        assert_eq!(UserInput::parse("  hello  "), Some(UserInput::Message("  hello  ")));
        assert_eq!(UserInput::parse(""), None);
    }

    #[test]
    fn unicode_whitespace_is_not_trimmed() {
        assert_eq!(UserInput::parse("/me\u{a0}x"), Some(UserInput::Action("\u{a0}x")));
    }
}
