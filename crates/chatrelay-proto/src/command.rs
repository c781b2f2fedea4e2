//! Control command classification.
//!
//! Every inbound line after the identity line is either one of the `SVR:`
//! control commands or ordinary chat. Matching is case-sensitive and exact:
//! `SVR:who ` (with a trailing space) is chat, not a listing request.

/// Exact line requesting the list of connected clients.
pub const WHO: &str = "SVR:who";

/// Exact line requesting a clean disconnect.
pub const DISCONNECT: &str = "SVR:disconnect";

/// Prefix of a rename request; the new name follows the space.
pub const RENAME_PREFIX: &str = "SVR:rename ";

/// A classified inbound line, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `SVR:who`
    Who,
    /// `SVR:disconnect`
    Disconnect,
    /// `SVR:rename <name>`; the payload may be empty or whitespace.
    Rename(&'a str),
    /// Anything else, relayed verbatim.
    Chat(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a line. Trailing CR/LF is ignored; nothing else is trimmed.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            WHO => Self::Who,
            DISCONNECT => Self::Disconnect,
            _ => match line.strip_prefix(RENAME_PREFIX) {
                Some(name) => Self::Rename(name),
                None => Self::Chat(line),
            },
        }
    }

    /// Lowercase command name, used as the dispatch key and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Who => "who",
            Self::Disconnect => "disconnect",
            Self::Rename(_) => "rename",
            Self::Chat(_) => "chat",
        }
    }

    /// True for the `SVR:` commands.
    pub fn is_control(&self) -> bool {
        !matches!(self, Self::Chat(_))
    }

    /// The command argument, if the command carries one.
    pub fn arg(&self) -> Option<&'a str> {
        match self {
            Self::Rename(arg) | Self::Chat(arg) => Some(arg),
            Self::Who | Self::Disconnect => None,
        }
    }
}
