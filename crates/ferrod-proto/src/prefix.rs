//! Message prefixes.
//!
//! The prefix of an IRC line identifies its origin: either a server name
//! or a user's `nick!user@host` mask.

use std::fmt;
use std::str::FromStr;

/// The origin of an IRC message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// A server name, e.g. `irc.example.net`.
    ServerName(String),
    /// A user origin: nickname, username, hostname.
    Nickname(String, String, String),
}

impl Prefix {
    /// Build a user prefix from its components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Parse a prefix leniently.
    ///
    /// A name containing a dot before any `!` or `@` is taken to be a
    /// server name; anything else is a (possibly partial) user prefix.
    pub fn parse(s: &str) -> Self {
        let (name, rest) = match s.find(['!', '@']) {
            Some(i) => (&s[..i], &s[i..]),
            None => (s, ""),
        };

        if rest.is_empty() {
            if name.contains('.') {
                return Prefix::ServerName(name.to_owned());
            }
            return Prefix::Nickname(name.to_owned(), String::new(), String::new());
        }

        let (user, host) = match rest.strip_prefix('!') {
            Some(after_bang) => match after_bang.split_once('@') {
                Some((u, h)) => (u, h),
                None => (after_bang, ""),
            },
            // No '!': rest starts with '@'.
            None => ("", &rest[1..]),
        };

        Prefix::Nickname(name.to_owned(), user.to_owned(), host.to_owned())
    }

    /// The nickname, if this is a user prefix.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    /// The hostname component.
    pub fn host(&self) -> Option<&str> {
        match self {
            Prefix::ServerName(name) => Some(name),
            Prefix::Nickname(_, _, host) if !host.is_empty() => Some(host),
            _ => None,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{user}")?;
                }
                if !host.is_empty() {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Prefix {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::parse(s))
    }
}
