//! Owned IRC messages.
//!
//! A [`Message`] is the unit the server parses off a connection and
//! enqueues onto recipient write buffers: optional IRCv3 tags, an
//! optional prefix naming the origin, and the command with parameters.

mod parse;
mod serialize;
pub mod tags;

use crate::command::Command;
use crate::prefix::Prefix;

/// A complete IRC message.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// IRCv3 message tags, serialised as `@key=value;key2 ` before the
    /// prefix when present.
    pub tags: Option<Vec<Tag>>,
    /// The message origin.
    pub prefix: Option<Prefix>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Create a PRIVMSG.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::PRIVMSG(target.into(), text.into()).into()
    }

    /// Create a NOTICE.
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::NOTICE(target.into(), text.into()).into()
    }

    /// Attach a tag, keeping any existing ones.
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        let tag = Tag {
            name: name.into(),
            value,
        };
        self.tags.get_or_insert_with(Vec::new).push(tag);
        self
    }

    /// Set the origin prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Look a tag value up by name.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tags
            .as_ref()?
            .iter()
            .find(|tag| tag.name == name)
            .and_then(|tag| tag.value.as_deref())
    }

    /// The nickname of the origin, if the prefix is a user prefix.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            tags: None,
            prefix: None,
            command,
        }
    }
}

/// An IRCv3 message tag: a name and an optional value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, e.g. `time` or `+draft/reply`.
    pub name: String,
    /// Tag value; `None` for presence-only tags.
    pub value: Option<String>,
}

impl Tag {
    /// Create a tag.
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Tag {
            name: name.into(),
            value,
        }
    }
}
