//! Messaging types.

use std::collections::{BTreeMap, HashSet};

use ferrod_proto::{Command, Ctcp, Message, Prefix, Tag};
use tokio::sync::mpsc::UnboundedSender;

use crate::state::{Network, UserId, MASS_MESSAGE_PRIV};

/// Which message command is being dispatched.
///
/// The kind decides the wire token, whether automatic replies such as
/// `RPL_AWAY` may be sent, and whether the dispatch counts against the
/// sender's idle time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// `PRIVMSG`
    Privmsg,
    /// `NOTICE`
    Notice,
}

impl MessageKind {
    /// The wire command token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Privmsg => "PRIVMSG",
            Self::Notice => "NOTICE",
        }
    }

    pub(crate) fn make_command(self, target: String, text: String) -> Command {
        match self {
            Self::Privmsg => Command::PRIVMSG(target, text),
            Self::Notice => Command::NOTICE(target, text),
        }
    }
}

/// A resolved message target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageTarget {
    /// A single user.
    User(UserId),
    /// A channel, optionally narrowed to a status rank by its prefix
    /// character (`@#chan` reaches ops and above).
    Channel {
        /// Casemapped channel key.
        key: String,
        /// Status prefix character, if the target carried one.
        status: Option<char>,
    },
    /// A `$` target: a glob matched against server names.
    ServerMask(String),
}

/// Message tags keyed by name. Ordered so serialisation is stable.
pub type TagMap = BTreeMap<String, Option<String>>;

/// Convert a wire tag list into a [`TagMap`].
pub fn tag_map(tags: &Option<Vec<Tag>>) -> TagMap {
    tags.iter()
        .flatten()
        .map(|tag| (tag.name.clone(), tag.value.clone()))
        .collect()
}

/// Per-dispatch message state.
///
/// Built when a dispatch starts and shaped by pre-message hooks; once
/// fan-out begins the text, kind, outbound tags, and exemptions are
/// frozen (hooks only see the details immutably from that point on).
#[derive(Clone, Debug)]
pub struct MessageDetails {
    /// Which command this is.
    pub kind: MessageKind,
    /// The message body. Hooks may rewrite or empty it.
    pub text: String,
    /// Client-originated tags as received.
    pub tags_in: TagMap,
    /// Tags to serialise outbound. Starts empty; hooks populate it.
    pub tags_out: TagMap,
    /// Recipients to skip during fan-out.
    pub exemptions: HashSet<UserId>,
}

impl MessageDetails {
    /// Fresh details for one dispatch.
    pub fn new(kind: MessageKind, text: &str, tags_in: &TagMap) -> Self {
        Self {
            kind,
            text: text.to_owned(),
            tags_in: tags_in.clone(),
            tags_out: TagMap::new(),
            exemptions: HashSet::new(),
        }
    }

    /// Whether the body carries a CTCP.
    pub fn is_ctcp(&self) -> bool {
        Ctcp::is_ctcp(&self.text)
    }

    /// Decode the CTCP name and body, if the body carries one.
    pub fn ctcp(&self) -> Option<Ctcp<'_>> {
        Ctcp::parse(&self.text)
    }

    pub(crate) fn tags_out_vec(&self) -> Option<Vec<Tag>> {
        if self.tags_out.is_empty() {
            return None;
        }
        Some(
            self.tags_out
                .iter()
                .map(|(name, value)| Tag::new(name.clone(), value.clone()))
                .collect(),
        )
    }
}

/// How the command layer should route a dispatch onward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Fully handled on this server; any inter-server propagation is the
    /// post-message hooks' business.
    LocalOnly,
    /// Forward to the server owning the named target.
    RouteToTarget(String),
    /// Broadcast to every linked server.
    Broadcast,
}

/// Sender attributes captured once per command.
///
/// Built at handler entry with a single user-table read and passed by
/// reference through resolution, gating, hooks, and fan-out.
#[derive(Clone, Debug)]
pub struct SenderSnapshot {
    /// The sender's stable id.
    pub id: UserId,
    /// Current nickname.
    pub nick: String,
    /// `nick!user@host`, as matched against ban lists.
    pub hostmask: String,
    /// Origin prefix for outbound messages.
    pub prefix: Prefix,
    /// Name of the server owning the sender.
    pub server: String,
    /// Whether the sender is owned by this server.
    pub is_local: bool,
    /// Whether the sender finished registration.
    pub registered: bool,
    /// Whether the sender may send `$`-mask mass messages.
    pub can_mass_message: bool,
    conn: Option<UnboundedSender<Message>>,
}

impl SenderSnapshot {
    /// Capture the sender's attributes. `None` if the id is unknown.
    pub fn build(network: &Network, id: UserId) -> Option<Self> {
        let user = network.user(id)?;
        Some(Self {
            id,
            nick: user.nick.clone(),
            hostmask: user.hostmask(),
            prefix: user.prefix(),
            server: user.server.clone(),
            is_local: user.is_local(),
            registered: user.registered,
            can_mass_message: user.has_privilege(MASS_MESSAGE_PRIV),
            conn: user.connection().cloned(),
        })
    }

    /// Enqueue a reply to the sender. No-op for remote senders, whose
    /// numerics travel over the server link instead.
    pub fn reply(&self, message: Message) {
        if let Some(conn) = &self.conn {
            let _ = conn.send(message);
        }
    }
}
