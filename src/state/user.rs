//! Users.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use ferrod_proto::{Message, Prefix};
use tokio::sync::mpsc::UnboundedSender;

/// Privilege required to send `$`-mask mass messages.
pub const MASS_MESSAGE_PRIV: &str = "users/mass-message";

/// Stable identifier for a user.
///
/// Ids are small integers unique for the lifetime of the process;
/// exemption sets and membership maps key on them rather than on
/// nicknames, which can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user known to this server, local or remote.
///
/// Local users own a write buffer; `send` enqueues onto it and returns
/// immediately. Remote users have no buffer here - delivery to them is
/// the link layer's business, signalled through the routing decision.
#[derive(Debug)]
pub struct User {
    id: UserId,
    /// Textual UID remote servers use to address this user.
    uid: String,
    /// Current nickname.
    pub nick: String,
    /// Ident/username.
    pub username: String,
    /// Visible hostname.
    pub host: String,
    /// Name of the server that owns this user.
    pub server: String,
    /// Whether the registration handshake has completed.
    pub registered: bool,
    /// Away reason, if marked away.
    pub away: Option<String>,
    /// When this user last sent a message that counts against idle time.
    pub idle_last_message: Option<DateTime<Utc>>,
    privileges: HashSet<String>,
    conn: Option<UnboundedSender<Message>>,
}

impl User {
    pub(crate) fn new(
        id: UserId,
        uid: String,
        nick: &str,
        username: &str,
        host: &str,
        server: &str,
        conn: Option<UnboundedSender<Message>>,
    ) -> Self {
        Self {
            id,
            uid,
            nick: nick.to_owned(),
            username: username.to_owned(),
            host: host.to_owned(),
            server: server.to_owned(),
            registered: true,
            away: None,
            idle_last_message: None,
            privileges: HashSet::new(),
            conn,
        }
    }

    /// This user's stable id.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// The textual UID remote servers address this user by.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Whether this user is owned by this server.
    pub fn is_local(&self) -> bool {
        self.conn.is_some()
    }

    /// Whether this user is marked away.
    pub fn is_away(&self) -> bool {
        self.away.is_some()
    }

    /// Mark away (`Some(reason)`) or back (`None`).
    pub fn set_away(&mut self, reason: Option<String>) {
        self.away = reason;
    }

    /// Grant a capability such as [`MASS_MESSAGE_PRIV`].
    pub fn grant(&mut self, privilege: &str) {
        self.privileges.insert(privilege.to_owned());
    }

    /// Check a capability.
    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.contains(privilege)
    }

    /// `nick!user@host` mask, as matched against ban lists.
    pub fn hostmask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.username, self.host)
    }

    /// Message prefix naming this user as origin.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(self.nick.as_str(), self.username.as_str(), self.host.as_str())
    }

    /// Enqueue a message on this user's connection.
    ///
    /// Best-effort: no-op for remote users, and a hung-up receiver is
    /// ignored (the connection layer surfaces that as a later QUIT).
    pub fn send(&self, message: &Message) {
        if let Some(conn) = &self.conn {
            let _ = conn.send(message.clone());
        }
    }

    pub(crate) fn connection(&self) -> Option<&UnboundedSender<Message>> {
        self.conn.as_ref()
    }
}
