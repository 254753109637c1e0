//! Server state tables.
//!
//! One [`Network`] owns every user and channel this server knows about.
//! All message dispatch happens on the thread that owns it; there are no
//! locks because there is no sharing. The only concurrency seam is the
//! per-connection write buffer each local [`User`] holds, which accepts
//! enqueues without blocking.

pub mod channel;
pub mod user;

use std::collections::HashMap;

use ferrod_proto::{CaseMapping, Message};
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub use channel::{prefix_rank, Channel, ChannelMode, PrefixRank, HALFOP_RANK, OP_RANK, VOICE_RANK};
pub use user::{User, UserId, MASS_MESSAGE_PRIV};

/// The user and channel tables, with casemapped lookup indices.
#[derive(Debug)]
pub struct Network {
    casemapping: CaseMapping,
    users: HashMap<UserId, User>,
    /// Casemapped nickname → id.
    nicks: HashMap<String, UserId>,
    /// Textual UID → id, for remote addressing.
    uids: HashMap<String, UserId>,
    /// Casemapped channel name → channel.
    channels: HashMap<String, Channel>,
    next_user: u64,
}

impl Network {
    /// Create empty tables under the given casemapping.
    pub fn new(casemapping: CaseMapping) -> Self {
        Self {
            casemapping,
            users: HashMap::new(),
            nicks: HashMap::new(),
            uids: HashMap::new(),
            channels: HashMap::new(),
            next_user: 1,
        }
    }

    /// The casemapping in force for all lookups.
    pub fn casemapping(&self) -> CaseMapping {
        self.casemapping
    }

    fn insert_user(
        &mut self,
        nick: &str,
        username: &str,
        host: &str,
        server: &str,
        conn: Option<mpsc::UnboundedSender<Message>>,
    ) -> UserId {
        let id = UserId(self.next_user);
        self.next_user += 1;
        let uid = format!("{:09}", id.0);
        let user = User::new(id, uid.clone(), nick, username, host, server, conn);
        self.nicks.insert(self.casemapping.lower(nick), id);
        self.uids.insert(uid, id);
        self.users.insert(id, user);
        id
    }

    /// Attach a local user and hand back the read half of their write
    /// buffer.
    ///
    /// The registration handshake lives outside this core, so users
    /// enter the table registered; flip [`User::registered`] off to
    /// model a connection mid-handshake.
    pub fn add_local_user(
        &mut self,
        nick: &str,
        username: &str,
        host: &str,
        server: &str,
    ) -> (UserId, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.insert_user(nick, username, host, server, Some(tx));
        (id, rx)
    }

    /// Record a user owned by another server.
    pub fn add_remote_user(
        &mut self,
        nick: &str,
        username: &str,
        host: &str,
        server: &str,
    ) -> UserId {
        self.insert_user(nick, username, host, server, None)
    }

    /// Look a user up by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Mutable lookup by id.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Nickname-only lookup, as used for local senders.
    pub fn find_nick_only(&self, nick: &str) -> Option<&User> {
        let id = self.nicks.get(&self.casemapping.lower(nick))?;
        self.users.get(id)
    }

    /// Global lookup for remote senders: nickname first, then textual
    /// UID (remote servers may still address a user by UID after a nick
    /// change they have not yet seen).
    pub fn find_nick(&self, name: &str) -> Option<&User> {
        if let Some(user) = self.find_nick_only(name) {
            return Some(user);
        }
        let id = self.uids.get(name)?;
        self.users.get(id)
    }

    /// Snapshot iterator over users owned by this server.
    pub fn local_users(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|user| user.is_local())
    }

    /// Look a channel up by name (any case).
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&self.casemapping.lower(name))
    }

    /// Mutable channel lookup.
    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&self.casemapping.lower(name))
    }

    /// Create a channel if it does not exist yet, returning it either
    /// way. The first creation fixes the display case.
    pub fn create_channel(&mut self, name: &str) -> &mut Channel {
        let key = self.casemapping.lower(name);
        self.channels.entry(key).or_insert_with(|| Channel::new(name))
    }

    /// Put a user on a channel with the given rank, creating the channel
    /// if needed.
    pub fn join(&mut self, channel: &str, user: UserId, rank: PrefixRank) {
        self.create_channel(channel).insert_member(user, rank);
    }
}
