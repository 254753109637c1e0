//! Channels.

use std::collections::{HashMap, HashSet};

use ferrod_proto::{match_mask, CaseMapping, Message};

use super::user::{User, UserId};
use super::Network;

/// Membership rank. Higher ranks imply every lower one; the gaps leave
/// room for nonstandard ranks between the usual three.
pub type PrefixRank = u32;

/// Rank granted by `+v`.
pub const VOICE_RANK: PrefixRank = 10_000;
/// Rank granted by `+h`.
pub const HALFOP_RANK: PrefixRank = 20_000;
/// Rank granted by `+o`.
pub const OP_RANK: PrefixRank = 30_000;

/// Map a status prefix character to the minimum rank it names.
///
/// These are the prefix characters a target may carry (`@#chan`,
/// `%#chan`, `+#chan`).
pub fn prefix_rank(prefix: char) -> Option<PrefixRank> {
    match prefix {
        '+' => Some(VOICE_RANK),
        '%' => Some(HALFOP_RANK),
        '@' => Some(OP_RANK),
        _ => None,
    }
}

/// Channel modes the message router consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// `+m` - only voiced-or-higher members may speak.
    Moderated,
    /// `+n` - non-members may not send to the channel.
    NoExternal,
}

impl ChannelMode {
    /// The mode letter.
    pub fn letter(self) -> char {
        match self {
            Self::Moderated => 'm',
            Self::NoExternal => 'n',
        }
    }

    /// Resolve a mode by its long name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "moderated" => Some(Self::Moderated),
            "noextmsg" => Some(Self::NoExternal),
            _ => None,
        }
    }
}

/// A channel: membership with ranks, modes, and a ban list.
#[derive(Debug)]
pub struct Channel {
    /// Canonical (display-case) name, `#`-prefixed.
    pub name: String,
    members: HashMap<UserId, PrefixRank>,
    modes: HashSet<ChannelMode>,
    bans: Vec<String>,
}

impl Channel {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            members: HashMap::new(),
            modes: HashSet::new(),
            bans: Vec::new(),
        }
    }

    /// Whether the user is on the channel.
    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains_key(&user)
    }

    /// The user's rank, or 0 for non-members and plain members.
    pub fn prefix_rank_of(&self, user: UserId) -> PrefixRank {
        self.members.get(&user).copied().unwrap_or(0)
    }

    pub(crate) fn insert_member(&mut self, user: UserId, rank: PrefixRank) {
        self.members.insert(user, rank);
    }

    /// Remove a member.
    pub fn remove_member(&mut self, user: UserId) {
        self.members.remove(&user);
    }

    /// Iterate members with their ranks.
    pub fn members(&self) -> impl Iterator<Item = (UserId, PrefixRank)> + '_ {
        self.members.iter().map(|(&id, &rank)| (id, rank))
    }

    /// Set a mode.
    pub fn set_mode(&mut self, mode: ChannelMode) {
        self.modes.insert(mode);
    }

    /// Clear a mode.
    pub fn unset_mode(&mut self, mode: ChannelMode) {
        self.modes.remove(&mode);
    }

    /// Check a mode.
    pub fn has_mode(&self, mode: ChannelMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Add a ban mask (`nick!user@host` with wildcards).
    pub fn add_ban(&mut self, mask: impl Into<String>) {
        self.bans.push(mask.into());
    }

    /// Whether the ban list matches this user.
    pub fn is_banned(&self, user: &User, mapping: CaseMapping) -> bool {
        self.is_banned_mask(&user.hostmask(), mapping)
    }

    /// Ban check against a pre-built `nick!user@host` mask.
    pub fn is_banned_mask(&self, hostmask: &str, mapping: CaseMapping) -> bool {
        self.bans
            .iter()
            .any(|ban| match_mask(ban, hostmask, mapping))
    }

    /// Fan a message out to members.
    ///
    /// Members below `min_rank` (when given) and members in `exemptions`
    /// are skipped. Delivery is per-member best-effort; remote members
    /// are skipped here and reached through inter-server routing.
    pub fn write_to_members(
        &self,
        network: &Network,
        event: &Message,
        min_rank: Option<PrefixRank>,
        exemptions: &HashSet<UserId>,
    ) {
        for (&id, &rank) in &self.members {
            if exemptions.contains(&id) {
                continue;
            }
            if let Some(min) = min_rank {
                if rank < min {
                    continue;
                }
            }
            if let Some(user) = network.user(id) {
                user.send(event);
            }
        }
    }
}
