//! Target resolution.
//!
//! The first argument of a message command names one of four things: a
//! `$` server mask, a channel, a status-prefixed channel subset, or a
//! nickname. Resolution classifies the raw string and looks the referent
//! up; it performs no permission checks.

use ferrod_proto::ChannelExt;

use crate::error::RouteError;
use crate::state::{prefix_rank, Network};

use super::types::{MessageTarget, SenderSnapshot};

/// Resolve a raw target string.
///
/// Lookup rules follow the sender's origin: local senders may pin a user
/// target to a server with `nick@server` and only resolve current
/// nicknames, while remote senders resolve globally (nickname, then
/// textual UID). The resolved user must be fully registered.
pub fn resolve_target(
    network: &Network,
    snapshot: &SenderSnapshot,
    raw: &str,
) -> Result<MessageTarget, RouteError> {
    if let Some(mask) = raw.strip_prefix('$') {
        // No lookup here; the mask is matched against server names at
        // delivery time.
        return Ok(MessageTarget::ServerMask(mask.to_owned()));
    }

    let (status, rest) = split_status_prefix(raw);
    if rest.is_channel_name() {
        return match network.channel(rest) {
            Some(_) => Ok(MessageTarget::Channel {
                key: network.casemapping().lower(rest),
                status,
            }),
            None => Err(RouteError::NoSuchChannel(raw.to_owned())),
        };
    }

    // A status prefix not followed by a channel is not restored: the
    // whole raw string is looked up as a nickname (and so fails).
    let dest = if snapshot.is_local {
        match raw.split_once('@') {
            Some((nick, required_server)) => {
                let user = network
                    .find_nick_only(nick)
                    .ok_or_else(|| RouteError::NoSuchNick(raw.to_owned()))?;
                if !user.server.eq_ignore_ascii_case(required_server) {
                    return Err(RouteError::NoSuchNick(raw.to_owned()));
                }
                Some(user)
            }
            None => network.find_nick_only(raw),
        }
    } else {
        network.find_nick(raw)
    };

    match dest {
        Some(user) if user.registered => Ok(MessageTarget::User(user.id())),
        _ => Err(RouteError::NoSuchNick(raw.to_owned())),
    }
}

/// Peel a registered status prefix character off the front, if present.
fn split_status_prefix(raw: &str) -> (Option<char>, &str) {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if prefix_rank(c).is_some() => (Some(c), chars.as_str()),
        _ => (None, raw),
    }
}
