//! Channel send permissions.
//!
//! Checked only for channel targets, only for local senders, and only
//! when the sender's rank on the channel is below voice - remote
//! messages were vetted by the server that owns the sender, and voiced
//! members speak past every restriction here. The first failing check
//! terminates the dispatch.

use crate::config::{BanPolicy, Config};
use crate::error::RouteError;
use crate::state::{ChannelMode, Network, VOICE_RANK};

use super::types::SenderSnapshot;

pub(crate) const REASON_NO_EXTERNAL: &str = "no external messages";
pub(crate) const REASON_MODERATED: &str = "+m";
pub(crate) const REASON_BANNED: &str = "you're banned";

/// Check whether the sender may speak to the channel under `key`.
pub fn check_channel_send(
    network: &Network,
    config: &Config,
    snapshot: &SenderSnapshot,
    key: &str,
) -> Result<(), RouteError> {
    if !snapshot.is_local {
        return Ok(());
    }

    let Some(chan) = network.channel(key) else {
        return Err(RouteError::NoSuchChannel(key.to_owned()));
    };

    if chan.prefix_rank_of(snapshot.id) >= VOICE_RANK {
        return Ok(());
    }

    if chan.has_mode(ChannelMode::NoExternal) && !chan.has_member(snapshot.id) {
        return Err(RouteError::CannotSendToChannel {
            channel: chan.name.clone(),
            reason: REASON_NO_EXTERNAL,
            notify: true,
        });
    }

    if chan.has_mode(ChannelMode::Moderated) {
        return Err(RouteError::CannotSendToChannel {
            channel: chan.name.clone(),
            reason: REASON_MODERATED,
            notify: true,
        });
    }

    let policy = config.messaging.restrict_banned_users;
    if policy != BanPolicy::Normal && chan.is_banned_mask(&snapshot.hostmask, network.casemapping())
    {
        return Err(RouteError::CannotSendToChannel {
            channel: chan.name.clone(),
            reason: REASON_BANNED,
            notify: policy == BanPolicy::RestrictNotify,
        });
    }

    Ok(())
}
