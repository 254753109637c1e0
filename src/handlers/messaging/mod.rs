//! Messaging command handlers (PRIVMSG, NOTICE).
//!
//! The two commands share one pipeline; the kind only changes the wire
//! token, `RPL_AWAY` emission, and idle accounting. The handler expands
//! the comma-separated target list and dispatches each sub-target
//! independently - one bad target never aborts its siblings.

mod dispatch;
mod gate;
mod notice;
mod privmsg;
mod target;
mod types;

pub use dispatch::dispatch_message;
pub use gate::check_channel_send;
pub use notice::NoticeHandler;
pub use privmsg::PrivmsgHandler;
pub use target::resolve_target;
pub use types::{
    tag_map, MessageDetails, MessageKind, MessageTarget, RouteDecision, SenderSnapshot, TagMap,
};

use ferrod_proto::Tag;
use tracing::debug;

use crate::error::{HandlerError, HandlerResult};

use super::Context;

/// Shared PRIVMSG/NOTICE driver: loop expansion plus numeric emission.
pub(super) fn handle_message(
    ctx: &mut Context<'_>,
    kind: MessageKind,
    targets: &str,
    text: &str,
    tags: &Option<Vec<Tag>>,
) -> HandlerResult {
    let snapshot =
        SenderSnapshot::build(ctx.network, ctx.sender).ok_or(HandlerError::SenderMissing)?;
    if !snapshot.registered {
        return Err(HandlerError::NotRegistered);
    }

    let tags_in = tag_map(tags);

    for raw_target in targets.split(',') {
        if raw_target.is_empty() {
            continue;
        }

        match dispatch_message(
            ctx.network,
            ctx.config,
            ctx.hooks,
            &snapshot,
            kind,
            raw_target,
            text,
            &tags_in,
        ) {
            Ok(decision) => {
                debug!(from = %snapshot.nick, to = %raw_target, ?decision, "dispatched");
            }
            Err(err) => {
                debug!(
                    from = %snapshot.nick,
                    to = %raw_target,
                    code = err.error_code(),
                    "dispatch failed"
                );
                if let Some(numeric) = err.to_numeric(&ctx.config.server.name, &snapshot.nick) {
                    snapshot.reply(numeric);
                }
            }
        }
    }

    Ok(())
}
