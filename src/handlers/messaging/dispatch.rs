//! Message dispatch.
//!
//! The entry point the command layer calls once per (already expanded)
//! target. A dispatch is a straight line: resolve → gate → pre hooks →
//! fan-out → post hooks, terminating early on the first failure. It runs
//! to completion with no suspension point; every delivery is an enqueue
//! onto a recipient's write buffer.

use ferrod_proto::{match_mask, Message, Prefix, Response};
use tracing::debug;

use crate::config::Config;
use crate::error::RouteError;
use crate::hooks::{HookRegistry, HookVerdict};
use crate::state::{prefix_rank, Network};

use super::gate::check_channel_send;
use super::target::resolve_target;
use super::types::{
    MessageDetails, MessageKind, MessageTarget, RouteDecision, SenderSnapshot, TagMap,
};

/// Dispatch one message to one raw target.
///
/// On success the returned [`RouteDecision`] tells the command layer
/// whether anything is still owed to the server link; failures are
/// terminal for this dispatch only and never affect sibling targets of a
/// comma-expanded list.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_message(
    network: &mut Network,
    config: &Config,
    hooks: &mut HookRegistry,
    snapshot: &SenderSnapshot,
    kind: MessageKind,
    raw_target: &str,
    text: &str,
    tags_in: &TagMap,
) -> Result<RouteDecision, RouteError> {
    let target = resolve_target(network, snapshot, raw_target)?;

    match &target {
        MessageTarget::ServerMask(mask) => {
            if !snapshot.can_mass_message {
                // Deliberately indistinguishable from success, so the
                // privilege cannot be probed.
                debug!(from = %snapshot.nick, "mass message without privilege dropped");
                return Ok(routing_for(snapshot, &target, raw_target));
            }

            let mut details = MessageDetails::new(kind, text, tags_in);
            fire_pre_events(hooks, snapshot, &target, &mut details)?;

            if match_mask(mask, &config.server.name, network.casemapping()) {
                send_to_all_local(network, snapshot, &details);
                debug!(from = %snapshot.nick, mask = %mask, kind = kind.token(), "mass message");
            }

            fire_post_event(network, hooks, snapshot, &target, &details);
            Ok(routing_for(snapshot, &target, raw_target))
        }

        MessageTarget::Channel { key, status } => {
            check_channel_send(network, config, snapshot, key)?;

            let mut details = MessageDetails::new(kind, text, tags_in);
            // The sender never echoes back to themselves.
            details.exemptions.insert(snapshot.id);
            fire_pre_events(hooks, snapshot, &target, &mut details)?;

            if let Some(chan) = network.channel(key) {
                let wire_target = match status {
                    Some(c) => format!("{c}{}", chan.name),
                    None => chan.name.clone(),
                };
                let event = outbound(snapshot, &details, wire_target);
                let min_rank = status.and_then(prefix_rank);
                chan.write_to_members(network, &event, min_rank, &details.exemptions);
                debug!(from = %snapshot.nick, to = %chan.name, kind = kind.token(), "channel message");
            }

            fire_post_event(network, hooks, snapshot, &target, &details);
            Ok(routing_for(snapshot, &target, raw_target))
        }

        MessageTarget::User(dest_id) => {
            // For user targets the empty-body check precedes everything
            // else, filters included.
            if text.is_empty() {
                return Err(RouteError::NoTextToSend);
            }

            if kind == MessageKind::Privmsg {
                if let Some(dest) = network.user(*dest_id) {
                    if let Some(reason) = &dest.away {
                        let mut away = Response::rpl_away(&snapshot.nick, &dest.nick, reason);
                        away.prefix = Some(Prefix::ServerName(config.server.name.clone()));
                        snapshot.reply(away);
                    }
                }
            }

            let mut details = MessageDetails::new(kind, text, tags_in);
            fire_pre_events(hooks, snapshot, &target, &mut details)?;

            if let Some(dest) = network.user(*dest_id) {
                if dest.is_local() {
                    let event = outbound(snapshot, &details, dest.nick.clone());
                    dest.send(&event);
                    debug!(from = %snapshot.nick, to = %dest.nick, kind = kind.token(), "user message");
                }
                // Remote destination: nothing to write here; the routing
                // decision sends the link layer after it.
            }

            fire_post_event(network, hooks, snapshot, &target, &details);
            Ok(routing_for(snapshot, &target, raw_target))
        }
    }
}

/// Run the pre-message chain and the shared post-pass checks.
fn fire_pre_events(
    hooks: &mut HookRegistry,
    snapshot: &SenderSnapshot,
    target: &MessageTarget,
    details: &mut MessageDetails,
) -> Result<(), RouteError> {
    if hooks.pre_message(snapshot, target, details) == HookVerdict::Deny {
        hooks.message_blocked(snapshot, target, details);
        return Err(RouteError::FilterDenied);
    }

    // A hook may have zapped the body.
    if details.text.is_empty() {
        return Err(RouteError::NoTextToSend);
    }

    hooks.message(snapshot, target, details);
    Ok(())
}

/// Idle bookkeeping, then the post-message chain.
///
/// CTCP notices (e.g. CTCP replies) are automated and must not reset the
/// sender's idle clock.
fn fire_post_event(
    network: &mut Network,
    hooks: &mut HookRegistry,
    snapshot: &SenderSnapshot,
    target: &MessageTarget,
    details: &MessageDetails,
) {
    if snapshot.is_local && (details.kind == MessageKind::Privmsg || !details.is_ctcp()) {
        if let Some(sender) = network.user_mut(snapshot.id) {
            sender.idle_last_message = Some(chrono::Utc::now());
        }
    }

    hooks.post_message(snapshot, target, details);
}

/// Deliver a `$*` message to every registered local user not exempted.
fn send_to_all_local(network: &Network, snapshot: &SenderSnapshot, details: &MessageDetails) {
    let event = outbound(snapshot, details, "$*".to_owned());
    for user in network.local_users() {
        if user.registered && !details.exemptions.contains(&user.id()) {
            user.send(&event);
        }
    }
}

/// Build the outbound wire message for this dispatch.
fn outbound(snapshot: &SenderSnapshot, details: &MessageDetails, target: String) -> Message {
    Message {
        tags: details.tags_out_vec(),
        prefix: Some(snapshot.prefix.clone()),
        command: details.kind.make_command(target, details.text.clone()),
    }
}

/// Classify how the command layer should route this dispatch onward.
///
/// Local senders are fully handled here (server propagation is a
/// post-hook concern); messages arriving from a remote server still owe
/// a forward towards the target, or a broadcast for server masks.
fn routing_for(
    snapshot: &SenderSnapshot,
    target: &MessageTarget,
    raw_target: &str,
) -> RouteDecision {
    if snapshot.is_local {
        return RouteDecision::LocalOnly;
    }
    match target {
        MessageTarget::ServerMask(_) => RouteDecision::Broadcast,
        _ => RouteDecision::RouteToTarget(raw_target.to_owned()),
    }
}
