//! NOTICE command handler.
//!
//! NOTICE shares the PRIVMSG pipeline. The differences are carried by
//! the kind: no `RPL_AWAY` auto-reply, and CTCP notices (replies) do not
//! reset the sender's idle clock.

use ferrod_proto::{Command, Message};

use super::super::{Context, Handler};
use super::{handle_message, MessageKind};
use crate::error::{HandlerError, HandlerResult};

/// Handler for the NOTICE command.
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match &msg.command {
            Command::NOTICE(targets, text) => {
                handle_message(ctx, MessageKind::Notice, targets, text, &msg.tags)
            }
            _ => Err(HandlerError::NeedMoreParams),
        }
    }
}
