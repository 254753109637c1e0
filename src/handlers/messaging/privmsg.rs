//! PRIVMSG command handler.
//!
//! CTCP requests ride inside PRIVMSG bodies with `\x01` delimiters; the
//! server relays them untouched (the target client answers), and only
//! consults the framing for idle accounting.

use ferrod_proto::{Command, Message};

use super::super::{Context, Handler};
use super::{handle_message, MessageKind};
use crate::error::{HandlerError, HandlerResult};

/// Handler for the PRIVMSG command.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match &msg.command {
            Command::PRIVMSG(targets, text) => {
                handle_message(ctx, MessageKind::Privmsg, targets, text, &msg.tags)
            }
            _ => Err(HandlerError::NeedMoreParams),
        }
    }
}
