//! AWAY command handler.

use ferrod_proto::{Command, Message, Prefix, Response};

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Handler for the AWAY command.
///
/// `AWAY :<reason>` marks the sender away; `AWAY` with no (or an empty)
/// reason marks them back. The away reason is what `RPL_AWAY` carries to
/// anyone who PRIVMSGs the user.
pub struct AwayHandler;

impl Handler for AwayHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = match &msg.command {
            Command::AWAY(reason) => reason.as_deref().filter(|r| !r.is_empty()),
            _ => return Err(HandlerError::NeedMoreParams),
        };

        let server_name = ctx.config.server.name.clone();
        let user = ctx
            .network
            .user_mut(ctx.sender)
            .ok_or(HandlerError::SenderMissing)?;
        if !user.registered {
            return Err(HandlerError::NotRegistered);
        }

        let mut numeric = match reason {
            Some(reason) => {
                user.set_away(Some(reason.to_owned()));
                Response::rpl_nowaway(&user.nick)
            }
            None => {
                user.set_away(None);
                Response::rpl_unaway(&user.nick)
            }
        };
        numeric.prefix = Some(Prefix::ServerName(server_name));
        user.send(&numeric);
        Ok(())
    }
}
