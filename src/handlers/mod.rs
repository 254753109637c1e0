//! IRC command handlers.
//!
//! The [`Registry`] maps command tokens to [`Handler`]s; the surrounding
//! server loop parses a line, builds a [`Context`], and dispatches. A
//! handler runs to completion on the thread that owns the tables -
//! replies and deliveries are enqueues onto per-connection write buffers
//! and never block.

pub mod away;
pub mod messaging;

pub use away::AwayHandler;
pub use messaging::{NoticeHandler, PrivmsgHandler};

use std::collections::HashMap;

use ferrod_proto::{Command, Message, Prefix, Response};

use crate::config::Config;
use crate::error::HandlerResult;
use crate::hooks::HookRegistry;
use crate::state::{Network, UserId};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The user issuing the command.
    pub sender: UserId,
    /// The server's user and channel tables.
    pub network: &'a mut Network,
    /// Server configuration.
    pub config: &'a Config,
    /// The message filter chain.
    pub hooks: &'a mut HookRegistry,
}

/// Trait implemented by all command handlers.
pub trait Handler {
    /// Handle one parsed command from the sender in `ctx`.
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a registry with the message-routing handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("NOTICE", Box::new(NoticeHandler));
        handlers.insert("AWAY", Box::new(AwayHandler));

        Self { handlers }
    }

    /// Dispatch a message to the matching handler.
    ///
    /// Command-layer failures owed a numeric (`ERR_NEEDMOREPARAMS`,
    /// `ERR_NOTREGISTERED`) are enqueued on the sender's connection
    /// here; the error is still returned for penalty accounting.
    /// Commands nothing here handles return `Ok(())` untouched; they are
    /// some other subsystem's business.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let result = match self.handlers.get(msg.command.name()) {
            Some(handler) => handler.handle(ctx, msg),
            None => Ok(()),
        };

        if let Err(err) = &result {
            if let Some(sender) = ctx.network.user(ctx.sender) {
                let numeric =
                    err.to_numeric(&ctx.config.server.name, &sender.nick, msg.command.name());
                if let Some(numeric) = numeric {
                    sender.send(&numeric);
                }
            }
        }

        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a server-prefixed reply.
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    Message {
        tags: None,
        prefix: Some(Prefix::ServerName(server_name.to_owned())),
        command: Command::Response(response, params),
    }
}
