//! Integration test common infrastructure.
//!
//! Assembles a network with local/remote users and channels, runs
//! dispatches either through the library entry point or through raw
//! command lines, and drains delivered messages synchronously.

#![allow(dead_code)]

use ferrod::handlers::messaging::TagMap;
use ferrod::{
    dispatch_message, Config, Context, HandlerResult, HookRegistry, MessageKind, Network, Registry,
    RouteDecision, RouteError, SenderSnapshot, UserId,
};
use ferrod_proto::Message;
use tokio::sync::mpsc::UnboundedReceiver;

pub const SERVER_NAME: &str = "irc.example.net";

pub struct TestNet {
    pub config: Config,
    pub network: Network,
    pub hooks: HookRegistry,
    registry: Registry,
}

impl TestNet {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.name = SERVER_NAME.to_owned();
        let network = Network::new(config.messaging.casemapping);
        Self {
            config,
            network,
            hooks: HookRegistry::new(),
            registry: Registry::new(),
        }
    }

    /// Add a registered local user; nick doubles as ident.
    pub fn user(&mut self, nick: &str) -> (UserId, UnboundedReceiver<Message>) {
        self.network
            .add_local_user(nick, nick, "host.example.net", SERVER_NAME)
    }

    /// Add a registered user owned by another server.
    pub fn remote_user(&mut self, nick: &str, server: &str) -> UserId {
        self.network.add_remote_user(nick, nick, "host.remote", server)
    }

    /// Dispatch one message directly through the routing entry point.
    pub fn dispatch(
        &mut self,
        from: UserId,
        kind: MessageKind,
        target: &str,
        text: &str,
    ) -> Result<RouteDecision, RouteError> {
        let snapshot = SenderSnapshot::build(&self.network, from).expect("sender exists");
        dispatch_message(
            &mut self.network,
            &self.config,
            &mut self.hooks,
            &snapshot,
            kind,
            target,
            text,
            &TagMap::new(),
        )
    }

    pub fn privmsg(
        &mut self,
        from: UserId,
        target: &str,
        text: &str,
    ) -> Result<RouteDecision, RouteError> {
        self.dispatch(from, MessageKind::Privmsg, target, text)
    }

    pub fn notice(
        &mut self,
        from: UserId,
        target: &str,
        text: &str,
    ) -> Result<RouteDecision, RouteError> {
        self.dispatch(from, MessageKind::Notice, target, text)
    }

    /// Run a raw command line through the handler registry, as the
    /// command parser would.
    pub fn command(&mut self, from: UserId, line: &str) -> HandlerResult {
        let msg: Message = line.parse().expect("parseable command line");
        let mut ctx = Context {
            sender: from,
            network: &mut self.network,
            config: &self.config,
            hooks: &mut self.hooks,
        };
        self.registry.dispatch(&mut ctx, &msg)
    }
}

/// Drain everything currently enqueued on a write buffer.
pub fn drain(rx: &mut UnboundedReceiver<Message>) -> Vec<Message> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
