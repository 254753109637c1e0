//! The filter chain: veto, mutation, zap, exemptions, and the built-in
//! tag hooks.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{drain, TestNet};
use ferrod::hooks::{ClientTagRelay, MessageStamp};
use ferrod::{
    HookVerdict, MessageDetails, MessageHook, MessageTarget, RouteError, SenderSnapshot, UserId,
};
use ferrod_proto::{Command, Response};

/// Counts every hook point it sees.
#[derive(Clone, Default)]
struct Observer {
    pre: Rc<Cell<u32>>,
    blocked: Rc<Cell<u32>>,
    message: Rc<Cell<u32>>,
    post: Rc<Cell<u32>>,
}

impl MessageHook for Observer {
    fn name(&self) -> &'static str {
        "observer"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &mut MessageDetails,
    ) -> HookVerdict {
        self.pre.set(self.pre.get() + 1);
        HookVerdict::Continue
    }

    fn on_message_blocked(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
        self.blocked.set(self.blocked.get() + 1);
    }

    fn on_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
        self.message.set(self.message.get() + 1);
    }

    fn on_post_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
        self.post.set(self.post.get() + 1);
    }
}

/// Denies everything.
struct Veto;

impl MessageHook for Veto {
    fn name(&self) -> &'static str {
        "veto"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &mut MessageDetails,
    ) -> HookVerdict {
        HookVerdict::Deny
    }
}

/// Rewrites the body.
struct Rewrite(&'static str);

impl MessageHook for Rewrite {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        details.text = self.0.to_owned();
        HookVerdict::Continue
    }
}

/// Adds a user to the exemption set.
struct Exempt(UserId);

impl MessageHook for Exempt {
    fn name(&self) -> &'static str {
        "exempt"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        details.exemptions.insert(self.0);
        HookVerdict::Continue
    }
}

#[test]
fn veto_blocks_delivery_and_fires_blocked_hooks() {
    let mut net = TestNet::new();
    let (alice, mut alice_rx) = net.user("alice");
    let (bob, mut bob_rx) = net.user("bob");
    net.network.join("#room", alice, 0);
    net.network.join("#room", bob, 0);

    let observer = Observer::default();
    net.hooks.register(Box::new(Veto));
    net.hooks.register(Box::new(observer.clone()));

    assert_eq!(
        net.privmsg(alice, "#room", "blocked"),
        Err(RouteError::FilterDenied)
    );
    assert!(drain(&mut bob_rx).is_empty());
    // Silent on the wire: the filter is expected to notify if it cares.
    assert!(drain(&mut alice_rx).is_empty());

    // The observer sits after the veto: its pre hook never ran, but the
    // blocked notification reached it.
    assert_eq!(observer.pre.get(), 0);
    assert_eq!(observer.blocked.get(), 1);
    assert_eq!(observer.message.get(), 0);
    assert_eq!(observer.post.get(), 0);
}

#[test]
fn zapped_text_becomes_no_text_to_send_without_post_hooks() {
    let mut net = TestNet::new();
    let (alice, mut alice_rx) = net.user("alice");
    let (bob, mut bob_rx) = net.user("bob");
    net.network.join("#room", alice, 0);
    net.network.join("#room", bob, 0);

    let observer = Observer::default();
    net.hooks.register(Box::new(observer.clone()));
    net.hooks.register(Box::new(Rewrite("")));

    assert_eq!(
        net.privmsg(alice, "#room", "about to vanish"),
        Err(RouteError::NoTextToSend)
    );
    assert!(drain(&mut bob_rx).is_empty());
    assert_eq!(observer.pre.get(), 1);
    assert_eq!(observer.message.get(), 0);
    assert_eq!(observer.post.get(), 0);

    // Idle time did not move either: the dispatch died before the post
    // pass.
    assert!(net.network.user(alice).unwrap().idle_last_message.is_none());

    // Through the command layer the sender sees the numeric.
    net.command(alice, "PRIVMSG #room :still vanishing").unwrap();
    let got = drain(&mut alice_rx);
    assert_eq!(got.len(), 1);
    assert!(matches!(
        got[0].command,
        Command::Response(Response::ERR_NOTEXTTOSEND, _)
    ));
}

#[test]
fn hooks_mutate_the_delivered_body() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (bob, mut bob_rx) = net.user("bob");
    net.network.join("#room", alice, 0);
    net.network.join("#room", bob, 0);

    let observer = Observer::default();
    net.hooks.register(Box::new(Rewrite("censored")));
    net.hooks.register(Box::new(observer.clone()));

    net.privmsg(alice, "#room", "something rude").unwrap();
    let got = drain(&mut bob_rx);
    assert_eq!(got.len(), 1);
    assert!(got[0].to_string().ends_with("PRIVMSG #room :censored\r\n"));

    // Full hook sequence for a successful dispatch.
    assert_eq!(observer.pre.get(), 1);
    assert_eq!(observer.blocked.get(), 0);
    assert_eq!(observer.message.get(), 1);
    assert_eq!(observer.post.get(), 1);
}

#[test]
fn hook_added_exemptions_skip_recipients() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (bob, mut bob_rx) = net.user("bob");
    let (carol, mut carol_rx) = net.user("carol");
    for id in [alice, bob, carol] {
        net.network.join("#room", id, 0);
    }

    net.hooks.register(Box::new(Exempt(bob)));

    net.privmsg(alice, "#room", "not for bob").unwrap();
    assert!(drain(&mut bob_rx).is_empty());
    assert_eq!(drain(&mut carol_rx).len(), 1);
}

#[test]
fn client_tag_relay_preserves_client_only_tags() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (bob, mut bob_rx) = net.user("bob");
    net.network.join("#room", alice, 0);
    net.network.join("#room", bob, 0);

    net.hooks.register(Box::new(ClientTagRelay));

    net.command(
        alice,
        "@+draft/reply=abc123;account=alice PRIVMSG #room :tagged",
    )
    .unwrap();

    let got = drain(&mut bob_rx);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].tag_value("+draft/reply"), Some("abc123"));
    // Non-client tags are not relayed.
    assert_eq!(got[0].tag_value("account"), None);
}

#[test]
fn message_stamp_adds_time_and_msgid() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (_bob, mut bob_rx) = net.user("bob");

    net.hooks.register(Box::new(MessageStamp));

    net.privmsg(alice, "bob", "hi").unwrap();
    let got = drain(&mut bob_rx);
    assert_eq!(got.len(), 1);
    assert!(got[0].tag_value("msgid").is_some());
    assert!(got[0].tag_value("time").is_some_and(|t| t.contains('T')));
}

#[test]
fn later_hooks_see_earlier_mutations() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (_bob, mut bob_rx) = net.user("bob");

    net.hooks.register(Box::new(Rewrite("first")));
    net.hooks.register(Box::new(AppendSecond));

    net.privmsg(alice, "bob", "original").unwrap();
    let got = drain(&mut bob_rx);
    assert!(got[0].to_string().ends_with("PRIVMSG bob :first+second\r\n"));
}

struct AppendSecond;

impl MessageHook for AppendSecond {
    fn name(&self) -> &'static str {
        "append-second"
    }

    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        details.text.push_str("+second");
        HookVerdict::Continue
    }
}

#[test]
fn user_target_empty_body_fails_before_any_hook() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    let (_bob, _bob_rx) = net.user("bob");

    let observer = Observer::default();
    net.hooks.register(Box::new(observer.clone()));

    assert_eq!(net.privmsg(alice, "bob", ""), Err(RouteError::NoTextToSend));
    // For user targets the empty check precedes the filter chain.
    assert_eq!(observer.pre.get(), 0);
}

#[test]
fn mass_message_without_privilege_fires_no_hooks() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");

    let observer = Observer::default();
    net.hooks.register(Box::new(observer.clone()));

    net.privmsg(alice, "$*.example.net", "hi").unwrap();
    assert_eq!(observer.pre.get(), 0);
    assert_eq!(observer.post.get(), 0);
}
