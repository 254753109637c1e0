//! Mass messages: `$` server-mask targets.

mod common;

use common::{drain, TestNet};
use ferrod::state::MASS_MESSAGE_PRIV;
use ferrod::{RouteDecision, RouteError};

#[test]
fn without_privilege_the_command_silently_succeeds() {
    let mut net = TestNet::new();
    let (alice, mut alice_rx) = net.user("alice");
    let (_bob, mut bob_rx) = net.user("bob");

    // No error, no numeric, no delivery: indistinguishable from success.
    assert_eq!(
        net.privmsg(alice, "$*.example.org", "hi"),
        Ok(RouteDecision::LocalOnly)
    );
    assert!(drain(&mut alice_rx).is_empty());
    assert!(drain(&mut bob_rx).is_empty());
    // Not even idle time moves: the dispatch never reached the post pass.
    assert!(net.network.user(alice).unwrap().idle_last_message.is_none());
}

#[test]
fn matching_mask_reaches_all_registered_local_users() {
    let mut net = TestNet::new();
    let (alice, mut alice_rx) = net.user("alice");
    let (_bob, mut bob_rx) = net.user("bob");
    let (eve, mut eve_rx) = net.user("eve");
    net.network.user_mut(eve).unwrap().registered = false;
    let dave = net.remote_user("dave", "hub.example.org");
    net.network.user_mut(alice).unwrap().grant(MASS_MESSAGE_PRIV);

    net.privmsg(alice, "$*.example.net", "all hands").unwrap();

    let got = drain(&mut bob_rx);
    assert_eq!(got.len(), 1);
    assert_eq!(
        got[0].to_string(),
        ":alice!alice@host.example.net PRIVMSG $* :all hands\r\n"
    );
    // The sender is not exempt on the mass path and hears themselves.
    assert_eq!(drain(&mut alice_rx).len(), 1);
    // Unregistered locals and remote users are skipped.
    assert!(drain(&mut eve_rx).is_empty());
    assert!(net.network.user(dave).unwrap().idle_last_message.is_none());
}

#[test]
fn non_matching_mask_delivers_nothing_but_still_succeeds() {
    let mut net = TestNet::new();
    let (alice, mut alice_rx) = net.user("alice");
    let (_bob, mut bob_rx) = net.user("bob");
    net.network.user_mut(alice).unwrap().grant(MASS_MESSAGE_PRIV);

    assert_eq!(
        net.privmsg(alice, "$*.example.org", "wrong net"),
        Ok(RouteDecision::LocalOnly)
    );
    assert!(drain(&mut alice_rx).is_empty());
    assert!(drain(&mut bob_rx).is_empty());
    // The dispatch completed, so idle time did move.
    assert!(net.network.user(alice).unwrap().idle_last_message.is_some());
}

#[test]
fn empty_body_fails_after_the_pre_pass() {
    let mut net = TestNet::new();
    let (alice, _alice_rx) = net.user("alice");
    net.network.user_mut(alice).unwrap().grant(MASS_MESSAGE_PRIV);

    assert_eq!(
        net.privmsg(alice, "$*.example.net", ""),
        Err(RouteError::NoTextToSend)
    );
}

#[test]
fn remote_sender_mass_message_is_classified_broadcast() {
    let mut net = TestNet::new();
    let (_bob, mut bob_rx) = net.user("bob");
    let carol = net.remote_user("carol", "hub.example.org");
    net.network.user_mut(carol).unwrap().grant(MASS_MESSAGE_PRIV);

    assert_eq!(
        net.privmsg(carol, "$*.example.net", "network notice"),
        Ok(RouteDecision::Broadcast)
    );
    // The mask matched this server, so local users were served locally.
    assert_eq!(drain(&mut bob_rx).len(), 1);
}
