//! The message filter chain.
//!
//! Modules register [`MessageHook`]s and observe every dispatch at four
//! points: before fan-out (where they may mutate or veto), after a veto,
//! just before fan-out, and after fan-out. Hooks fire in registration
//! order, and each sees the mutations of the hooks registered before it.
//! Hooks receive the per-dispatch [`MessageDetails`] by reference only
//! and must not retain it past their return.

pub mod client_tags;
pub mod stamp;

pub use client_tags::ClientTagRelay;
pub use stamp::MessageStamp;

use tracing::debug;

use crate::handlers::messaging::{MessageDetails, MessageTarget, SenderSnapshot};

/// Verdict returned by a pre-message hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookVerdict {
    /// Let the dispatch proceed to the next hook.
    Continue,
    /// Veto the dispatch. The vetoing module is expected to notify the
    /// sender itself if it wants to; the core stays silent.
    Deny,
}

/// A module observing and shaping message dispatch.
///
/// Every method has a default no-op implementation; modules implement
/// the subset they care about.
pub trait MessageHook {
    /// Name for diagnostics.
    fn name(&self) -> &'static str;

    /// Runs before fan-out. May rewrite `details.text`, add outbound
    /// tags, extend the exemption set, or veto the dispatch.
    fn on_pre_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &mut MessageDetails,
    ) -> HookVerdict {
        HookVerdict::Continue
    }

    /// Fired after another hook vetoed the dispatch. Informational.
    fn on_message_blocked(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
    }

    /// Fired after a successful pre pass, before fan-out. Informational.
    fn on_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
    }

    /// Fired after fan-out. Server-link propagation typically hangs off
    /// this hook.
    fn on_post_message(
        &mut self,
        _source: &SenderSnapshot,
        _target: &MessageTarget,
        _details: &MessageDetails,
    ) {
    }
}

/// Registered hooks, fired in stable registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn MessageHook>>,
}

impl HookRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook. Order of registration is order of firing.
    pub fn register(&mut self, hook: Box<dyn MessageHook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub(crate) fn pre_message(
        &mut self,
        source: &SenderSnapshot,
        target: &MessageTarget,
        details: &mut MessageDetails,
    ) -> HookVerdict {
        for hook in &mut self.hooks {
            if hook.on_pre_message(source, target, details) == HookVerdict::Deny {
                debug!(hook = hook.name(), from = %source.nick, "message denied");
                return HookVerdict::Deny;
            }
        }
        HookVerdict::Continue
    }

    pub(crate) fn message_blocked(
        &mut self,
        source: &SenderSnapshot,
        target: &MessageTarget,
        details: &MessageDetails,
    ) {
        for hook in &mut self.hooks {
            hook.on_message_blocked(source, target, details);
        }
    }

    pub(crate) fn message(
        &mut self,
        source: &SenderSnapshot,
        target: &MessageTarget,
        details: &MessageDetails,
    ) {
        for hook in &mut self.hooks {
            hook.on_message(source, target, details);
        }
    }

    pub(crate) fn post_message(
        &mut self,
        source: &SenderSnapshot,
        target: &MessageTarget,
        details: &MessageDetails,
    ) {
        for hook in &mut self.hooks {
            hook.on_post_message(source, target, details);
        }
    }
}
